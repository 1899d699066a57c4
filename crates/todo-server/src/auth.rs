use std::sync::Arc;

use axum::extract::State;
use axum::http::{Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use todo_core::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Extract the token from an `Authorization: Bearer <token>` header value.
/// The scheme name is matched case-insensitively.
fn bearer_token(header_value: &str) -> Option<&str> {
    let (scheme, token) = header_value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Middleware that verifies the bearer JWT and stores its [`todo_core::Claims`]
/// in the request extensions.
pub async fn require_bearer(
    State(state): State<Arc<AppState>>,
    mut request: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token);

    let Some(token) = token else {
        return ApiError(AppError::TokenError(
            "Missing or invalid Authorization header. Expected: Bearer <token>".to_string(),
        ))
        .into_response();
    };

    match state.tokens.verify(token) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(err) => {
            tracing::debug!(error = %err, "Rejected bearer token");
            ApiError(err).into_response()
        }
    }
}
