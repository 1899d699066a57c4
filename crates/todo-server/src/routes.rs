use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Router};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use todo_core::{AppError, Claims, ItemService};

use crate::auth::require_bearer;
use crate::dto::{ItemDto, LoginRequest};
use crate::error::ApiError;
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Build the full router with all routes and middleware.
pub fn router(state: Arc<AppState>) -> Router {
    let bearer = middleware::from_fn_with_state(state.clone(), require_bearer);

    Router::new()
        .route("/", get(root))
        // `route_layer` wraps only the methods registered before it, so `post` must stay
        // after it or item creation would start requiring a token.
        .route(
            "/items",
            get(list_items).route_layer(bearer).post(create_item),
        )
        .route(
            "/items/{id}",
            get(get_item).put(update_item).delete(delete_item),
        )
        .route("/accounts/login", post(login))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/items",
    responses(
        (status = 200, description = "All items", body = [ItemDto]),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "items"
)]
pub async fn list_items(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let items = ItemService::new(state.db.item_repo()).list().await?;
    tracing::debug!(sub = %claims.sub, count = items.len(), "Listed items");

    let response: Vec<ItemDto> = items.into_iter().map(ItemDto::from).collect();
    Ok(axum::Json(response))
}

#[utoipa::path(
    post,
    path = "/items",
    request_body = ItemDto,
    responses(
        (status = 201, description = "Item created", body = ItemDto),
        (status = 400, description = "An item with this id already exists"),
    ),
    tag = "items"
)]
pub async fn create_item(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<ItemDto>,
) -> Result<impl IntoResponse, ApiError> {
    let item = ItemService::new(state.db.item_repo())
        .create(body.into())
        .await?;
    let location = format!("/items/{}", item.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        axum::Json(ItemDto::from(item)),
    ))
}

#[utoipa::path(
    get,
    path = "/items/{id}",
    params(
        ("id" = i64, Path, description = "Item id")
    ),
    responses(
        (status = 200, description = "Item details", body = ItemDto),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "items"
)]
pub async fn get_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let item = ItemService::new(state.db.item_repo()).get(id).await?;
    Ok(axum::Json(ItemDto::from(item)))
}

/// The path id selects the row; the id in the body is ignored.
#[utoipa::path(
    put,
    path = "/items/{id}",
    params(
        ("id" = i64, Path, description = "Item id")
    ),
    request_body = ItemDto,
    responses(
        (status = 200, description = "Item updated", body = ItemDto),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "items"
)]
pub async fn update_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    axum::Json(body): axum::Json<ItemDto>,
) -> Result<impl IntoResponse, ApiError> {
    if body.id != id {
        tracing::debug!(path_id = id, body_id = body.id, "Ignoring body id on update");
    }

    let item = ItemService::new(state.db.item_repo())
        .update(id, body.into())
        .await?;
    Ok(axum::Json(ItemDto::from(item)))
}

#[utoipa::path(
    delete,
    path = "/items/{id}",
    params(
        ("id" = i64, Path, description = "Item id")
    ),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "items"
)]
pub async fn delete_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    ItemService::new(state.db.item_repo()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/accounts/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed bearer token", body = String),
        (status = 401, description = "Invalid credentials", body = crate::dto::ErrorResponse),
    ),
    tag = "accounts"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.identity.verify(&body.username, &body.password) {
        tracing::warn!(username = %body.username, "Login rejected");
        return Err(AppError::Unauthorized.into());
    }

    let token = state.tokens.issue(&body.username)?;
    tracing::info!(username = %body.username, "Login succeeded");

    Ok(axum::Json(token))
}

// ---------------------------------------------------------------------------
// Root
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Greeting", body = String, content_type = "text/plain"),
    ),
    tag = "system"
)]
pub async fn root() -> &'static str {
    "Hello from Minimal API"
}
