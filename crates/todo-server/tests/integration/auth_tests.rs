use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use tower::ServiceExt;

use todo_core::{Claims, TokenService};

use crate::integration::common::{
    TEST_AUDIENCE, TEST_ISSUER, TEST_KEY, TEST_USERNAME, TestApp, body_json, json_request, login,
    setup_test_app, setup_test_app_with, test_jwt_config,
};

async fn list_with_token(app: &TestApp, token: &str) -> StatusCode {
    app.router
        .clone()
        .oneshot(
            Request::get("/items")
                .header("authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
        .status()
}

#[tokio::test]
async fn login_issues_decodable_token() {
    let app = setup_test_app().await;
    let token = login(&app).await;

    let mut validation = Validation::new(Algorithm::HS512);
    validation.set_issuer(&[TEST_ISSUER]);
    validation.set_audience(&[TEST_AUDIENCE]);
    let data = jsonwebtoken::decode::<Claims>(
        &token,
        &DecodingKey::from_secret(TEST_KEY.as_bytes()),
        &validation,
    )
    .unwrap();

    assert_eq!(data.claims.sub, TEST_USERNAME);
    assert_eq!(data.claims.email, TEST_USERNAME);
    assert_eq!(data.claims.exp - data.claims.iat, 300);
    assert_eq!(data.claims.id, "1");
}

#[tokio::test]
async fn login_with_wrong_credentials_returns_401() {
    let app = setup_test_app().await;

    for (username, password) in [
        (TEST_USERNAME, "wrong-password"),
        ("someone@email.com", "Password123"),
        ("", ""),
    ] {
        let response = app
            .router
            .clone()
            .oneshot(json_request(
                "POST",
                "/accounts/login",
                serde_json::json!({"username": username, "password": password}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["error"], "unauthorized");
    }
}

#[tokio::test]
async fn listing_without_token_returns_401() {
    let app = setup_test_app().await;

    let response = app
        .router
        .oneshot(Request::get("/items").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");
}

#[tokio::test]
async fn listing_with_login_token_returns_items() {
    let app = setup_test_app().await;

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/items",
            serde_json::json!({"id": 1, "title": "Go to the gym", "isCompleted": false}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let token = login(&app).await;
    let response = app
        .router
        .clone()
        .oneshot(
            Request::get("/items")
                .header("authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        serde_json::json!([{"id": 1, "title": "Go to the gym", "isCompleted": false}])
    );
}

#[tokio::test]
async fn expired_token_still_lists_while_lifetime_unchecked() {
    let app = setup_test_app().await;
    let token = TokenService::new(&app.jwt)
        .issue_at(TEST_USERNAME, Utc::now() - Duration::days(1))
        .unwrap();

    assert_eq!(list_with_token(&app, &token).await, StatusCode::OK);
}

#[tokio::test]
async fn expired_token_rejected_when_lifetime_checked() {
    let mut jwt = test_jwt_config();
    jwt.validate_lifetime = true;
    let app = setup_test_app_with(jwt).await;

    let token = TokenService::new(&app.jwt)
        .issue_at(TEST_USERNAME, Utc::now() - Duration::days(1))
        .unwrap();
    assert_eq!(list_with_token(&app, &token).await, StatusCode::UNAUTHORIZED);

    let fresh = login(&app).await;
    assert_eq!(list_with_token(&app, &fresh).await, StatusCode::OK);
}

#[tokio::test]
async fn tokens_from_other_issuers_are_rejected() {
    let app = setup_test_app().await;

    let mut wrong_key = test_jwt_config();
    wrong_key.key = "some other signing key".into();
    let mut wrong_issuer = test_jwt_config();
    wrong_issuer.issuer = "https://evil.example/".into();
    let mut wrong_audience = test_jwt_config();
    wrong_audience.audience = "https://evil.example/".into();

    for config in [wrong_key, wrong_issuer, wrong_audience] {
        let token = TokenService::new(&config).issue(TEST_USERNAME).unwrap();
        assert_eq!(
            list_with_token(&app, &token).await,
            StatusCode::UNAUTHORIZED
        );
    }

    assert_eq!(
        list_with_token(&app, "not.a.jwt").await,
        StatusCode::UNAUTHORIZED
    );
}

#[tokio::test]
async fn item_routes_other_than_listing_are_public() {
    let app = setup_test_app().await;

    let response = app
        .router
        .oneshot(Request::get("/items/1").body(Body::empty()).unwrap())
        .await
        .unwrap();

    // Reaches the handler (404) instead of being stopped by the middleware (401).
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn only_get_on_items_collection_is_guarded() {
    let app = setup_test_app().await;

    let created = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/items",
            serde_json::json!({"id": 5, "title": "Water plants", "isCompleted": false}),
        ))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);

    let listed = app
        .router
        .clone()
        .oneshot(Request::get("/items").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(listed.status(), StatusCode::UNAUTHORIZED);

    let updated = app
        .router
        .clone()
        .oneshot(json_request(
            "PUT",
            "/items/5",
            serde_json::json!({"id": 5, "title": "Water plants", "isCompleted": true}),
        ))
        .await
        .unwrap();
    assert_eq!(updated.status(), StatusCode::OK);

    let deleted = app
        .router
        .oneshot(Request::delete("/items/5").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
}
