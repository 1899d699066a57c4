use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use todo_core::{AuthConfig, JwtConfig, StaticIdentityProvider, TokenService};
use todo_db::{Database, DatabaseConfig};
use todo_server::routes;
use todo_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("todo=info".parse()?))
        .with_target(false)
        .init();

    let port = std::env::var("TODO_SERVER_PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{port}");

    let db_config = DatabaseConfig::from_env()?;
    let jwt_config = JwtConfig::from_env()?;
    let auth_config = AuthConfig::from_env();

    tracing::info!(database = %db_config.url, "Opening database");
    let db = Database::connect(&db_config).await?;
    db.migrate().await?;

    let tokens = TokenService::new(&jwt_config);
    if !tokens.validates_lifetime() {
        tracing::warn!(
            "JWT_VALIDATE_LIFETIME is off: expired bearer tokens are still accepted on /items"
        );
    }
    tracing::info!(
        issuer = %jwt_config.issuer,
        audience = %jwt_config.audience,
        ttl_minutes = jwt_config.ttl_minutes,
        "Token service configured"
    );

    let state = Arc::new(AppState {
        db,
        tokens,
        identity: Box::new(StaticIdentityProvider::new(auth_config)),
    });

    let app = routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    tracing::info!("Starting server on {addr}");
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for CTRL+C: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
