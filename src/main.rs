use axum::{http::Method, response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use news_gateway::config::AppConfig;
use news_gateway::handlers::{method_not_allowed, preflight};
use news_gateway::routes;
use news_gateway::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = AppConfig::from_env();
    tracing::info!("upstream backend: {}", config.upstream_base_url);

    let state = AppState::new(&config);
    let app = build_router(state);
    start_server(app, &config).await
}

fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .allow_credentials(false);

    Router::new()
        .route(
            "/",
            get(root_handler).options(preflight).fallback(method_not_allowed),
        )
        .route(
            "/health",
            get(health_check).options(preflight).fallback(method_not_allowed),
        )
        .route(
            "/api/health",
            get(health_check).options(preflight).fallback(method_not_allowed),
        )
        .merge(routes::auth::routes())
        .merge(routes::mock_email::routes())
        // Catch-all proxy last; the dedicated routes above take priority.
        .merge(routes::proxy::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn start_server(app: Router, config: &AppConfig) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);

    tracing::info!("🚀 Gateway starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {}: {}", addr, e))?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn root_handler() -> Json<Value> {
    Json(json!({
        "name": "News Gateway",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "auth": "/api/auth/{userLogin,register,forgot-password,forgot-password-enhanced,verify-code,reset-password}",
            "mock_email": "/api/mock-email-service",
            "proxy": "/api/*",
        },
    }))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Gateway running",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
