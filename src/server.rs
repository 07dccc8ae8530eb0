use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::config::AppConfig;
use crate::handlers::{self, blogs, health, login, users};
use crate::middleware::extract_bearer_token;
use crate::state::AppState;

/// Full application router with all middleware, bound to `state`
pub fn app(state: AppState) -> Router {
    let router = Router::new()
        .route("/health", get(health::health))
        .merge(blog_routes())
        .merge(user_routes())
        .route("/api/login", post(login::login))
        .fallback(handlers::unknown_endpoint)
        .layer(middleware::from_fn(extract_bearer_token))
        .layer(cors_layer(&state.config));

    let router = if state.config.api.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    };

    router.with_state(state)
}

fn blog_routes() -> Router<AppState> {
    Router::new()
        .route("/api/blogs", get(blogs::list).post(blogs::create))
        .route(
            "/api/blogs/:id",
            get(blogs::show).put(blogs::update).delete(blogs::delete),
        )
}

fn user_routes() -> Router<AppState> {
    Router::new().route("/api/users", get(users::list).post(users::create))
}

/// No configured origins means any origin is allowed
fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Serve until Ctrl-C, then release the store
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    let local_addr = listener.local_addr()?;
    info!("Blog list API listening on http://{}", local_addr);

    let shutdown_state = state.clone();
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    shutdown_state.shutdown().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
