//! Route definitions and router construction.

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};

use crate::bootstrap::{CorsConfig, GatewayContext};
use crate::handlers;
use crate::state::AppState;

/// Build CORS layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    match config {
        CorsConfig::AllowAll => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsConfig::AllowOrigins(origins) => {
            use axum::http::HeaderValue;
            let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(allowed)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

/// All API routes without the `/api` prefix, ready for nesting.
///
/// Axum 0.8 brace syntax for path parameters: `{namespace}`, `{name}`.
pub(crate) fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/workflows", get(handlers::workflows::list))
        .route(
            "/workflows/{namespace}/{name}",
            get(handlers::workflows::get),
        )
        .route(
            "/workflows/{namespace}/{name}/artifacts/{node_name}/{artifact_name}",
            get(handlers::artifacts::download),
        )
        .route("/steps/{namespace}/{name}/logs", get(handlers::logs::stream))
}

/// Create the main router: `/health` plus the API under `/api`.
pub fn create_router(ctx: GatewayContext, cors_config: &CorsConfig) -> Router {
    let state: AppState = Arc::new(ctx);
    let cors = build_cors_layer(cors_config);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes().with_state(state).layer(cors))
}

/// Create a router with API routes and static asset serving.
///
/// Serves files from `static_dir` for matching paths and falls back to
/// `index.html` for everything else (client-side routing). API routes
/// take priority over static serving.
pub fn create_spa_router<P: AsRef<Path>>(
    ctx: GatewayContext,
    static_dir: P,
    cors_config: &CorsConfig,
) -> Router {
    let static_path = static_dir.as_ref();
    let index_path = static_path.join("index.html");
    let serve_dir = ServeDir::new(static_path).fallback(ServeFile::new(&index_path));

    create_router(ctx, cors_config).fallback_service(serve_dir)
}

/// Health check endpoint.
pub(crate) async fn health_check() -> &'static str {
    "OK"
}
