use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::get,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    handlers::system::{health_handler, ping_handler},
    infra::app_state::AppState,
    routes::{self, paths},
};

/// Build the full application router: catalog routes, liveness endpoints and
/// the CORS and tracing middleware.
pub fn create_app(state: AppState) -> Router {
    let cors_layer = cors_layer(&state);

    Router::new()
        .route(paths::PING, get(ping_handler))
        .route(paths::HEALTH, get(health_handler))
        .merge(routes::create_catalog_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer),
        )
        .with_state(state)
}

/// Permissive in dev mode or when `*` is configured, allow-list otherwise.
fn cors_layer(state: &AppState) -> CorsLayer {
    let config = state.config();
    if config.dev_mode || config.cors.is_wildcard_included() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .cors
        .allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin.trim()).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}
