use axum::{Json, extract::State, http::StatusCode};
use bookstore_core::database::BookStore;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::infra::app_state::AppState;

pub async fn ping_handler() -> Json<Value> {
    debug!("Ping endpoint called");
    Json(json!({
        "status": "ok",
        "message": "Bookstore API is running",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub async fn health_handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<Value>) {
    let mut health_status = json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "checks": {}
    });

    let status = match state.unit_of_work().store.ping().await {
        Ok(()) => {
            health_status["checks"]["database"] = json!({
                "status": "healthy",
                "backend": state.config().store.to_string(),
            });
            StatusCode::OK
        }
        Err(e) => {
            warn!(error = %e, "health check failed");
            health_status["status"] = json!("unhealthy");
            health_status["checks"]["database"] = json!({
                "status": "unhealthy",
                "error": e.to_string()
            });
            StatusCode::SERVICE_UNAVAILABLE
        }
    };

    (status, Json(health_status))
}
