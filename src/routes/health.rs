use crate::modules::{AppState, Health};
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use http::StatusCode;
use serde_json::{json, Value};
use tracing::error;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/ping", get(ping))
}

/// Store round trip
#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Store reachable"), (status = 500, description = "Store unreachable")))]
pub async fn health(State(Health(store)): State<Health>) -> (StatusCode, Json<Value>) {
    match store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "healthy", "database": "connected" })),
        ),
        Err(e) => {
            error!("Health check failed: {e:?}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "status": "database connection failed" })),
            )
        }
    }
}

/// Liveness
#[utoipa::path(get, path = "/ping", tag = "health", responses((status = 200, description = "Alive")))]
pub async fn ping() -> Json<Value> {
    Json(json!({ "message": "pong", "status": "success" }))
}
