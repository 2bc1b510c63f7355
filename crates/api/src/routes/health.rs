use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

use crate::ApiState;

#[derive(Serialize)]
struct StatusResponse {
    status: &'static str,
}

#[derive(Serialize)]
struct VersionResponse {
    name: &'static str,
    version: &'static str,
}

async fn health_check() -> Json<StatusResponse> {
    Json(StatusResponse { status: "ok" })
}

/// Ready once the database answers a trivial query.
async fn readiness(State(state): State<Arc<ApiState>>) -> (StatusCode, Json<StatusResponse>) {
    match sqlx::query("SELECT 1").execute(&state.db_pool).await {
        Ok(_) => (StatusCode::OK, Json(StatusResponse { status: "ready" })),
        Err(err) => {
            warn!("Database not reachable: {}", err);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(StatusResponse { status: "unavailable" }),
            )
        }
    }
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness))
        .route("/version", get(version))
}
