//! Liveness endpoints.
//!
//! `GET /` answers with a plain-text banner for humans, `GET /health`
//! with a bare 200 for load balancers.

use axum::{http::StatusCode, routing::get, Router};

use crate::shared::constants::HEALTH_MESSAGE;

/// Service banner
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is running", body = String, content_type = "text/plain")
    ),
    tag = "health"
)]
pub async fn root() -> &'static str {
    HEALTH_MESSAGE
}

async fn health_check() -> StatusCode {
    StatusCode::OK
}

pub fn routes() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
}
