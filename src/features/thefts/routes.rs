use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::thefts::handlers;
use crate::features::thefts::services::TheftService;

/// Create routes for the thefts feature
///
/// Both endpoints are public; reports are anonymous.
pub fn routes(service: Arc<TheftService>) -> Router {
    Router::new()
        .route("/robo", post(handlers::submit_theft))
        .route("/zonas-rojas", get(handlers::list_active_zones))
        .with_state(service)
}
