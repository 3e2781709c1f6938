use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use shared_config::AppConfig;

use crate::handlers::*;

/// Public routes: the portal is reachable without a staff token.
pub fn create_portal_router(config: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/company", get(portal_company))
        .route("/sedes", get(portal_sedes))
        .route("/slots", get(portal_time_slots))
        .route("/bookings", post(portal_book))
        .with_state(config)
}
