use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers::*;

pub fn create_appointment_router(config: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(search_appointments))
        .route("/", post(create_appointment))
        .route("/{id}", get(get_appointment))
        .route("/{id}", put(update_appointment))
        .route("/treatment-plan/project", post(project_treatment_sessions))
        .route("/treatment-plan", post(schedule_treatment_sessions))
        .layer(middleware::from_fn_with_state(config.clone(), auth_middleware))
        .with_state(config)
}
