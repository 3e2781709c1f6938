use std::sync::Arc;

use axum::{middleware, routing::post, Router};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers::*;

pub fn create_clinical_router(config: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/history/{patient_id}", post(save_history_entry))
        .route("/assist/summary", post(summarize_notes))
        .route("/assist/diagnosis", post(suggest_diagnosis))
        .layer(middleware::from_fn_with_state(config.clone(), auth_middleware))
        .with_state(config)
}
