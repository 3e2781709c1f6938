use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use shared_config::AppConfig;

use crate::handlers::*;

pub fn auth_routes(config: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/validate", get(validate))
        .route("/verify", get(verify))
        .with_state(config)
}
