use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers::*;

pub fn create_sede_router(config: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(list_sedes))
        .route("/", post(create_sede))
        .route("/{id}", get(get_sede))
        .route("/{id}", put(update_sede))
        .layer(middleware::from_fn_with_state(config.clone(), auth_middleware))
        .with_state(config)
}
