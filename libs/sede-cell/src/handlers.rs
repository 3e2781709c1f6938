use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::access::{scoped, AccessScope};
use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::{CreateSedeRequest, SedeError, UpdateSedeRequest};
use crate::services::SedeService;

fn map_error(err: SedeError) -> AppError {
    match err {
        SedeError::NotFound => AppError::NotFound("Sede not found".to_string()),
        SedeError::ValidationError(msg) => AppError::ValidationError(msg),
        SedeError::DatabaseError(msg) => AppError::Database(msg),
    }
}

#[axum::debug_handler]
pub async fn list_sedes(
    State(config): State<Arc<AppConfig>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let scope = AccessScope::for_user(&user);
    let service = SedeService::new(&config);

    let sedes = service.list().await.map_err(map_error)?;
    let sedes = scoped(&scope, sedes);
    let total = sedes.len();

    Ok(Json(json!({
        "sedes": sedes,
        "total": total
    })))
}

#[axum::debug_handler]
pub async fn get_sede(
    State(config): State<Arc<AppConfig>>,
    Extension(user): Extension<User>,
    Path(sede_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let scope = AccessScope::for_user(&user);
    let service = SedeService::new(&config);

    let sede = service.get(sede_id).await.map_err(map_error)?;
    if !scope.can_access_sede(sede.id) {
        return Err(AppError::NotFound("Sede not found".to_string()));
    }

    Ok(Json(json!(sede)))
}

#[axum::debug_handler]
pub async fn create_sede(
    State(config): State<Arc<AppConfig>>,
    Extension(user): Extension<User>,
    Json(request): Json<CreateSedeRequest>,
) -> Result<Json<Value>, AppError> {
    let scope = AccessScope::for_user(&user);
    if !scope.sees_every_sede() {
        return Err(AppError::Auth("Only admins can create sedes".to_string()));
    }

    let service = SedeService::new(&config);
    let sede = service.create(request).await.map_err(map_error)?;

    Ok(Json(json!(sede)))
}

#[axum::debug_handler]
pub async fn update_sede(
    State(config): State<Arc<AppConfig>>,
    Extension(user): Extension<User>,
    Path(sede_id): Path<Uuid>,
    Json(request): Json<UpdateSedeRequest>,
) -> Result<Json<Value>, AppError> {
    let scope = AccessScope::for_user(&user);
    if !scope.can_access_sede(sede_id) {
        return Err(AppError::Auth("No access to this sede".to_string()));
    }

    let service = SedeService::new(&config);
    let sede = service.update(sede_id, request).await.map_err(map_error)?;

    Ok(Json(json!(sede)))
}
