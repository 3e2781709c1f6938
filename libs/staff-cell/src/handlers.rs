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

use crate::models::{CreateProfessionalRequest, CreateUserRequest, StaffError, UpdateUserRequest};
use crate::services::{ProfessionalService, UserService};

fn map_error(err: StaffError) -> AppError {
    match err {
        StaffError::EmailAlreadyRegistered { .. } | StaffError::EmailInUse { .. } => {
            AppError::Conflict(err.to_string())
        }
        StaffError::NotFound => AppError::NotFound("User not found".to_string()),
        StaffError::ValidationError(msg) => AppError::ValidationError(msg),
        StaffError::DatabaseError(msg) => AppError::Database(msg),
    }
}

fn require_staff_manager(user: &User) -> Result<AccessScope, AppError> {
    let scope = AccessScope::for_user(user);
    if !scope.can_manage_staff() {
        return Err(AppError::Auth(
            "Only admins can manage staff".to_string(),
        ));
    }
    Ok(scope)
}

#[axum::debug_handler]
pub async fn list_users(
    State(config): State<Arc<AppConfig>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    require_staff_manager(&user)?;
    let service = UserService::new(&config);

    let users = service.list().await.map_err(map_error)?;
    let total = users.len();

    Ok(Json(json!({
        "users": users,
        "total": total
    })))
}

#[axum::debug_handler]
pub async fn create_user(
    State(config): State<Arc<AppConfig>>,
    Extension(user): Extension<User>,
    Json(request): Json<CreateUserRequest>,
) -> Result<Json<Value>, AppError> {
    require_staff_manager(&user)?;
    let service = UserService::new(&config);

    let created = service.create(request).await.map_err(map_error)?;

    Ok(Json(json!(created)))
}

#[axum::debug_handler]
pub async fn update_user(
    State(config): State<Arc<AppConfig>>,
    Extension(user): Extension<User>,
    Path(user_id): Path<Uuid>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<Value>, AppError> {
    require_staff_manager(&user)?;
    let service = UserService::new(&config);

    let updated = service.update(user_id, request).await.map_err(map_error)?;

    Ok(Json(json!(updated)))
}

#[axum::debug_handler]
pub async fn list_professionals(
    State(config): State<Arc<AppConfig>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let scope = AccessScope::for_user(&user);
    let service = ProfessionalService::new(&config);

    let professionals = service.list().await.map_err(map_error)?;
    let professionals = scoped(&scope, professionals);
    let total = professionals.len();

    Ok(Json(json!({
        "professionals": professionals,
        "total": total
    })))
}

#[axum::debug_handler]
pub async fn create_professional(
    State(config): State<Arc<AppConfig>>,
    Extension(user): Extension<User>,
    Json(request): Json<CreateProfessionalRequest>,
) -> Result<Json<Value>, AppError> {
    require_staff_manager(&user)?;
    let service = ProfessionalService::new(&config);

    let created = service.create(request).await.map_err(map_error)?;

    Ok(Json(json!(created)))
}
