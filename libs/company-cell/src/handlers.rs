use std::sync::Arc;

use axum::{
    extract::{Extension, State},
    Json,
};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::access::AccessScope;
use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::{CompanyError, UpdateCompanyRequest};
use crate::services::CompanyService;

fn map_error(err: CompanyError) -> AppError {
    match err {
        CompanyError::NotFound => AppError::NotFound("Company not found".to_string()),
        CompanyError::DatabaseError(msg) => AppError::Database(msg),
    }
}

#[axum::debug_handler]
pub async fn get_company(
    State(config): State<Arc<AppConfig>>,
    Extension(_user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let service = CompanyService::new(&config);

    let company = service.get_or_default().await.map_err(map_error)?;

    Ok(Json(json!(company)))
}

#[axum::debug_handler]
pub async fn update_company(
    State(config): State<Arc<AppConfig>>,
    Extension(user): Extension<User>,
    Json(request): Json<UpdateCompanyRequest>,
) -> Result<Json<Value>, AppError> {
    let scope = AccessScope::for_user(&user);
    if !scope.can_manage_staff() {
        return Err(AppError::Auth(
            "Only admins can update branding".to_string(),
        ));
    }

    let service = CompanyService::new(&config);
    let company = service.update(request).await.map_err(map_error)?;

    Ok(Json(json!(company)))
}
