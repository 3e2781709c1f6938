use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_models::auth::TokenResponse;
use shared_models::error::AppError;
use shared_utils::jwt::{sign_token, validate_token};

use crate::models::{AuthCellError, LoginRequest, LoginResponse};
use crate::services::AccessCodeService;

const TOKEN_TTL_HOURS: u64 = 12;

fn map_error(err: AuthCellError) -> AppError {
    match err {
        AuthCellError::MissingAccessKey => AppError::ValidationError(err.to_string()),
        AuthCellError::InvalidAccessKey => AppError::Auth(err.to_string()),
        AuthCellError::DatabaseError(msg) => AppError::Database(msg),
    }
}

#[axum::debug_handler]
pub async fn login(
    State(config): State<Arc<AppConfig>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let service = AccessCodeService::new(&config);

    let user = service
        .authenticate(&request.access_key)
        .await
        .map_err(map_error)?;

    let token = sign_token(&user, &config.jwt_secret, TOKEN_TTL_HOURS).map_err(AppError::Auth)?;

    Ok(Json(LoginResponse { token, user }))
}

#[axum::debug_handler]
pub async fn validate(
    State(config): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<TokenResponse>, AppError> {
    debug!("Validating token");

    match validate_token(auth.token(), &config.jwt_secret) {
        Ok(user) => Ok(Json(TokenResponse {
            valid: true,
            user_id: user.id,
            email: user.email,
            role: user.role,
        })),
        Err(err) => Err(AppError::Auth(err)),
    }
}

#[axum::debug_handler]
pub async fn verify(
    State(config): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> (StatusCode, Json<Value>) {
    debug!("Verifying token");

    match validate_token(auth.token(), &config.jwt_secret) {
        Ok(_) => (StatusCode::OK, Json(json!({ "valid": true }))),
        Err(_) => (StatusCode::OK, Json(json!({ "valid": false }))),
    }
}
