use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::{json, Value};

use company_cell::services::CompanyService;
use sede_cell::services::SedeService;
use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{PortalBookingRequest, PortalError, PORTAL_TIME_SLOTS};
use crate::services::PortalBookingService;

fn map_error(err: PortalError) -> AppError {
    match err {
        PortalError::ValidationError(msg) => AppError::ValidationError(msg),
        PortalError::SedeNotFound => AppError::NotFound("Sede not found".to_string()),
        PortalError::DatabaseError(msg) => AppError::Database(msg),
    }
}

/// Public branding for the booking page.
#[axum::debug_handler]
pub async fn portal_company(
    State(config): State<Arc<AppConfig>>,
) -> Result<Json<Value>, AppError> {
    let service = CompanyService::new(&config);

    let company = service
        .get_or_default()
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Json(json!(company)))
}

/// Public sede list for the booking page.
#[axum::debug_handler]
pub async fn portal_sedes(State(config): State<Arc<AppConfig>>) -> Result<Json<Value>, AppError> {
    let service = SedeService::new(&config);

    let sedes = service
        .list()
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    let total = sedes.len();

    Ok(Json(json!({
        "sedes": sedes,
        "total": total
    })))
}

#[axum::debug_handler]
pub async fn portal_time_slots() -> Json<Value> {
    Json(json!({ "slots": PORTAL_TIME_SLOTS }))
}

#[axum::debug_handler]
pub async fn portal_book(
    State(config): State<Arc<AppConfig>>,
    Json(request): Json<PortalBookingRequest>,
) -> Result<Json<Value>, AppError> {
    let service = PortalBookingService::new(&config);

    let booking = service.book(request).await.map_err(map_error)?;

    Ok(Json(json!(booking)))
}
