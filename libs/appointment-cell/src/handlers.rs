use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::access::{scoped, AccessScope};
use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::{
    AppointmentError, AppointmentSearchQuery, CreateAppointmentRequest, ProjectSessionsRequest,
    ScheduleSessionsRequest, UpdateAppointmentRequest,
};
use crate::services::{AppointmentService, TreatmentPlanService};

fn map_error(err: AppointmentError) -> AppError {
    match err {
        AppointmentError::NotFound => AppError::NotFound("Appointment not found".to_string()),
        AppointmentError::ValidationError(msg) => AppError::ValidationError(msg),
        AppointmentError::DatabaseError(msg) => AppError::Database(msg),
    }
}

#[axum::debug_handler]
pub async fn search_appointments(
    State(config): State<Arc<AppConfig>>,
    Extension(user): Extension<User>,
    Query(query): Query<AppointmentSearchQuery>,
) -> Result<Json<Value>, AppError> {
    let scope = AccessScope::for_user(&user);
    let service = AppointmentService::new(&config);

    let appointments = service.search(query).await.map_err(map_error)?;
    let appointments = scoped(&scope, appointments);
    let total = appointments.len();

    Ok(Json(json!({
        "appointments": appointments,
        "total": total
    })))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(config): State<Arc<AppConfig>>,
    Extension(user): Extension<User>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let scope = AccessScope::for_user(&user);
    let service = AppointmentService::new(&config);

    let appointment = service.get(appointment_id).await.map_err(map_error)?;
    if !scope.can_access_sede(appointment.sede_id) {
        return Err(AppError::NotFound("Appointment not found".to_string()));
    }

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn create_appointment(
    State(config): State<Arc<AppConfig>>,
    Extension(user): Extension<User>,
    Json(request): Json<CreateAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let scope = AccessScope::for_user(&user);
    if !scope.can_access_sede(request.sede_id) {
        return Err(AppError::Auth("No access to this sede".to_string()));
    }

    let service = AppointmentService::new(&config);
    let appointment = service.create(request).await.map_err(map_error)?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn update_appointment(
    State(config): State<Arc<AppConfig>>,
    Extension(user): Extension<User>,
    Path(appointment_id): Path<Uuid>,
    Json(request): Json<UpdateAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let scope = AccessScope::for_user(&user);
    let service = AppointmentService::new(&config);

    let current = service.get(appointment_id).await.map_err(map_error)?;
    if !scope.can_access_sede(current.sede_id) {
        return Err(AppError::Auth("No access to this sede".to_string()));
    }

    let appointment = service
        .update(appointment_id, request)
        .await
        .map_err(map_error)?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn project_treatment_sessions(
    State(config): State<Arc<AppConfig>>,
    Extension(_user): Extension<User>,
    Json(request): Json<ProjectSessionsRequest>,
) -> Result<Json<Value>, AppError> {
    let service = TreatmentPlanService::new(&config);
    let sessions = service.project(request).await.map_err(map_error)?;

    Ok(Json(json!({ "sessions": sessions })))
}

#[axum::debug_handler]
pub async fn schedule_treatment_sessions(
    State(config): State<Arc<AppConfig>>,
    Extension(user): Extension<User>,
    Json(request): Json<ScheduleSessionsRequest>,
) -> Result<Json<Value>, AppError> {
    let scope = AccessScope::for_user(&user);
    let appointment_service = AppointmentService::new(&config);

    let source = appointment_service
        .get(request.appointment_id)
        .await
        .map_err(map_error)?;
    if !scope.can_access_sede(source.sede_id) {
        return Err(AppError::Auth("No access to this sede".to_string()));
    }

    let service = TreatmentPlanService::new(&config);
    let created = service
        .schedule_sessions(&source, request)
        .await
        .map_err(map_error)?;
    let total = created.len();

    Ok(Json(json!({
        "appointments": created,
        "total": total
    })))
}
