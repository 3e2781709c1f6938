use std::sync::Arc;

use axum::{routing::get, Router};

use appointment_cell::router::create_appointment_router;
use auth_cell::router::auth_routes;
use clinical_record_cell::router::create_clinical_router;
use company_cell::router::create_company_router;
use patient_cell::router::create_patient_router;
use portal_cell::router::create_portal_router;
use sede_cell::router::create_sede_router;
use shared_config::AppConfig;
use staff_cell::router::create_staff_router;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(|| async { "Bee Clinic API is running!" }))
        .nest("/auth", auth_routes(state.clone()))
        .nest("/appointments", create_appointment_router(state.clone()))
        .nest("/patients", create_patient_router(state.clone()))
        .nest("/clinical", create_clinical_router(state.clone()))
        .nest("/sedes", create_sede_router(state.clone()))
        .nest("/staff", create_staff_router(state.clone()))
        .nest("/company", create_company_router(state.clone()))
        .nest("/portal", create_portal_router(state))
}
