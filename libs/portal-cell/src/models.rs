use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use appointment_cell::models::Appointment;
use shared_models::timefmt;

/// The fixed slot grid the public portal offers.
pub const PORTAL_TIME_SLOTS: [&str; 9] = [
    "09:00", "10:00", "11:00", "12:00", "14:00", "15:00", "16:00", "17:00", "18:00",
];

/// Prefixed to the local phone number when the visitor does not pick one.
pub const DEFAULT_COUNTRY_CODE: &str = "+51";

#[derive(Debug, Clone, Deserialize)]
pub struct PortalBookingRequest {
    pub sede_id: Uuid,
    pub patient_name: String,
    pub patient_phone: String,
    pub patient_email: Option<String>,
    pub patient_dni: Option<String>,
    pub country_code: Option<String>,
    pub date: NaiveDate,
    #[serde(with = "timefmt")]
    pub time: NaiveTime,
}

#[derive(Debug, Serialize)]
pub struct PortalBookingResponse {
    pub appointment: Appointment,
    pub patient_id: Uuid,
    pub whatsapp_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Sede not found")]
    SedeNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}
