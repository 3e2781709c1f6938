use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_models::access::{AccessScope, SedeScoped};
use shared_models::timefmt;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

/// An appointment row. The patient fields are a snapshot taken at booking
/// time; `patient_id` links to the directory when the patient is known.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: Option<Uuid>,
    pub patient_name: String,
    pub patient_phone: String,
    pub patient_dni: Option<String>,
    pub date: NaiveDate,
    #[serde(with = "timefmt")]
    pub time: NaiveTime,
    pub status: AppointmentStatus,
    pub sede_id: Uuid,
    pub professional_id: Option<Uuid>,
    pub booking_code: String,
    pub notes: Option<String>,
    pub company_id: String,
}

impl SedeScoped for Appointment {
    fn visible_to(&self, scope: &AccessScope) -> bool {
        scope.can_access_sede(self.sede_id)
    }
}

/// Appointment lifecycle states. The wire values are the Spanish display
/// strings the hosted store keeps in `appointments.status`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AppointmentStatus {
    #[serde(rename = "POR CONFIRMAR")]
    Pending,
    #[serde(rename = "CONFIRMADO")]
    Confirmed,
    #[serde(rename = "CANCELADO")]
    Cancelled,
    #[serde(rename = "COMPLETADO")]
    Completed,
    #[serde(rename = "NO ASISTIÓ")]
    NoShow,
    #[serde(rename = "ATENDIDO")]
    Attended,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "POR CONFIRMAR"),
            AppointmentStatus::Confirmed => write!(f, "CONFIRMADO"),
            AppointmentStatus::Cancelled => write!(f, "CANCELADO"),
            AppointmentStatus::Completed => write!(f, "COMPLETADO"),
            AppointmentStatus::NoShow => write!(f, "NO ASISTIÓ"),
            AppointmentStatus::Attended => write!(f, "ATENDIDO"),
        }
    }
}

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub patient_name: String,
    pub patient_phone: Option<String>,
    pub patient_dni: Option<String>,
    pub patient_id: Option<Uuid>,
    pub sede_id: Uuid,
    pub professional_id: Option<Uuid>,
    pub date: NaiveDate,
    #[serde(with = "timefmt")]
    pub time: NaiveTime,
    pub notes: Option<String>,
}

/// Fields a staff member can change after booking. Status included: the
/// store accepts any status write (last-write-wins, no transition table).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAppointmentRequest {
    pub patient_name: Option<String>,
    pub patient_phone: Option<String>,
    pub patient_dni: Option<String>,
    pub status: Option<AppointmentStatus>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppointmentSearchQuery {
    pub status: Option<AppointmentStatus>,
    pub sede_id: Option<Uuid>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub limit: Option<i32>,
    pub offset: Option<i32>,
}

// ==============================================================================
// TREATMENT PLAN MODELS
// ==============================================================================

/// One projected follow-up visit. Ephemeral: drafts only exist between
/// projection and materialization, they are never stored as their own rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionDraft {
    pub id: Uuid,
    pub date: NaiveDate,
    #[serde(with = "timefmt")]
    pub time: NaiveTime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectSessionsRequest {
    pub num_sessions: u32,
    pub frequency_days: u32,
    pub appointment_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    #[serde(default, with = "timefmt::option")]
    pub time: Option<NaiveTime>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleSessionsRequest {
    pub appointment_id: Uuid,
    pub sessions: Vec<SessionDraft>,
    pub plan_started: Option<NaiveDate>,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AppointmentError {
    #[error("Appointment not found")]
    NotFound,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
