use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    pub document_id: String,
    pub birth_date: NaiveDate,
    pub company_id: String,
}

/// One finalized clinical session. Entries are written once and never
/// edited afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicalHistoryEntry {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub date: NaiveDate,
    pub professional_id: Option<Uuid>,
    pub diagnosis: String,
    pub notes: String,
    pub recommendations: String,
    pub appointment_id: Option<Uuid>,
}

/// Directory view: the patient row plus their history, newest entry first.
#[derive(Debug, Clone, Serialize)]
pub struct PatientWithHistory {
    #[serde(flatten)]
    pub patient: Patient,
    pub history: Vec<ClinicalHistoryEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePatientRequest {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub document_id: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatientSearchQuery {
    pub name: Option<String>,
    pub document_id: Option<String>,
    pub phone: Option<String>,
    pub limit: Option<i32>,
    pub offset: Option<i32>,
}

#[derive(Debug, thiserror::Error)]
pub enum PatientError {
    #[error("Patient not found")]
    NotFound,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
