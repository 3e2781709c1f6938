use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use patient_cell::models::ClinicalHistoryEntry;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateHistoryEntryRequest {
    pub diagnosis: String,
    pub notes: String,
    pub recommendations: Option<String>,
    pub professional_id: Option<Uuid>,
    pub appointment_id: Option<Uuid>,
    pub date: Option<NaiveDate>,
}

/// Result of finalizing a clinical session. The entry insert and the
/// linked-appointment status write are two separate steps; the flag tells
/// the caller honestly whether the second one landed.
#[derive(Debug, Clone, Serialize)]
pub struct HistorySaveOutcome {
    pub entry: ClinicalHistoryEntry,
    pub appointment_marked_attended: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummarizeNotesRequest {
    pub notes: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SuggestDiagnosisRequest {
    pub findings: String,
}

/// Structured advisory output of the diagnosis assistant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisSuggestion {
    pub suggestions: Vec<String>,
    pub recommended_service: String,
    pub rationale: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
