use anyhow::Result;
use chrono::Utc;
use reqwest::Method;
use serde_json::json;
use tracing::{debug, error, info};
use uuid::Uuid;

use appointment_cell::models::AppointmentStatus;
use patient_cell::models::ClinicalHistoryEntry;
use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{CreateHistoryEntryRequest, HistoryError, HistorySaveOutcome};

pub struct HistoryService {
    supabase: SupabaseClient,
}

impl HistoryService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    /// Finalize a clinical session. The entry is written first; when it is
    /// linked to an appointment, a second explicit step marks that
    /// appointment ATENDIDO. The second step failing does not undo the
    /// first: the clinical record is the source of truth, so the failure is
    /// logged and reported in the outcome instead.
    pub async fn save_entry(
        &self,
        patient_id: Uuid,
        request: CreateHistoryEntryRequest,
    ) -> Result<HistorySaveOutcome, HistoryError> {
        if request.diagnosis.trim().is_empty() || request.notes.trim().is_empty() {
            return Err(HistoryError::ValidationError(
                "El diagnóstico y las notas de evolución son obligatorios".to_string(),
            ));
        }

        let entry = ClinicalHistoryEntry {
            id: Uuid::new_v4(),
            patient_id,
            date: request.date.unwrap_or_else(|| Utc::now().date_naive()),
            professional_id: request.professional_id,
            diagnosis: request.diagnosis,
            notes: request.notes,
            recommendations: request.recommendations.unwrap_or_default(),
            appointment_id: request.appointment_id,
        };

        debug!("Saving clinical history entry for patient {}", patient_id);

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "Prefer",
            reqwest::header::HeaderValue::from_static("return=representation"),
        );

        let result: Vec<ClinicalHistoryEntry> = self
            .supabase
            .request_with_headers(
                Method::POST,
                "/rest/v1/clinical_history",
                None,
                Some(json!([entry])),
                Some(headers),
            )
            .await
            .map_err(|e| HistoryError::DatabaseError(e.to_string()))?;

        let saved = result
            .into_iter()
            .next()
            .ok_or_else(|| HistoryError::DatabaseError("Empty insert response".to_string()))?;

        let appointment_marked_attended = match saved.appointment_id {
            None => None,
            Some(appointment_id) => match self.mark_attended(appointment_id).await {
                Ok(()) => {
                    info!("Appointment {} marked as attended", appointment_id);
                    Some(true)
                }
                Err(e) => {
                    error!(
                        "History entry {} saved but appointment {} could not be marked attended: {}",
                        saved.id, appointment_id, e
                    );
                    Some(false)
                }
            },
        };

        Ok(HistorySaveOutcome {
            entry: saved,
            appointment_marked_attended,
        })
    }

    async fn mark_attended(&self, appointment_id: Uuid) -> Result<()> {
        let path = format!("/rest/v1/appointments?id=eq.{}", appointment_id);
        self.supabase
            .execute(
                Method::PATCH,
                &path,
                None,
                Some(json!({ "status": AppointmentStatus::Attended })),
            )
            .await
    }
}
