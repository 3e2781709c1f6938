use std::collections::HashMap;

use chrono::NaiveDate;
use futures::try_join;
use reqwest::Method;
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{
    ClinicalHistoryEntry, CreatePatientRequest, Patient, PatientError, PatientSearchQuery,
    PatientWithHistory,
};

/// Portal bookings and quick staff entries register patients without a
/// birth date; the directory stores this placeholder instead of null.
const DEFAULT_BIRTH_DATE: (i32, u32, u32) = (2000, 1, 1);

pub struct PatientService {
    supabase: SupabaseClient,
    company_id: String,
}

impl PatientService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
            company_id: config.company_id.clone(),
        }
    }

    /// The directory read: patients and their clinical history fetched
    /// concurrently, entries grouped per patient and ordered newest first.
    pub async fn list_with_history(&self) -> Result<Vec<PatientWithHistory>, PatientError> {
        debug!("Fetching patient directory");

        let (patients, entries): (Vec<Patient>, Vec<ClinicalHistoryEntry>) = try_join!(
            self.supabase
                .request(Method::GET, "/rest/v1/patients?order=name.asc", None, None),
            self.supabase
                .request(Method::GET, "/rest/v1/clinical_history", None, None),
        )
        .map_err(|e| PatientError::DatabaseError(e.to_string()))?;

        Ok(Self::attach_history(patients, entries))
    }

    pub async fn get_with_history(
        &self,
        patient_id: Uuid,
    ) -> Result<PatientWithHistory, PatientError> {
        debug!("Fetching patient: {}", patient_id);

        let patient_path = format!("/rest/v1/patients?id=eq.{}", patient_id);
        let history_path = format!("/rest/v1/clinical_history?patient_id=eq.{}", patient_id);

        let (patients, entries): (Vec<Patient>, Vec<ClinicalHistoryEntry>) = try_join!(
            self.supabase.request(Method::GET, &patient_path, None, None),
            self.supabase.request(Method::GET, &history_path, None, None),
        )
        .map_err(|e| PatientError::DatabaseError(e.to_string()))?;

        let patient = patients.into_iter().next().ok_or(PatientError::NotFound)?;

        Ok(Self::attach_history(vec![patient], entries)
            .into_iter()
            .next()
            .ok_or(PatientError::NotFound)?)
    }

    pub async fn create(&self, request: CreatePatientRequest) -> Result<Patient, PatientError> {
        if request.name.trim().is_empty() || request.phone.trim().is_empty() {
            return Err(PatientError::ValidationError(
                "Nombre y teléfono son obligatorios".to_string(),
            ));
        }

        let (y, m, d) = DEFAULT_BIRTH_DATE;
        let patient = Patient {
            id: Uuid::new_v4(),
            name: request.name,
            email: request.email,
            phone: request.phone,
            document_id: request.document_id.unwrap_or_default(),
            birth_date: request
                .birth_date
                .or_else(|| NaiveDate::from_ymd_opt(y, m, d))
                .ok_or_else(|| PatientError::ValidationError("Invalid birth date".to_string()))?,
            company_id: self.company_id.clone(),
        };

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "Prefer",
            reqwest::header::HeaderValue::from_static("return=representation"),
        );

        let result: Vec<Patient> = self
            .supabase
            .request_with_headers(
                Method::POST,
                "/rest/v1/patients",
                None,
                Some(json!([patient])),
                Some(headers),
            )
            .await
            .map_err(|e| PatientError::DatabaseError(e.to_string()))?;

        result
            .into_iter()
            .next()
            .ok_or_else(|| PatientError::DatabaseError("Empty insert response".to_string()))
    }

    pub async fn search(&self, query: PatientSearchQuery) -> Result<Vec<Patient>, PatientError> {
        debug!("Searching patients with query: {:?}", query);

        let mut query_parts = vec![];

        if let Some(name) = query.name {
            query_parts.push(format!("name=ilike.%{}%", urlencoding::encode(&name)));
        }
        if let Some(document_id) = query.document_id {
            query_parts.push(format!("document_id=eq.{}", urlencoding::encode(&document_id)));
        }
        if let Some(phone) = query.phone {
            query_parts.push(format!("phone=ilike.%{}%", urlencoding::encode(&phone)));
        }

        let limit = query.limit.unwrap_or(50);
        let offset = query.offset.unwrap_or(0);
        let query_string = if query_parts.is_empty() {
            String::new()
        } else {
            format!("{}&", query_parts.join("&"))
        };
        let path = format!(
            "/rest/v1/patients?{}limit={}&offset={}",
            query_string, limit, offset
        );

        let result: Vec<Patient> = self
            .supabase
            .request(Method::GET, &path, None, None)
            .await
            .map_err(|e| PatientError::DatabaseError(e.to_string()))?;

        Ok(result)
    }

    fn attach_history(
        patients: Vec<Patient>,
        entries: Vec<ClinicalHistoryEntry>,
    ) -> Vec<PatientWithHistory> {
        let mut by_patient: HashMap<Uuid, Vec<ClinicalHistoryEntry>> = HashMap::new();
        for entry in entries {
            by_patient.entry(entry.patient_id).or_default().push(entry);
        }

        patients
            .into_iter()
            .map(|patient| {
                let mut history = by_patient.remove(&patient.id).unwrap_or_default();
                history.sort_by(|a, b| b.date.cmp(&a.date));
                PatientWithHistory { patient, history }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(patient_id: Uuid, date: &str) -> ClinicalHistoryEntry {
        ClinicalHistoryEntry {
            id: Uuid::new_v4(),
            patient_id,
            date: date.parse().unwrap(),
            professional_id: None,
            diagnosis: "Onicocriptosis".to_string(),
            notes: "Control".to_string(),
            recommendations: String::new(),
            appointment_id: None,
        }
    }

    #[test]
    fn history_is_grouped_and_newest_first() {
        let id = Uuid::new_v4();
        let other = Uuid::new_v4();
        let patient = Patient {
            id,
            name: "María Quispe".to_string(),
            email: None,
            phone: "987654321".to_string(),
            document_id: "45678912".to_string(),
            birth_date: "1990-05-04".parse().unwrap(),
            company_id: "feet-care-main".to_string(),
        };

        let entries = vec![
            entry(id, "2024-01-03"),
            entry(other, "2024-06-01"),
            entry(id, "2024-02-10"),
        ];

        let with_history = PatientService::attach_history(vec![patient], entries);
        assert_eq!(with_history.len(), 1);

        let dates: Vec<String> = with_history[0]
            .history
            .iter()
            .map(|e| e.date.to_string())
            .collect();
        assert_eq!(dates, vec!["2024-02-10", "2024-01-03"]);
    }
}
