use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, info};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;
use shared_utils::codes::staff_booking_code;

use crate::models::{
    Appointment, AppointmentError, AppointmentSearchQuery, AppointmentStatus,
    CreateAppointmentRequest, UpdateAppointmentRequest,
};
use crate::services::lifecycle::AppointmentLifecycle;

pub struct AppointmentService {
    supabase: SupabaseClient,
    company_id: String,
    lifecycle: AppointmentLifecycle,
}

impl AppointmentService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
            company_id: config.company_id.clone(),
            lifecycle: AppointmentLifecycle::new(),
        }
    }

    pub async fn search(
        &self,
        query: AppointmentSearchQuery,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        debug!("Searching appointments with query: {:?}", query);

        let mut query_parts = vec![];

        if let Some(status) = query.status {
            query_parts.push(format!(
                "status=eq.{}",
                urlencoding::encode(&status.to_string())
            ));
        }
        if let Some(sede_id) = query.sede_id {
            query_parts.push(format!("sede_id=eq.{}", sede_id));
        }
        if let Some(from) = query.from_date {
            query_parts.push(format!("date=gte.{}", from));
        }
        if let Some(to) = query.to_date {
            query_parts.push(format!("date=lte.{}", to));
        }
        query_parts.push("order=date.asc,time.asc".to_string());

        let limit = query.limit.unwrap_or(500);
        let offset = query.offset.unwrap_or(0);
        let path = format!(
            "/rest/v1/appointments?{}&limit={}&offset={}",
            query_parts.join("&"),
            limit,
            offset
        );

        let result: Vec<Appointment> = self
            .supabase
            .request(Method::GET, &path, None, None)
            .await
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))?;

        Ok(result)
    }

    pub async fn get(&self, appointment_id: Uuid) -> Result<Appointment, AppointmentError> {
        debug!("Fetching appointment: {}", appointment_id);

        let path = format!("/rest/v1/appointments?id=eq.{}", appointment_id);
        let result: Vec<Appointment> = self
            .supabase
            .request(Method::GET, &path, None, None)
            .await
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))?;

        result.into_iter().next().ok_or(AppointmentError::NotFound)
    }

    /// Staff booking: confirmed on creation, `BEE-` booking code.
    pub async fn create(
        &self,
        request: CreateAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        if request.patient_name.trim().is_empty() {
            return Err(AppointmentError::ValidationError(
                "El nombre del paciente es obligatorio".to_string(),
            ));
        }

        let appointment = Appointment {
            id: Uuid::new_v4(),
            patient_id: request.patient_id,
            patient_name: request.patient_name,
            patient_phone: request.patient_phone.unwrap_or_default(),
            patient_dni: request.patient_dni,
            date: request.date,
            time: request.time,
            status: AppointmentStatus::Confirmed,
            sede_id: request.sede_id,
            professional_id: request.professional_id,
            booking_code: staff_booking_code(),
            notes: request.notes,
            company_id: self.company_id.clone(),
        };

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "Prefer",
            reqwest::header::HeaderValue::from_static("return=representation"),
        );

        let result: Vec<Appointment> = self
            .supabase
            .request_with_headers(
                Method::POST,
                "/rest/v1/appointments",
                None,
                Some(json!([appointment])),
                Some(headers),
            )
            .await
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))?;

        let created = result
            .into_iter()
            .next()
            .ok_or_else(|| AppointmentError::DatabaseError("Empty insert response".to_string()))?;

        info!(
            "Appointment {} booked with code {}",
            created.id, created.booking_code
        );
        Ok(created)
    }

    /// Plain PATCH of the editable fields. Concurrent staff edits are
    /// last-write-wins: no version token, no conflict detection.
    pub async fn update(
        &self,
        appointment_id: Uuid,
        request: UpdateAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        debug!("Updating appointment: {}", appointment_id);

        let current = self.get(appointment_id).await?;

        let mut update_data = serde_json::Map::new();
        if let Some(patient_name) = request.patient_name {
            update_data.insert("patient_name".to_string(), json!(patient_name));
        }
        if let Some(patient_phone) = request.patient_phone {
            update_data.insert("patient_phone".to_string(), json!(patient_phone));
        }
        if let Some(patient_dni) = request.patient_dni {
            update_data.insert("patient_dni".to_string(), json!(patient_dni));
        }
        if let Some(notes) = request.notes {
            update_data.insert("notes".to_string(), json!(notes));
        }
        if let Some(status) = request.status {
            self.lifecycle.note_transition(&current.status, &status);
            update_data.insert("status".to_string(), json!(status));
        }

        if update_data.is_empty() {
            return Ok(current);
        }

        let path = format!("/rest/v1/appointments?id=eq.{}", appointment_id);
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "Prefer",
            reqwest::header::HeaderValue::from_static("return=representation"),
        );

        let result: Vec<Appointment> = self
            .supabase
            .request_with_headers(
                Method::PATCH,
                &path,
                None,
                Some(Value::Object(update_data)),
                Some(headers),
            )
            .await
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))?;

        result.into_iter().next().ok_or(AppointmentError::NotFound)
    }
}
