use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use reqwest::Method;
use serde_json::json;
use tracing::{debug, info};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;
use shared_utils::codes::plan_booking_code;

use crate::models::{
    Appointment, AppointmentError, AppointmentStatus, ProjectSessionsRequest,
    ScheduleSessionsRequest, SessionDraft,
};

pub const MAX_SESSIONS: u32 = 20;

/// Fallback reference time when the plan has no triggering appointment.
const DEFAULT_SESSION_TIME: (u32, u32) = (9, 0);

/// Project a treatment plan into follow-up visit drafts: session `i` lands
/// `i * frequency_days` after the start date, so session 1 is the nearest
/// future visit. Regeneration replaces the previous list wholesale.
///
/// Trusts its inputs; callers go through [`TreatmentPlanService::project`],
/// which rejects non-positive counts and frequencies.
pub fn project_sessions(
    start_date: NaiveDate,
    num_sessions: u32,
    frequency_days: u32,
    time: NaiveTime,
) -> Vec<SessionDraft> {
    (1..=num_sessions as i64)
        .map(|i| SessionDraft {
            id: Uuid::new_v4(),
            date: start_date + Duration::days(i * frequency_days as i64),
            time,
        })
        .collect()
}

pub struct TreatmentPlanService {
    supabase: SupabaseClient,
    company_id: String,
}

impl TreatmentPlanService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
            company_id: config.company_id.clone(),
        }
    }

    fn validate(num_sessions: u32, frequency_days: u32) -> Result<(), AppointmentError> {
        if num_sessions < 1 || num_sessions > MAX_SESSIONS {
            return Err(AppointmentError::ValidationError(format!(
                "La cantidad de sesiones debe estar entre 1 y {}",
                MAX_SESSIONS
            )));
        }
        if frequency_days < 1 {
            return Err(AppointmentError::ValidationError(
                "La frecuencia debe ser de al menos 1 día".to_string(),
            ));
        }
        Ok(())
    }

    /// Build the editable draft list. The reference time defaults to the
    /// triggering appointment's time when one is given.
    pub async fn project(
        &self,
        request: ProjectSessionsRequest,
    ) -> Result<Vec<SessionDraft>, AppointmentError> {
        Self::validate(request.num_sessions, request.frequency_days)?;

        let time = match (request.time, request.appointment_id) {
            (Some(time), _) => time,
            (None, Some(appointment_id)) => self.fetch_source(appointment_id).await?.time,
            (None, None) => {
                let (h, m) = DEFAULT_SESSION_TIME;
                NaiveTime::from_hms_opt(h, m, 0)
                    .ok_or_else(|| AppointmentError::ValidationError("Invalid time".to_string()))?
            }
        };
        let start_date = request
            .start_date
            .unwrap_or_else(|| Utc::now().date_naive());

        debug!(
            "Projecting {} sessions every {} days from {}",
            request.num_sessions, request.frequency_days, start_date
        );

        Ok(project_sessions(
            start_date,
            request.num_sessions,
            request.frequency_days,
            time,
        ))
    }

    /// Materialize the (possibly edited) drafts: each one becomes a
    /// confirmed appointment copying the source's patient snapshot, sede
    /// and professional, written to the store as a single batch.
    pub async fn schedule_sessions(
        &self,
        source: &Appointment,
        request: ScheduleSessionsRequest,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        if request.sessions.is_empty() {
            return Err(AppointmentError::ValidationError(
                "El plan no tiene sesiones por agendar".to_string(),
            ));
        }
        if request.sessions.len() > MAX_SESSIONS as usize {
            return Err(AppointmentError::ValidationError(format!(
                "La cantidad de sesiones debe estar entre 1 y {}",
                MAX_SESSIONS
            )));
        }

        let plan_started = request
            .plan_started
            .unwrap_or_else(|| Utc::now().date_naive());

        let appointments: Vec<Appointment> = request
            .sessions
            .iter()
            .map(|draft| Appointment {
                id: Uuid::new_v4(),
                patient_id: source.patient_id,
                patient_name: source.patient_name.clone(),
                patient_phone: source.patient_phone.clone(),
                patient_dni: source.patient_dni.clone(),
                date: draft.date,
                time: draft.time,
                status: AppointmentStatus::Confirmed,
                sede_id: source.sede_id,
                professional_id: source.professional_id,
                booking_code: plan_booking_code(),
                notes: Some(format!("Plan iniciado el {}", plan_started)),
                company_id: self.company_id.clone(),
            })
            .collect();

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "Prefer",
            reqwest::header::HeaderValue::from_static("return=representation"),
        );

        let created: Vec<Appointment> = self
            .supabase
            .request_with_headers(
                Method::POST,
                "/rest/v1/appointments",
                None,
                Some(json!(appointments)),
                Some(headers),
            )
            .await
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))?;

        info!(
            "Scheduled {} follow-up sessions for appointment {}",
            created.len(),
            source.id
        );
        Ok(created)
    }

    async fn fetch_source(&self, appointment_id: Uuid) -> Result<Appointment, AppointmentError> {
        let path = format!("/rest/v1/appointments?id=eq.{}", appointment_id);
        let result: Vec<Appointment> = self
            .supabase
            .request(Method::GET, &path, None, None)
            .await
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))?;

        result.into_iter().next().ok_or(AppointmentError::NotFound)
    }
}
