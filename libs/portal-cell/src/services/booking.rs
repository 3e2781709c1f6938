use reqwest::Method;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use appointment_cell::models::{Appointment, AppointmentStatus};
use company_cell::services::CompanyService;
use patient_cell::models::CreatePatientRequest;
use patient_cell::services::PatientService;
use sede_cell::models::Sede;
use sede_cell::services::SedeService;
use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;
use shared_utils::codes::portal_booking_code;

use crate::models::{
    PortalBookingRequest, PortalBookingResponse, PortalError, DEFAULT_COUNTRY_CODE,
};

pub fn phone_digits(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Gate mirrored from the portal UI: a booking needs a real name and a
/// 9-digit local phone number before anything is written.
pub fn validate_booking(request: &PortalBookingRequest) -> Result<(), PortalError> {
    if request.patient_name.trim().chars().count() < 3 {
        return Err(PortalError::ValidationError(
            "El nombre debe tener al menos 3 caracteres".to_string(),
        ));
    }
    if phone_digits(&request.patient_phone).len() != 9 {
        return Err(PortalError::ValidationError(
            "El teléfono debe tener 9 dígitos".to_string(),
        ));
    }
    Ok(())
}

pub struct PortalBookingService {
    supabase: SupabaseClient,
    patient_service: PatientService,
    sede_service: SedeService,
    company_service: CompanyService,
    company_id: String,
}

impl PortalBookingService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
            patient_service: PatientService::new(config),
            sede_service: SedeService::new(config),
            company_service: CompanyService::new(config),
            company_id: config.company_id.clone(),
        }
    }

    /// A portal booking is two sequential writes with no transaction: the
    /// patient row first, then the appointment. The appointment failing
    /// after the patient landed is logged and surfaced; nothing is rolled
    /// back.
    pub async fn book(
        &self,
        request: PortalBookingRequest,
    ) -> Result<PortalBookingResponse, PortalError> {
        validate_booking(&request)?;

        let sede = self
            .sede_service
            .get(request.sede_id)
            .await
            .map_err(|_| PortalError::SedeNotFound)?;

        let country_code = request
            .country_code
            .clone()
            .unwrap_or_else(|| DEFAULT_COUNTRY_CODE.to_string());
        let full_phone = format!("{}{}", country_code, phone_digits(&request.patient_phone));

        let patient = self
            .patient_service
            .create(CreatePatientRequest {
                name: request.patient_name.clone(),
                phone: full_phone.clone(),
                email: request.patient_email.clone(),
                document_id: request.patient_dni.clone(),
                birth_date: None,
            })
            .await
            .map_err(|e| PortalError::DatabaseError(e.to_string()))?;

        let appointment_id = Uuid::new_v4();
        let appointment = Appointment {
            id: appointment_id,
            patient_id: Some(patient.id),
            patient_name: request.patient_name.clone(),
            patient_phone: full_phone,
            patient_dni: request.patient_dni.clone(),
            date: request.date,
            time: request.time,
            status: AppointmentStatus::Pending,
            sede_id: sede.id,
            professional_id: None,
            booking_code: portal_booking_code(appointment_id),
            notes: None,
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
            .map_err(|e| {
                warn!(
                    "Portal booking: patient {} was created but the appointment write failed: {}",
                    patient.id, e
                );
                PortalError::DatabaseError(e.to_string())
            })?;

        let created = result
            .into_iter()
            .next()
            .ok_or_else(|| PortalError::DatabaseError("Empty insert response".to_string()))?;

        let whatsapp_url = self.whatsapp_url(&sede, &created).await;

        info!(
            "Portal booking {} created for sede {}",
            created.booking_code, sede.id
        );

        Ok(PortalBookingResponse {
            appointment: created,
            patient_id: patient.id,
            whatsapp_url,
        })
    }

    /// Confirmation link the visitor opens to announce the booking on
    /// WhatsApp. Branding failures fall back to the default name; the link
    /// is a courtesy, not part of the booking.
    async fn whatsapp_url(&self, sede: &Sede, appointment: &Appointment) -> String {
        let company_name = match self.company_service.get_or_default().await {
            Ok(company) => company.name,
            Err(e) => {
                warn!("Branding lookup failed for confirmation link: {}", e);
                "la clínica".to_string()
            }
        };

        let digits = phone_digits(&sede.whatsapp);
        let number = if digits.is_empty() {
            "51900000000".to_string()
        } else {
            digits
        };

        let message = format!(
            "Hola! Reservé una cita en {}:\n\n👤 *Nombre:* {}\n📍 *Sede:* {}\n📅 *Fecha:* {}\n⏰ *Hora:* {}\n\nEspero confirmación!",
            company_name,
            appointment.patient_name,
            sede.name,
            appointment.date,
            appointment.time.format("%H:%M"),
        );

        format!(
            "https://wa.me/{}?text={}",
            number,
            urlencoding::encode(&message)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn request(name: &str, phone: &str) -> PortalBookingRequest {
        PortalBookingRequest {
            sede_id: Uuid::new_v4(),
            patient_name: name.to_string(),
            patient_phone: phone.to_string(),
            patient_email: None,
            patient_dni: None,
            country_code: None,
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        }
    }

    #[test]
    fn accepts_a_complete_booking() {
        assert!(validate_booking(&request("María Quispe", "987 654 321")).is_ok());
    }

    #[test]
    fn rejects_short_names() {
        assert!(validate_booking(&request("Ma", "987654321")).is_err());
    }

    #[test]
    fn rejects_phones_without_nine_digits() {
        assert!(validate_booking(&request("María Quispe", "98765432")).is_err());
        assert!(validate_booking(&request("María Quispe", "9876543210")).is_err());
    }

    #[test]
    fn strips_formatting_from_phones() {
        assert_eq!(phone_digits("+51 987-654-321"), "51987654321");
    }
}
