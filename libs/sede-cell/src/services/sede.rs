use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, info};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{
    default_availability, AvailabilityMap, CreateSedeRequest, Sede, SedeError, UpdateSedeRequest,
};

pub struct SedeService {
    supabase: SupabaseClient,
    company_id: String,
}

impl SedeService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
            company_id: config.company_id.clone(),
        }
    }

    pub async fn list(&self) -> Result<Vec<Sede>, SedeError> {
        debug!("Fetching sedes");

        let result: Vec<Sede> = self
            .supabase
            .request(Method::GET, "/rest/v1/sedes?order=name.asc", None, None)
            .await
            .map_err(|e| SedeError::DatabaseError(e.to_string()))?;

        Ok(result)
    }

    pub async fn get(&self, sede_id: Uuid) -> Result<Sede, SedeError> {
        let path = format!("/rest/v1/sedes?id=eq.{}", sede_id);
        let result: Vec<Sede> = self
            .supabase
            .request(Method::GET, &path, None, None)
            .await
            .map_err(|e| SedeError::DatabaseError(e.to_string()))?;

        result.into_iter().next().ok_or(SedeError::NotFound)
    }

    pub async fn create(&self, request: CreateSedeRequest) -> Result<Sede, SedeError> {
        if request.name.trim().is_empty() {
            return Err(SedeError::ValidationError(
                "El nombre de la sede es obligatorio".to_string(),
            ));
        }
        if let Some(map) = &request.availability {
            Self::validate_availability(map)?;
        }

        let sede = Sede {
            id: Uuid::new_v4(),
            name: request.name,
            address: request.address,
            phone: request.phone,
            whatsapp: request.whatsapp,
            availability: Some(request.availability.unwrap_or_else(default_availability)),
            company_id: self.company_id.clone(),
        };

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "Prefer",
            reqwest::header::HeaderValue::from_static("return=representation"),
        );

        let result: Vec<Sede> = self
            .supabase
            .request_with_headers(
                Method::POST,
                "/rest/v1/sedes",
                None,
                Some(json!([sede])),
                Some(headers),
            )
            .await
            .map_err(|e| SedeError::DatabaseError(e.to_string()))?;

        let created = result
            .into_iter()
            .next()
            .ok_or_else(|| SedeError::DatabaseError("Empty insert response".to_string()))?;

        info!("Sede {} created", created.id);
        Ok(created)
    }

    pub async fn update(
        &self,
        sede_id: Uuid,
        request: UpdateSedeRequest,
    ) -> Result<Sede, SedeError> {
        debug!("Updating sede: {}", sede_id);

        let mut update_data = serde_json::Map::new();
        if let Some(name) = request.name {
            update_data.insert("name".to_string(), json!(name));
        }
        if let Some(address) = request.address {
            update_data.insert("address".to_string(), json!(address));
        }
        if let Some(phone) = request.phone {
            update_data.insert("phone".to_string(), json!(phone));
        }
        if let Some(whatsapp) = request.whatsapp {
            update_data.insert("whatsapp".to_string(), json!(whatsapp));
        }
        if let Some(availability) = request.availability {
            Self::validate_availability(&availability)?;
            update_data.insert("availability".to_string(), json!(availability));
        }

        if update_data.is_empty() {
            return self.get(sede_id).await;
        }

        let path = format!("/rest/v1/sedes?id=eq.{}", sede_id);
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "Prefer",
            reqwest::header::HeaderValue::from_static("return=representation"),
        );

        let result: Vec<Sede> = self
            .supabase
            .request_with_headers(
                Method::PATCH,
                &path,
                None,
                Some(Value::Object(update_data)),
                Some(headers),
            )
            .await
            .map_err(|e| SedeError::DatabaseError(e.to_string()))?;

        result.into_iter().next().ok_or(SedeError::NotFound)
    }

    fn validate_availability(map: &AvailabilityMap) -> Result<(), SedeError> {
        for (day, config) in map {
            for interval in &config.intervals {
                if interval.start >= interval.end {
                    return Err(SedeError::ValidationError(format!(
                        "Intervalo inválido en {}: la hora de inicio debe ser anterior a la de fin",
                        day
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayAvailability, TimeInterval};
    use chrono::NaiveTime;

    #[test]
    fn rejects_inverted_intervals() {
        let mut map = AvailabilityMap::new();
        map.insert(
            "Lunes".to_string(),
            DayAvailability {
                is_open: true,
                intervals: vec![TimeInterval {
                    start: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
                    end: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                }],
            },
        );

        assert!(SedeService::validate_availability(&map).is_err());
    }

    #[test]
    fn accepts_the_default_schedule() {
        assert!(SedeService::validate_availability(&default_availability()).is_ok());
    }
}
