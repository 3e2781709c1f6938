use reqwest::Method;
use serde_json::json;
use tracing::{debug, info};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{CreateProfessionalRequest, Professional, StaffError};

pub struct ProfessionalService {
    supabase: SupabaseClient,
    company_id: String,
}

impl ProfessionalService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
            company_id: config.company_id.clone(),
        }
    }

    pub async fn list(&self) -> Result<Vec<Professional>, StaffError> {
        debug!("Fetching professionals");

        let result: Vec<Professional> = self
            .supabase
            .request(
                Method::GET,
                "/rest/v1/professionals?order=name.asc",
                None,
                None,
            )
            .await
            .map_err(|e| StaffError::DatabaseError(e.to_string()))?;

        Ok(result)
    }

    pub async fn create(
        &self,
        request: CreateProfessionalRequest,
    ) -> Result<Professional, StaffError> {
        if request.name.trim().is_empty() || request.specialty.trim().is_empty() {
            return Err(StaffError::ValidationError(
                "Nombre y especialidad son obligatorios".to_string(),
            ));
        }

        let professional = Professional {
            id: Uuid::new_v4(),
            name: request.name,
            specialty: request.specialty,
            avatar: request.avatar,
            sede_ids: request.sede_ids.unwrap_or_default(),
            user_id: request.user_id,
            company_id: self.company_id.clone(),
        };

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "Prefer",
            reqwest::header::HeaderValue::from_static("return=representation"),
        );

        let result: Vec<Professional> = self
            .supabase
            .request_with_headers(
                Method::POST,
                "/rest/v1/professionals",
                None,
                Some(json!([professional])),
                Some(headers),
            )
            .await
            .map_err(|e| StaffError::DatabaseError(e.to_string()))?;

        let created = result
            .into_iter()
            .next()
            .ok_or_else(|| StaffError::DatabaseError("Empty insert response".to_string()))?;

        info!("Professional {} created", created.id);
        Ok(created)
    }
}
