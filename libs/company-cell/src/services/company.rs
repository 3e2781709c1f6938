use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, info};

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{Company, CompanyError, UpdateCompanyRequest};

pub struct CompanyService {
    supabase: SupabaseClient,
    company_id: String,
}

impl CompanyService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
            company_id: config.company_id.clone(),
        }
    }

    /// Branding lookup, falling back to the built-in default when the
    /// table has no row yet.
    pub async fn get_or_default(&self) -> Result<Company, CompanyError> {
        debug!("Fetching company config: {}", self.company_id);

        let path = format!(
            "/rest/v1/companies?id=eq.{}",
            urlencoding::encode(&self.company_id)
        );
        let result: Vec<Company> = self
            .supabase
            .request(Method::GET, &path, None, None)
            .await
            .map_err(|e| CompanyError::DatabaseError(e.to_string()))?;

        Ok(result
            .into_iter()
            .next()
            .unwrap_or_else(|| Company::default_branding(&self.company_id)))
    }

    pub async fn update(&self, request: UpdateCompanyRequest) -> Result<Company, CompanyError> {
        debug!("Updating company config: {}", self.company_id);

        let mut update_data = serde_json::Map::new();
        if let Some(name) = request.name {
            update_data.insert("name".to_string(), json!(name));
        }
        if let Some(primary_color) = request.primary_color {
            update_data.insert("primary_color".to_string(), json!(primary_color));
        }
        if let Some(logo) = request.logo {
            update_data.insert("logo".to_string(), json!(logo));
        }
        if let Some(portal_hero) = request.portal_hero {
            update_data.insert("portal_hero".to_string(), json!(portal_hero));
        }

        if update_data.is_empty() {
            return self.get_or_default().await;
        }

        let path = format!(
            "/rest/v1/companies?id=eq.{}",
            urlencoding::encode(&self.company_id)
        );
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "Prefer",
            reqwest::header::HeaderValue::from_static("return=representation"),
        );

        let result: Vec<Company> = self
            .supabase
            .request_with_headers(
                Method::PATCH,
                &path,
                None,
                Some(Value::Object(update_data)),
                Some(headers),
            )
            .await
            .map_err(|e| CompanyError::DatabaseError(e.to_string()))?;

        let updated = result.into_iter().next().ok_or(CompanyError::NotFound)?;

        info!("Company branding updated");
        Ok(updated)
    }
}
