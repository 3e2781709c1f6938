use serde::{Deserialize, Serialize};

/// Clinic branding row. The id is a text slug seeded by the hosted store
/// (e.g. `feet-care-main`), not a UUID.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    pub name: String,
    pub primary_color: Option<String>,
    pub logo: Option<String>,
    pub portal_hero: Option<String>,
}

impl Company {
    /// Branding used until the clinic configures its own.
    pub fn default_branding(company_id: &str) -> Self {
        Self {
            id: company_id.to_string(),
            name: "Feet Care".to_string(),
            primary_color: Some("#00BFA5".to_string()),
            logo: Some("https://i.ibb.co/L6VvS9Z/bee-logo.png".to_string()),
            portal_hero: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCompanyRequest {
    pub name: Option<String>,
    pub primary_color: Option<String>,
    pub logo: Option<String>,
    pub portal_hero: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum CompanyError {
    #[error("Company not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}
