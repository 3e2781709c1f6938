use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, info};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::supabase::{ApiError, SupabaseClient};

use crate::models::{CreateUserRequest, StaffError, StaffUser, UpdateUserRequest};

/// An empty or whitespace-only email becomes null before the write: the
/// store's uniqueness constraint treats nulls as distinct, empty strings
/// as equal.
pub fn normalize_email(email: Option<&str>) -> Option<String> {
    email.and_then(|e| {
        let trimmed = e.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

pub struct UserService {
    supabase: SupabaseClient,
    company_id: String,
}

impl UserService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
            company_id: config.company_id.clone(),
        }
    }

    pub async fn list(&self) -> Result<Vec<StaffUser>, StaffError> {
        debug!("Fetching users");

        let result: Vec<StaffUser> = self
            .supabase
            .request(Method::GET, "/rest/v1/users?order=name.asc", None, None)
            .await
            .map_err(|e| StaffError::DatabaseError(e.to_string()))?;

        Ok(result)
    }

    pub async fn create(&self, request: CreateUserRequest) -> Result<StaffUser, StaffError> {
        if request.name.trim().is_empty() {
            return Err(StaffError::ValidationError(
                "El nombre es obligatorio".to_string(),
            ));
        }

        let email = normalize_email(request.email.as_deref());
        let user = StaffUser {
            id: Uuid::new_v4(),
            name: request.name,
            email: email.clone(),
            access_key: request.access_key,
            role: request.role,
            sede_ids: request.sede_ids.unwrap_or_default(),
            avatar: request.avatar,
            company_id: self.company_id.clone(),
        };

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "Prefer",
            reqwest::header::HeaderValue::from_static("return=representation"),
        );

        let result: Result<Vec<StaffUser>, _> = self
            .supabase
            .request_with_headers(
                Method::POST,
                "/rest/v1/users",
                None,
                Some(json!([user])),
                Some(headers),
            )
            .await;

        let result = result.map_err(|e| {
            if is_unique_violation(&e) {
                StaffError::EmailAlreadyRegistered {
                    email: email.clone().unwrap_or_default(),
                }
            } else {
                StaffError::DatabaseError(e.to_string())
            }
        })?;

        let created = result
            .into_iter()
            .next()
            .ok_or_else(|| StaffError::DatabaseError("Empty insert response".to_string()))?;

        info!("User {} created", created.id);
        Ok(created)
    }

    pub async fn update(
        &self,
        user_id: Uuid,
        request: UpdateUserRequest,
    ) -> Result<StaffUser, StaffError> {
        debug!("Updating user: {}", user_id);

        let mut update_data = serde_json::Map::new();
        if let Some(name) = request.name {
            update_data.insert("name".to_string(), json!(name));
        }

        // The email field is always rewritten when provided, normalized so
        // an emptied input lands as null rather than "".
        let normalized = normalize_email(request.email.as_deref());
        if request.email.is_some() {
            update_data.insert(
                "email".to_string(),
                normalized.clone().map(Value::String).unwrap_or(Value::Null),
            );
        }
        if let Some(access_key) = request.access_key {
            update_data.insert("access_key".to_string(), json!(access_key));
        }
        if let Some(role) = request.role {
            update_data.insert("role".to_string(), json!(role));
        }
        if let Some(sede_ids) = request.sede_ids {
            update_data.insert("sede_ids".to_string(), json!(sede_ids));
        }
        if let Some(avatar) = request.avatar {
            update_data.insert("avatar".to_string(), json!(avatar));
        }

        if update_data.is_empty() {
            return self.get(user_id).await;
        }

        let path = format!("/rest/v1/users?id=eq.{}", user_id);
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "Prefer",
            reqwest::header::HeaderValue::from_static("return=representation"),
        );

        let result: Result<Vec<StaffUser>, _> = self
            .supabase
            .request_with_headers(
                Method::PATCH,
                &path,
                None,
                Some(Value::Object(update_data)),
                Some(headers),
            )
            .await;

        let result = result.map_err(|e| {
            if is_unique_violation(&e) {
                StaffError::EmailInUse {
                    email: normalized.clone().unwrap_or_default(),
                }
            } else {
                StaffError::DatabaseError(e.to_string())
            }
        })?;

        result.into_iter().next().ok_or(StaffError::NotFound)
    }

    async fn get(&self, user_id: Uuid) -> Result<StaffUser, StaffError> {
        let path = format!("/rest/v1/users?id=eq.{}", user_id);
        let result: Vec<StaffUser> = self
            .supabase
            .request(Method::GET, &path, None, None)
            .await
            .map_err(|e| StaffError::DatabaseError(e.to_string()))?;

        result.into_iter().next().ok_or(StaffError::NotFound)
    }
}

fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<ApiError>()
        .map(ApiError::is_unique_violation)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_blank_emails_become_null() {
        assert_eq!(normalize_email(Some("")), None);
        assert_eq!(normalize_email(Some("   ")), None);
        assert_eq!(normalize_email(None), None);
    }

    #[test]
    fn emails_are_trimmed() {
        assert_eq!(
            normalize_email(Some("  ana@clinic.pe ")),
            Some("ana@clinic.pe".to_string())
        );
    }
}
