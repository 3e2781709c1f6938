use reqwest::Method;
use tracing::{debug, info};

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;
use shared_models::auth::User;
use staff_cell::models::StaffUser;

use crate::models::AuthCellError;

/// Static access-code login. Codes match case-insensitively against
/// `users.access_key`; there is no password and no hashing.
pub struct AccessCodeService {
    supabase: SupabaseClient,
}

impl AccessCodeService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    pub async fn authenticate(&self, access_key: &str) -> Result<User, AuthCellError> {
        let code = access_key.trim().to_uppercase();
        if code.is_empty() {
            return Err(AuthCellError::MissingAccessKey);
        }

        debug!("Looking up access key");

        // ilike without wildcards is a case-insensitive exact match.
        let path = format!(
            "/rest/v1/users?access_key=ilike.{}&limit=1",
            urlencoding::encode(&code)
        );
        let result: Vec<StaffUser> = self
            .supabase
            .request(Method::GET, &path, None, None)
            .await
            .map_err(|e| AuthCellError::DatabaseError(e.to_string()))?;

        let staff = result
            .into_iter()
            .next()
            .ok_or(AuthCellError::InvalidAccessKey)?;

        info!("Access-code login for user {}", staff.id);

        Ok(User {
            id: staff.id,
            name: staff.name,
            email: staff.email,
            role: staff.role,
            sede_ids: staff.sede_ids,
        })
    }
}
