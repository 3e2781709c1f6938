use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_models::access::{AccessScope, Role, SedeScoped};

/// A staff account row. `access_key` is the static login code; `email` is
/// unique in the store when non-null.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffUser {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub access_key: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub sede_ids: Vec<Uuid>,
    pub avatar: Option<String>,
    pub company_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Professional {
    pub id: Uuid,
    pub name: String,
    pub specialty: String,
    pub avatar: Option<String>,
    #[serde(default)]
    pub sede_ids: Vec<Uuid>,
    pub user_id: Option<Uuid>,
    pub company_id: String,
}

impl SedeScoped for Professional {
    fn visible_to(&self, scope: &AccessScope) -> bool {
        scope.sees_every_sede() || self.sede_ids.iter().any(|id| scope.can_access_sede(*id))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: Option<String>,
    pub access_key: Option<String>,
    pub role: Role,
    pub sede_ids: Option<Vec<Uuid>>,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub access_key: Option<String>,
    pub role: Option<Role>,
    pub sede_ids: Option<Vec<Uuid>>,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProfessionalRequest {
    pub name: String,
    pub specialty: String,
    pub avatar: Option<String>,
    pub sede_ids: Option<Vec<Uuid>>,
    pub user_id: Option<Uuid>,
}

#[derive(Debug, thiserror::Error)]
pub enum StaffError {
    #[error("El correo \"{email}\" ya está registrado por otro usuario. Por favor usa uno distinto.")]
    EmailAlreadyRegistered { email: String },

    #[error("El correo \"{email}\" ya está en uso por otro usuario.")]
    EmailInUse { email: String },

    #[error("User not found")]
    NotFound,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
