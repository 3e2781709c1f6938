use serde::{Deserialize, Serialize};

use shared_models::auth::User;

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub access_key: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthCellError {
    #[error("Ingresa tu clave de acceso")]
    MissingAccessKey,

    #[error("Clave de acceso incorrecta")]
    InvalidAccessKey,

    #[error("Database error: {0}")]
    DatabaseError(String),
}
