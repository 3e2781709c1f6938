use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::access::Role;

#[derive(Debug, Serialize, Deserialize)]
pub struct JwtHeader {
    pub alg: String,
    pub typ: String,
}

/// Claims carried by the self-issued access-code tokens.
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub name: String,
    pub email: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub sede_ids: Vec<Uuid>,
    pub exp: Option<u64>,
    pub iat: Option<u64>,
}

/// The authenticated staff member, inserted into request extensions by the
/// auth middleware.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub sede_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub valid: bool,
    pub user_id: Uuid,
    pub email: Option<String>,
    pub role: Role,
}
