use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::debug;
use uuid::Uuid;

use shared_models::auth::{JwtClaims, JwtHeader, User};

type HmacSha256 = Hmac<Sha256>;

/// Issue a signed HS256 token for an access-code login.
pub fn sign_token(user: &User, jwt_secret: &str, ttl_hours: u64) -> Result<String, String> {
    if jwt_secret.is_empty() {
        return Err("JWT secret is not set".to_string());
    }

    let header = JwtHeader {
        alg: "HS256".to_string(),
        typ: "JWT".to_string(),
    };
    let now = Utc::now().timestamp() as u64;
    let claims = JwtClaims {
        sub: user.id.to_string(),
        name: user.name.clone(),
        email: user.email.clone(),
        role: user.role,
        sede_ids: user.sede_ids.clone(),
        iat: Some(now),
        exp: Some(now + ttl_hours * 3600),
    };

    let header_json =
        serde_json::to_vec(&header).map_err(|_| "Failed to encode header".to_string())?;
    let claims_json =
        serde_json::to_vec(&claims).map_err(|_| "Failed to encode claims".to_string())?;

    let signing_input = format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(header_json),
        URL_SAFE_NO_PAD.encode(claims_json)
    );

    let mut mac = HmacSha256::new_from_slice(jwt_secret.as_bytes())
        .map_err(|_| "Failed to create HMAC".to_string())?;
    mac.update(signing_input.as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    Ok(format!("{}.{}", signing_input, signature))
}

pub fn validate_token(token: &str, jwt_secret: &str) -> Result<User, String> {
    if jwt_secret.is_empty() {
        return Err("JWT secret is not set".to_string());
    }

    // Split token into parts
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err("Invalid token format".to_string());
    }

    let header_b64 = parts[0];
    let claims_b64 = parts[1];
    let signature_b64 = parts[2];

    let signature = match URL_SAFE_NO_PAD.decode(signature_b64) {
        Ok(sig) => sig,
        Err(e) => {
            debug!("Failed to decode signature: {}", e);
            return Err("Invalid signature encoding".to_string());
        }
    };

    let signing_input = format!("{}.{}", header_b64, claims_b64);

    let mut mac = match HmacSha256::new_from_slice(jwt_secret.as_bytes()) {
        Ok(m) => m,
        Err(_) => return Err("Failed to create HMAC".to_string()),
    };

    mac.update(signing_input.as_bytes());

    if mac.verify_slice(&signature).is_err() {
        debug!("Token signature verification failed");
        return Err("Invalid token signature".to_string());
    }

    // Decode claims
    let claims_json = match URL_SAFE_NO_PAD.decode(claims_b64) {
        Ok(bytes) => match String::from_utf8(bytes) {
            Ok(json_str) => json_str,
            Err(_) => return Err("Invalid claims encoding".to_string()),
        },
        Err(_) => return Err("Invalid claims encoding".to_string()),
    };

    let claims: JwtClaims = match serde_json::from_str(&claims_json) {
        Ok(c) => c,
        Err(e) => {
            debug!("Failed to parse claims: {}", e);
            return Err("Invalid claims format".to_string());
        }
    };

    // Check expiration
    if let Some(exp) = claims.exp {
        let now = Utc::now().timestamp() as u64;
        if exp < now {
            debug!("Token expired at {} (now: {})", exp, now);
            return Err("Token expired".to_string());
        }
    }

    let id = Uuid::parse_str(&claims.sub).map_err(|_| "Invalid subject claim".to_string())?;

    let user = User {
        id,
        name: claims.name,
        email: claims.email,
        role: claims.role,
        sede_ids: claims.sede_ids,
    };

    debug!("Token validated successfully for user: {}", user.id);
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_models::access::Role;

    fn test_user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Ana Torres".to_string(),
            email: Some("ana@clinic.pe".to_string()),
            role: Role::Receptionist,
            sede_ids: vec![Uuid::new_v4()],
        }
    }

    #[test]
    fn sign_then_validate_round_trips_claims() {
        let user = test_user();
        let token = sign_token(&user, "secret", 12).unwrap();
        let validated = validate_token(&token, "secret").unwrap();

        assert_eq!(validated.id, user.id);
        assert_eq!(validated.name, user.name);
        assert_eq!(validated.role, user.role);
        assert_eq!(validated.sede_ids, user.sede_ids);
    }

    #[test]
    fn rejects_wrong_secret() {
        let token = sign_token(&test_user(), "secret", 12).unwrap();
        assert!(validate_token(&token, "other").is_err());
    }

    #[test]
    fn rejects_garbage_tokens() {
        assert!(validate_token("not-a-token", "secret").is_err());
        assert!(validate_token("a.b", "secret").is_err());
    }
}
