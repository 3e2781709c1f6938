use assert_matches::assert_matches;
use uuid::Uuid;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use auth_cell::models::AuthCellError;
use auth_cell::services::AccessCodeService;
use shared_config::AppConfig;
use shared_models::access::Role;
use shared_utils::jwt::{sign_token, validate_token};

fn test_config(base_url: &str) -> AppConfig {
    AppConfig {
        supabase_url: base_url.to_string(),
        supabase_anon_key: "test-anon-key".to_string(),
        jwt_secret: "test-secret".to_string(),
        gemini_api_key: String::new(),
        gemini_base_url: String::new(),
        company_id: "feet-care-main".to_string(),
    }
}

fn user_row(sede_id: Uuid) -> serde_json::Value {
    serde_json::json!({
        "id": Uuid::new_v4(),
        "name": "Ana Torres",
        "email": "ana@clinic.pe",
        "access_key": "ANA2024",
        "role": "RECEPCIONISTA",
        "sede_ids": [sede_id],
        "avatar": null,
        "company_id": "feet-care-main"
    })
}

#[tokio::test]
async fn a_known_code_logs_in_case_insensitively() {
    let mock_server = MockServer::start().await;
    let sede_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .and(query_param("access_key", "ilike.ANA2024"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![user_row(sede_id)]))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server.uri());
    let service = AccessCodeService::new(&config);

    // Lowercase input is uppercased before the lookup.
    let user = service.authenticate("  ana2024 ").await.unwrap();

    assert_eq!(user.name, "Ana Torres");
    assert_eq!(user.role, Role::Receptionist);
    assert_eq!(user.sede_ids, vec![sede_id]);

    // The issued token carries the same claims back through validation.
    let token = sign_token(&user, &config.jwt_secret, 12).unwrap();
    let validated = validate_token(&token, &config.jwt_secret).unwrap();
    assert_eq!(validated.id, user.id);
    assert_eq!(validated.sede_ids, user.sede_ids);
}

#[tokio::test]
async fn an_unknown_code_is_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Vec::<serde_json::Value>::new()))
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server.uri());
    let service = AccessCodeService::new(&config);

    let result = service.authenticate("WRONG").await;
    assert_matches!(result, Err(AuthCellError::InvalidAccessKey));
}

#[tokio::test]
async fn an_empty_code_never_reaches_the_store() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Vec::<serde_json::Value>::new()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server.uri());
    let service = AccessCodeService::new(&config);

    let result = service.authenticate("   ").await;
    assert_matches!(result, Err(AuthCellError::MissingAccessKey));
}
