use assert_matches::assert_matches;
use uuid::Uuid;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared_models::access::Role;
use staff_cell::models::{CreateUserRequest, StaffError, UpdateUserRequest};
use staff_cell::services::UserService;
use shared_config::AppConfig;

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

fn user_row(email: Option<&str>) -> serde_json::Value {
    serde_json::json!({
        "id": Uuid::new_v4(),
        "name": "Ana Torres",
        "email": email,
        "access_key": "ANA2024",
        "role": "RECEPCIONISTA",
        "sede_ids": [Uuid::new_v4()],
        "avatar": null,
        "company_id": "feet-care-main"
    })
}

fn create_request(email: Option<&str>) -> CreateUserRequest {
    CreateUserRequest {
        name: "Ana Torres".to_string(),
        email: email.map(str::to_string),
        access_key: Some("ANA2024".to_string()),
        role: Role::Receptionist,
        sede_ids: Some(vec![Uuid::new_v4()]),
        avatar: None,
    }
}

#[tokio::test]
async fn an_empty_email_is_stored_as_null() {
    let mock_server = MockServer::start().await;

    // The insert body must carry a null, never "".
    Mock::given(method("POST"))
        .and(path("/rest/v1/users"))
        .and(body_string_contains("\"email\":null"))
        .respond_with(ResponseTemplate::new(201).set_body_json(vec![user_row(None)]))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server.uri());
    let service = UserService::new(&config);

    let created = service.create(create_request(Some(""))).await.unwrap();
    assert_eq!(created.email, None);
}

#[tokio::test]
async fn a_duplicate_email_surfaces_the_spanish_conflict_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/users"))
        .respond_with(ResponseTemplate::new(409).set_body_string(
            "{\"code\":\"23505\",\"message\":\"duplicate key value violates unique constraint \\\"users_email_key\\\"\"}",
        ))
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server.uri());
    let service = UserService::new(&config);

    let err = service
        .create(create_request(Some("ana@clinic.pe")))
        .await
        .unwrap_err();

    assert_matches!(err, StaffError::EmailAlreadyRegistered { .. });
    let message = err.to_string();
    assert!(message.contains("ana@clinic.pe"));
    assert!(message.contains("ya está registrado"));
}

#[tokio::test]
async fn clearing_an_email_on_update_writes_null() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/users"))
        .and(body_string_contains("\"email\":null"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![user_row(None)]))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server.uri());
    let service = UserService::new(&config);

    let updated = service
        .update(
            Uuid::new_v4(),
            UpdateUserRequest {
                email: Some("   ".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.email, None);
}

#[tokio::test]
async fn a_duplicate_email_on_update_uses_the_in_use_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/users"))
        .respond_with(ResponseTemplate::new(409).set_body_string("23505"))
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server.uri());
    let service = UserService::new(&config);

    let err = service
        .update(
            Uuid::new_v4(),
            UpdateUserRequest {
                email: Some("ana@clinic.pe".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert!(err.to_string().contains("ya está en uso"));
}
