use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use appointment_cell::models::{
    AppointmentSearchQuery, AppointmentStatus, CreateAppointmentRequest, UpdateAppointmentRequest,
};
use appointment_cell::services::AppointmentService;
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

fn appointment_row(id: Uuid, status: &str, booking_code: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "patient_id": null,
        "patient_name": "Jorge Paredes",
        "patient_phone": "+51912345678",
        "patient_dni": "87654321",
        "date": "2024-06-01",
        "time": "11:00",
        "status": status,
        "sede_id": Uuid::new_v4(),
        "professional_id": null,
        "booking_code": booking_code,
        "notes": null,
        "company_id": "feet-care-main"
    })
}

#[tokio::test]
async fn search_filters_by_status_on_the_wire() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("status", "eq.POR CONFIRMAR"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![appointment_row(
            Uuid::new_v4(),
            "POR CONFIRMAR",
            "WEB-AB12C",
        )]))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server.uri());
    let service = AppointmentService::new(&config);

    let appointments = service
        .search(AppointmentSearchQuery {
            status: Some(AppointmentStatus::Pending),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(appointments.len(), 1);
    assert_eq!(appointments[0].status, AppointmentStatus::Pending);
}

#[tokio::test]
async fn staff_create_books_a_confirmed_appointment_with_a_bee_code() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/appointments"))
        .and(body_string_contains("CONFIRMADO"))
        .and(body_string_contains("BEE-"))
        .respond_with(ResponseTemplate::new(201).set_body_json(vec![appointment_row(
            Uuid::new_v4(),
            "CONFIRMADO",
            "BEE-X9Y8Z",
        )]))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server.uri());
    let service = AppointmentService::new(&config);

    let created = service
        .create(CreateAppointmentRequest {
            patient_name: "Jorge Paredes".to_string(),
            patient_phone: None,
            patient_dni: Some("87654321".to_string()),
            patient_id: None,
            sede_id: Uuid::new_v4(),
            professional_id: None,
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            notes: None,
        })
        .await
        .unwrap();

    assert_eq!(created.status, AppointmentStatus::Confirmed);
    assert!(created.booking_code.starts_with("BEE-"));
}

#[tokio::test]
async fn update_patches_only_the_provided_fields() {
    let mock_server = MockServer::start().await;
    let id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![appointment_row(
            id,
            "CONFIRMADO",
            "BEE-X9Y8Z",
        )]))
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/appointments"))
        .and(body_string_contains("ATENDIDO"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![appointment_row(
            id,
            "ATENDIDO",
            "BEE-X9Y8Z",
        )]))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server.uri());
    let service = AppointmentService::new(&config);

    let updated = service
        .update(
            id,
            UpdateAppointmentRequest {
                status: Some(AppointmentStatus::Attended),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.status, AppointmentStatus::Attended);
}
