use chrono::NaiveDate;
use uuid::Uuid;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use clinical_record_cell::models::{CreateHistoryEntryRequest, HistoryError};
use clinical_record_cell::services::HistoryService;
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

fn entry_request(appointment_id: Option<Uuid>) -> CreateHistoryEntryRequest {
    CreateHistoryEntryRequest {
        diagnosis: "Onicocriptosis bilateral leve".to_string(),
        notes: "Paciente presenta dolor al caminar.".to_string(),
        recommendations: Some("Curaciones cada 7 días".to_string()),
        professional_id: Some(Uuid::new_v4()),
        appointment_id,
        date: Some(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()),
    }
}

fn entry_row(patient_id: Uuid, appointment_id: Option<Uuid>) -> serde_json::Value {
    serde_json::json!({
        "id": Uuid::new_v4(),
        "patient_id": patient_id,
        "date": "2024-06-01",
        "professional_id": Uuid::new_v4(),
        "diagnosis": "Onicocriptosis bilateral leve",
        "notes": "Paciente presenta dolor al caminar.",
        "recommendations": "Curaciones cada 7 días",
        "appointment_id": appointment_id
    })
}

#[tokio::test]
async fn saving_a_linked_entry_marks_the_appointment_attended() {
    let mock_server = MockServer::start().await;
    let patient_id = Uuid::new_v4();
    let appointment_id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path("/rest/v1/clinical_history"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(vec![entry_row(patient_id, Some(appointment_id))]),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    // The secondary step targets exactly the linked appointment.
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("id", format!("eq.{}", appointment_id)))
        .and(body_string_contains("ATENDIDO"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server.uri());
    let service = HistoryService::new(&config);

    let outcome = service
        .save_entry(patient_id, entry_request(Some(appointment_id)))
        .await
        .unwrap();

    assert_eq!(outcome.appointment_marked_attended, Some(true));
    assert_eq!(outcome.entry.patient_id, patient_id);
}

#[tokio::test]
async fn a_failed_status_write_keeps_the_entry_and_reports_it() {
    let mock_server = MockServer::start().await;
    let patient_id = Uuid::new_v4();
    let appointment_id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path("/rest/v1/clinical_history"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(vec![entry_row(patient_id, Some(appointment_id))]),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(500).set_body_string("storage exploded"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server.uri());
    let service = HistoryService::new(&config);

    let outcome = service
        .save_entry(patient_id, entry_request(Some(appointment_id)))
        .await
        .unwrap();

    // The clinical record survives; the caller learns the flag was not set.
    assert_eq!(outcome.appointment_marked_attended, Some(false));
}

#[tokio::test]
async fn an_unlinked_entry_touches_no_appointment() {
    let mock_server = MockServer::start().await;
    let patient_id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path("/rest/v1/clinical_history"))
        .respond_with(ResponseTemplate::new(201).set_body_json(vec![entry_row(patient_id, None)]))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server.uri());
    let service = HistoryService::new(&config);

    let outcome = service
        .save_entry(patient_id, entry_request(None))
        .await
        .unwrap();

    assert_eq!(outcome.appointment_marked_attended, None);
}

#[tokio::test]
async fn diagnosis_and_notes_are_required_before_any_write() {
    let config = test_config("http://localhost:1");
    let service = HistoryService::new(&config);

    let mut request = entry_request(None);
    request.diagnosis = "  ".to_string();

    let result = service.save_entry(Uuid::new_v4(), request).await;
    assert!(matches!(result, Err(HistoryError::ValidationError(_))));
}
