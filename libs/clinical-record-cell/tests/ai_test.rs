use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use clinical_record_cell::services::AiAssistService;
use shared_config::AppConfig;

fn ai_config(base_url: &str) -> AppConfig {
    AppConfig {
        supabase_url: "http://localhost:1".to_string(),
        supabase_anon_key: "test-anon-key".to_string(),
        jwt_secret: "test-secret".to_string(),
        gemini_api_key: "test-gemini-key".to_string(),
        gemini_base_url: base_url.to_string(),
        company_id: "feet-care-main".to_string(),
    }
}

fn gemini_text_response(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": {
                "parts": [{ "text": text }]
            }
        }]
    })
}

#[tokio::test]
async fn summarize_returns_the_trimmed_model_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(
            "/v1beta/models/gemini-3-flash-preview:generateContent",
        ))
        .and(body_string_contains("notas clínicas"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_text_response(
            "  Resumen: uña encarnada, se recomienda curación semanal.  ",
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ai_config(&mock_server.uri());
    let service = AiAssistService::new(&config).unwrap();

    let summary = service
        .summarize_clinical_notes("Paciente presenta dolor en el primer dedo del pie derecho")
        .await
        .unwrap();

    assert_eq!(
        summary,
        "Resumen: uña encarnada, se recomienda curación semanal."
    );
}

#[tokio::test]
async fn suggest_parses_the_structured_json_payload() {
    let mock_server = MockServer::start().await;

    let structured = serde_json::json!({
        "suggestions": ["Onicocriptosis", "Onicomicosis"],
        "recommendedService": "Podología clínica",
        "rationale": "Hallazgos compatibles con uña encarnada."
    });

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-3-pro-preview:generateContent"))
        .and(body_string_contains("hallazgos clínicos"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(gemini_text_response(&structured.to_string())),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ai_config(&mock_server.uri());
    let service = AiAssistService::new(&config).unwrap();

    let suggestion = service
        .suggest_diagnosis("Dolor y enrojecimiento en el borde ungueal")
        .await
        .unwrap();

    assert_eq!(
        suggestion.suggestions,
        vec!["Onicocriptosis", "Onicomicosis"]
    );
    assert_eq!(suggestion.recommended_service, "Podología clínica");
    assert!(suggestion.rationale.is_some());
}

#[tokio::test]
async fn upstream_failures_surface_as_errors_for_the_degrade_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(
            "/v1beta/models/gemini-3-flash-preview:generateContent",
        ))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
        .mount(&mock_server)
        .await;

    let config = ai_config(&mock_server.uri());
    let service = AiAssistService::new(&config).unwrap();

    let result = service.summarize_clinical_notes("Notas de prueba largas").await;
    assert!(result.is_err());
}

#[tokio::test]
async fn construction_fails_without_an_api_key() {
    let mut config = ai_config("http://localhost:1");
    config.gemini_api_key = String::new();

    assert!(AiAssistService::new(&config).is_err());
}
