use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::{
    CreateHistoryEntryRequest, HistoryError, SuggestDiagnosisRequest, SummarizeNotesRequest,
};
use crate::services::ai::SUMMARY_FALLBACK;
use crate::services::{AiAssistService, HistoryService};

fn map_error(err: HistoryError) -> AppError {
    match err {
        HistoryError::ValidationError(msg) => AppError::ValidationError(msg),
        HistoryError::DatabaseError(msg) => AppError::Database(msg),
    }
}

#[axum::debug_handler]
pub async fn save_history_entry(
    State(config): State<Arc<AppConfig>>,
    Extension(_user): Extension<User>,
    Path(patient_id): Path<Uuid>,
    Json(request): Json<CreateHistoryEntryRequest>,
) -> Result<Json<Value>, AppError> {
    let service = HistoryService::new(&config);

    let outcome = service
        .save_entry(patient_id, request)
        .await
        .map_err(map_error)?;

    Ok(Json(json!(outcome)))
}

/// Advisory call: failures degrade to an inline message, never an error
/// response.
#[axum::debug_handler]
pub async fn summarize_notes(
    State(config): State<Arc<AppConfig>>,
    Extension(_user): Extension<User>,
    Json(request): Json<SummarizeNotesRequest>,
) -> Result<Json<Value>, AppError> {
    if request.notes.trim().chars().count() < 10 {
        return Err(AppError::ValidationError(
            "Por favor ingrese más detalles para que el asistente pueda analizarlos.".to_string(),
        ));
    }

    let summary = match AiAssistService::new(&config) {
        Ok(service) => match service.summarize_clinical_notes(&request.notes).await {
            Ok(summary) => summary,
            Err(e) => {
                tracing::warn!("Gemini Error (Summarization): {}", e);
                SUMMARY_FALLBACK.to_string()
            }
        },
        Err(e) => {
            tracing::warn!("AI assistant unavailable: {}", e);
            SUMMARY_FALLBACK.to_string()
        }
    };

    Ok(Json(json!({ "summary": summary })))
}

/// Advisory call: failures degrade to a null suggestion.
#[axum::debug_handler]
pub async fn suggest_diagnosis(
    State(config): State<Arc<AppConfig>>,
    Extension(_user): Extension<User>,
    Json(request): Json<SuggestDiagnosisRequest>,
) -> Result<Json<Value>, AppError> {
    if request.findings.trim().chars().count() < 10 {
        return Err(AppError::ValidationError(
            "Por favor ingrese más detalles para que el asistente pueda analizarlos.".to_string(),
        ));
    }

    let suggestion = match AiAssistService::new(&config) {
        Ok(service) => match service.suggest_diagnosis(&request.findings).await {
            Ok(suggestion) => Some(suggestion),
            Err(e) => {
                tracing::warn!("Gemini Error (Diagnostic Suggestion): {}", e);
                None
            }
        },
        Err(e) => {
            tracing::warn!("AI assistant unavailable: {}", e);
            None
        }
    };

    Ok(Json(json!({ "suggestion": suggestion })))
}
