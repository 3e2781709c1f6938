use anyhow::{anyhow, Result};
use reqwest::{header, Client};
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;

use crate::models::DiagnosisSuggestion;

const SUMMARY_MODEL: &str = "gemini-3-flash-preview";
const SUGGEST_MODEL: &str = "gemini-3-pro-preview";

/// Inline message shown in place of a summary when the assistant is down.
pub const SUMMARY_FALLBACK: &str = "Error de conexión con el asistente de IA.";

/// Advisory-only client for the generative-language API. Nothing here is
/// allowed to block the clinical workflow: handlers degrade failures to an
/// inline message or null.
pub struct AiAssistService {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl AiAssistService {
    pub fn new(config: &AppConfig) -> Result<Self> {
        if !config.is_ai_configured() {
            return Err(anyhow!("GEMINI_API_KEY environment variable not set"));
        }

        Ok(Self {
            http_client: Client::new(),
            api_key: config.gemini_api_key.clone(),
            base_url: config.gemini_base_url.clone(),
        })
    }

    /// Summarize free-text clinical notes into a short recommendation.
    pub async fn summarize_clinical_notes(&self, notes: &str) -> Result<String> {
        debug!("Summarizing clinical notes ({} chars)", notes.len());

        let prompt = format!(
            "Resume de forma profesional y concisa las siguientes notas clínicas de un \
             paciente. Enfócate estrictamente en hallazgos, diagnóstico y plan de \
             tratamiento: \"{}\"",
            notes
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": { "maxOutputTokens": 600 }
        });

        let text = self.generate(SUMMARY_MODEL, body).await?;
        Ok(text.trim().to_string())
    }

    /// Classify findings into a structured suggestion list.
    pub async fn suggest_diagnosis(&self, findings: &str) -> Result<DiagnosisSuggestion> {
        debug!("Requesting diagnosis suggestions");

        let prompt = format!(
            "Analiza los siguientes hallazgos clínicos: \"{}\". Proporciona una lista de \
             posibles diagnósticos diferenciales y sugiere los servicios clínicos más \
             adecuados. Responde exclusivamente en JSON.",
            findings
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "suggestions": {
                            "type": "ARRAY",
                            "items": { "type": "STRING" },
                            "description": "Lista de diagnósticos sugeridos basados en hallazgos."
                        },
                        "recommendedService": {
                            "type": "STRING",
                            "description": "Servicio o categoría clínica más recomendada."
                        },
                        "rationale": {
                            "type": "STRING",
                            "description": "Breve razonamiento del análisis."
                        }
                    },
                    "required": ["suggestions", "recommendedService"]
                }
            }
        });

        let text = self.generate(SUGGEST_MODEL, body).await?;
        let suggestion: DiagnosisSuggestion = serde_json::from_str(&text)?;
        Ok(suggestion)
    }

    async fn generate(&self, model: &str, body: Value) -> Result<String> {
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, model);

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(anyhow!("Gemini API error: {}", error_text));
        }

        let ai_response: Value = response.json().await?;
        let text = ai_response["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| anyhow!("Invalid Gemini response format"))?;

        Ok(text.to_string())
    }
}
