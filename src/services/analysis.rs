//! AI condition analysis for a mold
//!
//! One outbound call per request to a text-generation service, given the
//! serialized mold including its full repair history. The collaborator
//! always produces text for the caller: every internal failure is absorbed
//! into a fixed apology string. No retry, no caching, no deduplication of
//! concurrent requests.

use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::entities::Mold;

/// Fixed message shown when the analysis cannot be produced
pub const ANALYSIS_FAILURE_MESSAGE: &str =
    "Грешка при генериране на AI анализ. Моля, опитайте по-късно.";

/// Fixed message for a response that carried no text
const EMPTY_ANALYSIS_MESSAGE: &str = "Не може да се генерира анализ в момента.";

/// Condition analysis seam. Implementations must always return text;
/// failures are mapped to the fixed failure message before this boundary.
pub trait AnalysisProvider {
    fn analyze(&self, mold: &Mold) -> String;
}

/// Internal failures of the Gemini client. Never crosses the
/// [`AnalysisProvider`] boundary.
#[derive(Debug, Error)]
enum AnalysisError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("service returned HTTP {0}")]
    Status(reqwest::StatusCode),
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

#[derive(Debug, Default, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

/// Client for the Gemini `generateContent` REST endpoint
pub struct GeminiClient {
    client: reqwest::blocking::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    fn prompt(mold: &Mold) -> String {
        let history = serde_json::to_string(&mold.repair_history)
            .unwrap_or_else(|_| "[]".to_string());
        format!(
            "Анализирай състоянието на следната матрица за шприцформа:\n\
             Име: {}\n\
             Сериен номер: {}\n\
             Общ брой удари: {}\n\
             Статус: {}\n\
             История на ремонтите (JSON): {}\n\n\
             Моля, дай кратка професионална препоръка на български език (до 150 думи) относно:\n\
             1. Вероятни рискове от повреда въз основа на броя удари и производителя.\n\
             2. Оценка на критичността на текущото състояние.\n\
             3. Препоръка за следваща профилактика.\n\n\
             Използвай технически език, подходящ за инженер по поддръжката.",
            mold.name,
            mold.serial_number,
            mold.total_shots,
            mold.status.label(),
            history
        )
    }

    fn request(&self, mold: &Mold) -> Result<String, AnalysisError> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
            self.model
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&json!({
                "contents": [{
                    "parts": [{ "text": Self::prompt(mold) }]
                }]
            }))
            .send()?;

        if !response.status().is_success() {
            return Err(AnalysisError::Status(response.status()));
        }

        let body: GenerateContentResponse = response.json()?;
        let text: String = body
            .candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Ok(EMPTY_ANALYSIS_MESSAGE.to_string());
        }
        Ok(text)
    }
}

impl AnalysisProvider for GeminiClient {
    fn analyze(&self, mold: &Mold) -> String {
        match self.request(mold) {
            Ok(text) => text,
            Err(_) => ANALYSIS_FAILURE_MESSAGE.to_string(),
        }
    }
}
