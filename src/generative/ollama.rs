use serde::{Deserialize, Serialize};

use super::{GenerateError, TextGenerator};

/// System prompt sent with every fallback request.
pub const TRIAGE_SYSTEM_PROMPT: &str = "You are TriageCare AI, a medical intake assistant. \
     Give short, calm, general guidance and ask follow-up questions. \
     Never claim a diagnosis.";

/// Ollama HTTP client for local text generation.
pub struct OllamaGenerator {
    base_url: String,
    model: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl OllamaGenerator {
    /// Create a generator pointing at an Ollama instance.
    pub fn new(base_url: &str, model: &str, timeout_secs: u64) -> Result<Self, GenerateError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| GenerateError::Unavailable(format!("HTTP client setup failed: {e}")))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            client,
            timeout_secs,
        })
    }

    /// Default Ollama instance at localhost:11434 with a 30-second timeout.
    pub fn default_local(model: &str) -> Result<Self, GenerateError> {
        Self::new("http://localhost:11434", model, 30)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn map_send_error(&self, e: reqwest::Error) -> GenerateError {
        if e.is_connect() {
            GenerateError::Unavailable(format!("Ollama is not running at {}", self.base_url))
        } else if e.is_timeout() {
            GenerateError::Unavailable(format!("Request timed out after {}s", self.timeout_secs))
        } else {
            GenerateError::Unavailable(e.to_string())
        }
    }
}

/// Request body for Ollama /api/generate
#[derive(Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    system: &'a str,
    stream: bool,
}

/// Response body from Ollama /api/generate
#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}

impl TextGenerator for OllamaGenerator {
    fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = OllamaGenerateRequest {
            model: &self.model,
            prompt,
            system: TRIAGE_SYSTEM_PROMPT,
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(GenerateError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: OllamaGenerateResponse = response
            .json()
            .map_err(|e| GenerateError::ResponseParsing(e.to_string()))?;

        let text = parsed.response.trim();
        if text.is_empty() {
            return Err(GenerateError::EmptyResponse);
        }
        Ok(text.to_string())
    }
}
