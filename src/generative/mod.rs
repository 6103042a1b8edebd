//! Optional generative-text collaborator.
//!
//! The triage core never depends on it: callers hold an
//! `Option<&dyn TextGenerator>` and treat every error as "no reply".

pub mod ollama;

pub use ollama::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Generative service unavailable: {0}")]
    Unavailable(String),

    #[error("Generative service returned error (status {status}): {body}")]
    Service { status: u16, body: String },

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    #[error("Generative service returned an empty response")]
    EmptyResponse,
}

/// Produces free text for a prompt.
pub trait TextGenerator {
    fn generate(&self, prompt: &str) -> Result<String, GenerateError>;
}

/// Mock generator for testing. Returns a configurable response.
pub struct MockGenerator {
    response: String,
}

impl MockGenerator {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
        }
    }
}

impl TextGenerator for MockGenerator {
    fn generate(&self, _prompt: &str) -> Result<String, GenerateError> {
        Ok(self.response.clone())
    }
}

/// Always offline. Exercises the fallback failure path.
pub struct UnavailableGenerator;

impl TextGenerator for UnavailableGenerator {
    fn generate(&self, _prompt: &str) -> Result<String, GenerateError> {
        Err(GenerateError::Unavailable("generative fallback disabled".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_returns_configured_text() {
        let generator = MockGenerator::new("Drink water.");
        assert_eq!(generator.generate("anything").unwrap(), "Drink water.");
    }

    #[test]
    fn unavailable_always_fails() {
        let err = UnavailableGenerator.generate("prompt").unwrap_err();
        assert!(matches!(err, GenerateError::Unavailable(_)));
        assert!(err.to_string().contains("unavailable"));
    }

    #[test]
    fn usable_as_trait_object() {
        let generators: Vec<Box<dyn TextGenerator>> =
            vec![Box::new(MockGenerator::new("ok")), Box::new(UnavailableGenerator)];
        let ok: Vec<bool> = generators.iter().map(|g| g.generate("p").is_ok()).collect();
        assert_eq!(ok, vec![true, false]);
    }
}
