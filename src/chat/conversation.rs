//! Caller-held conversation state: transcript plus symptoms discussed so far.

use serde::{Deserialize, Serialize};

/// Fixed symptom vocabulary recognised in free text.
const SYMPTOM_VOCABULARY: &[&str] = &[
    "headache",
    "fever",
    "cough",
    "cold",
    "stomach pain",
    "diarrhea",
    "back pain",
    "sore throat",
    "chest pain",
    "breathing",
    "nausea",
    "vomiting",
    "leg pain",
    "muscle pain",
];

/// One chat session. Owned by the caller, never shared between sessions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationContext {
    transcript: Vec<String>,
    symptoms: Vec<String>,
}

impl ConversationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a user utterance and merge the symptoms it mentions.
    /// Returns the symptoms found in this utterance.
    pub fn record(&mut self, utterance: &str) -> Vec<String> {
        self.transcript.push(utterance.to_string());
        let found = extract_symptoms(utterance);
        for symptom in &found {
            if !self.symptoms.contains(symptom) {
                self.symptoms.push(symptom.clone());
            }
        }
        found
    }

    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    /// De-duplicated, in first-mention order.
    pub fn symptoms(&self) -> &[String] {
        &self.symptoms
    }

    pub fn has_symptoms(&self) -> bool {
        !self.symptoms.is_empty()
    }

    pub fn clear(&mut self) {
        self.transcript.clear();
        self.symptoms.clear();
    }
}

/// Symptoms mentioned in one utterance, in detection order (may repeat).
pub fn extract_symptoms(utterance: &str) -> Vec<String> {
    let lower = utterance.to_lowercase();
    let mut found = Vec::new();

    if lower.contains("pain in leg") || lower.contains("leg pain") {
        found.push("leg pain".to_string());
    }
    if lower.contains("muscle") && lower.contains("pain") {
        found.push("muscle pain".to_string());
    }
    if lower.contains("running") || lower.contains("exercise") {
        found.push("exercise pain".to_string());
    }

    for symptom in SYMPTOM_VOCABULARY {
        if lower.contains(symptom) {
            found.push(symptom.to_string());
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_vocabulary_terms() {
        let found = extract_symptoms("Headache and a sore throat");
        assert_eq!(found, vec!["headache", "sore throat"]);
    }

    #[test]
    fn extracts_derived_pain_terms() {
        let found = extract_symptoms("pain in leg after running");
        assert_eq!(found, vec!["leg pain", "exercise pain"]);
    }

    #[test]
    fn muscle_pain_found_from_separate_words() {
        let found = extract_symptoms("my muscle has a dull pain");
        assert_eq!(found, vec!["muscle pain"]);
    }

    #[test]
    fn nothing_found_in_unrelated_text() {
        assert!(extract_symptoms("what time is it").is_empty());
    }

    #[test]
    fn context_deduplicates_in_first_mention_order() {
        let mut ctx = ConversationContext::new();
        ctx.record("I have a cough");
        ctx.record("still a cough and now a fever");
        assert_eq!(ctx.symptoms(), &["cough".to_string(), "fever".to_string()]);
        assert_eq!(ctx.transcript().len(), 2);
    }

    #[test]
    fn leg_pain_detected_once_per_source_but_merged_once() {
        let mut ctx = ConversationContext::new();
        let found = ctx.record("leg pain");
        // Derived rule and vocabulary both report it.
        assert_eq!(found, vec!["leg pain", "leg pain"]);
        assert_eq!(ctx.symptoms(), &["leg pain".to_string()]);
    }

    #[test]
    fn clear_resets_everything() {
        let mut ctx = ConversationContext::new();
        ctx.record("fever");
        ctx.clear();
        assert!(!ctx.has_symptoms());
        assert!(ctx.transcript().is_empty());
    }
}
