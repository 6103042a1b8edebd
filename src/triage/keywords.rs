//! Stage 1: severity tier from ordered keyword sets.
//!
//! Membership is case-insensitive substring containment, not whole-word
//! matching ("running" also matches "runningback").

use crate::models::Severity;

pub const SEVERE_KEYWORDS: &[&str] = &[
    "chest pain",
    "difficulty breathing",
    "severe",
    "unbearable",
    "emergency",
    "can't breathe",
    "heart attack",
    "stroke",
];

pub const MEDIUM_KEYWORDS: &[&str] = &[
    "stomach",
    "abdominal",
    "diarrhea",
    "vomiting",
    "back pain",
    "sore throat",
    "persistent",
];

pub const LOW_KEYWORDS: &[&str] = &[
    "headache",
    "fever",
    "cough",
    "cold",
    "runny nose",
    "sneezing",
    "mild",
    "leg pain",
    "muscle pain",
    "running",
    "exercise",
];

/// Checked in this order; the first set with any hit decides the tier.
pub const SEVERITY_RULES: [(Severity, &[&str]); 3] = [
    (Severity::Severe, SEVERE_KEYWORDS),
    (Severity::Medium, MEDIUM_KEYWORDS),
    (Severity::Low, LOW_KEYWORDS),
];

/// Tier used when no keyword matches. Uncertain input is not under-triaged.
pub const DEFAULT_SEVERITY: Severity = Severity::Medium;

/// The tier whose keywords appear in the text, or `None` when nothing matched.
pub fn matched_tier(text: &str) -> Option<Severity> {
    let lower = text.to_lowercase();
    SEVERITY_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(tier, _)| *tier)
}

/// Stage 1 alone: keyword tier, falling back to [`DEFAULT_SEVERITY`].
pub fn classify_severity(text: &str) -> Severity {
    matched_tier(text).unwrap_or(DEFAULT_SEVERITY)
}
