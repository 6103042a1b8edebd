//! Display text for triage results. Replies use `**bold**` markers that the
//! UI layer renders; [`render_plain`] strips them for terminals.

use std::sync::LazyLock;

use regex::Regex;

use crate::knowledge::MedicineRecommendation;
use crate::models::Severity;
use crate::triage::{ClassificationResult, TriageOutcome};

pub const CLOSING_QUESTION: &str =
    "Do you have any other symptoms or questions about your current condition?";

pub const MEDIUM_MONITOR_NOTE: &str =
    "⚠️ Monitor symptoms closely and consult a doctor if they worsen.";

static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("Invalid bold regex"));

/// "• Paracetamol: 500mg every 6 hours (Max: 3g/day)"
pub fn format_medicine_line(med: &MedicineRecommendation) -> String {
    format!("• {}: {} (Max: {}/day)", med.name, med.dose, med.max_daily)
}

/// The medication block, one line per medicine, each newline-terminated.
pub fn format_medicine_block(medicines: &[MedicineRecommendation]) -> String {
    let mut out = String::from("**Recommended Medications:**\n");
    for med in medicines {
        out.push_str(&format_medicine_line(med));
        out.push('\n');
    }
    out
}

/// Full chat reply for an actionable result; `None` for `Unmatched`.
pub fn format_recommendation(result: &ClassificationResult) -> Option<String> {
    let mut response = format!("**{} SEVERITY**\n\n", result.severity.label());

    match &result.outcome {
        TriageOutcome::Unmatched => return None,
        TriageOutcome::GenericSevere { action, advice } => {
            response.push_str(&format!("🚨 **{action}**\n\n{advice}"));
        }
        TriageOutcome::Matched { condition, entry } => match entry.action() {
            Some(action) => {
                response.push_str(&format!("🚨 **{action}**\n\n{}", entry.advice()));
            }
            None => {
                response.push_str(&format!("**Condition:** {condition}\n\n"));
                if !entry.medicines().is_empty() {
                    response.push_str(&format_medicine_block(entry.medicines()));
                    response.push('\n');
                }
                response.push_str(&format!("**Advice:** {}", entry.advice()));
                if result.severity == Severity::Medium {
                    response.push_str("\n\n");
                    response.push_str(MEDIUM_MONITOR_NOTE);
                }
            }
        },
    }

    response.push_str("\n\n");
    response.push_str(CLOSING_QUESTION);
    Some(response)
}

/// Strip `**bold**` markers, keeping the inner text.
pub fn render_plain(text: &str) -> String {
    BOLD.replace_all(text, "$1").into_owned()
}
