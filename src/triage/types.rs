use serde::{Deserialize, Serialize};

use crate::knowledge::{ConditionEntry, MedicineRecommendation};
use crate::models::Severity;

/// Action attached to a severe utterance when no named condition matched.
pub const GENERIC_SEVERE_ACTION: &str = "URGENT - Consult doctor immediately";
pub const GENERIC_SEVERE_ADVICE: &str = "Your symptoms may require immediate medical attention.";

/// Stage 2 outcome within the chosen tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TriageOutcome {
    /// A named condition from the table matched.
    Matched {
        condition: String,
        entry: ConditionEntry,
    },
    /// Severe tier, no named condition: fixed urgent guidance.
    GenericSevere { action: String, advice: String },
    /// Tier known, condition unknown. The caller asks for more detail.
    Unmatched,
}

/// Exactly one per classified utterance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub severity: Severity,
    pub outcome: TriageOutcome,
}

impl ClassificationResult {
    pub fn condition(&self) -> Option<&str> {
        match &self.outcome {
            TriageOutcome::Matched { condition, .. } => Some(condition),
            _ => None,
        }
    }

    pub fn medicines(&self) -> &[MedicineRecommendation] {
        match &self.outcome {
            TriageOutcome::Matched { entry, .. } => entry.medicines(),
            _ => &[],
        }
    }

    pub fn action(&self) -> Option<&str> {
        match &self.outcome {
            TriageOutcome::Matched { entry, .. } => entry.action(),
            TriageOutcome::GenericSevere { action, .. } => Some(action),
            TriageOutcome::Unmatched => None,
        }
    }

    pub fn advice(&self) -> Option<&str> {
        match &self.outcome {
            TriageOutcome::Matched { entry, .. } => Some(entry.advice()),
            TriageOutcome::GenericSevere { advice, .. } => Some(advice),
            TriageOutcome::Unmatched => None,
        }
    }

    /// True when there is guidance to show (anything but `Unmatched`).
    pub fn is_actionable(&self) -> bool {
        !matches!(self.outcome, TriageOutcome::Unmatched)
    }
}
