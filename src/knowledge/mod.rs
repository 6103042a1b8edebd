//! Static symptom knowledge: severity tier → condition → recommendation.
//!
//! The table is immutable once built. A replacement table is loaded whole
//! through [`KnowledgeBase::from_json`]; there is no partial mutation.

pub mod table;
pub mod types;

pub use types::*;

use std::collections::HashSet;
use std::sync::LazyLock;

use serde::Deserialize;
use thiserror::Error;

use crate::models::Severity;

#[derive(Error, Debug)]
pub enum KnowledgeError {
    #[error("Knowledge table JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Tier {0} has no conditions")]
    EmptyTier(Severity),

    #[error("Tier {tier} contains an empty condition name")]
    EmptyConditionName { tier: Severity },

    #[error("Condition '{condition}' appears twice in tier {tier}")]
    DuplicateCondition { tier: Severity, condition: String },

    #[error("Condition '{condition}' in tier {tier} must not list medicines")]
    UnexpectedMedicines { tier: Severity, condition: String },

    #[error("Condition '{condition}' in tier {tier} must list at least one medicine")]
    MissingMedicines { tier: Severity, condition: String },

    #[error("Condition '{condition}' in tier {tier} must carry an action")]
    MissingAction { tier: Severity, condition: String },

    #[error("Condition '{condition}' in tier {tier} must not carry an action")]
    UnexpectedAction { tier: Severity, condition: String },
}

static BUILTIN: LazyLock<KnowledgeBase> = LazyLock::new(|| KnowledgeBase {
    low: table::low_tier(),
    medium: table::medium_tier(),
    severe: table::severe_tier(),
});

/// Read-only recommendation table, shareable across threads without locking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeBase {
    low: Vec<ConditionRecord>,
    medium: Vec<ConditionRecord>,
    severe: Vec<ConditionRecord>,
}

impl KnowledgeBase {
    /// The shipped table, built once per process.
    pub fn builtin() -> &'static KnowledgeBase {
        &BUILTIN
    }

    /// Exact-key lookup. Absent is a normal outcome for free-text names.
    pub fn get(&self, severity: Severity, condition: &str) -> Option<&ConditionEntry> {
        self.tier(severity)
            .iter()
            .find(|r| r.condition == condition)
            .map(|r| &r.entry)
    }

    /// Entries of one tier in authoring order.
    pub fn entries_for(&self, severity: Severity) -> impl Iterator<Item = (&str, &ConditionEntry)> {
        self.tier(severity)
            .iter()
            .map(|r| (r.condition.as_str(), &r.entry))
    }

    pub fn condition_names(&self, severity: Severity) -> Vec<&str> {
        self.entries_for(severity).map(|(name, _)| name).collect()
    }

    /// Total number of conditions across all tiers.
    pub fn len(&self) -> usize {
        self.low.len() + self.medium.len() + self.severe.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn tier(&self, severity: Severity) -> &[ConditionRecord] {
        match severity {
            Severity::Low => &self.low,
            Severity::Medium => &self.medium,
            Severity::Severe => &self.severe,
        }
    }

    /// Load and validate a complete replacement table.
    ///
    /// Shape: `{"low": [..], "medium": [..], "severe": [..]}` where each item is
    /// `{"condition", "medicines", "advice"}` (low/medium) or
    /// `{"condition", "action", "advice"}` (severe). Arrays keep authoring order.
    pub fn from_json(json: &str) -> Result<Self, KnowledgeError> {
        let raw: RawTable = serde_json::from_str(json)?;

        let kb = Self {
            low: validate_tier(Severity::Low, raw.low)?,
            medium: validate_tier(Severity::Medium, raw.medium)?,
            severe: validate_tier(Severity::Severe, raw.severe)?,
        };

        tracing::info!(conditions = kb.len(), "Loaded replacement knowledge table");
        Ok(kb)
    }

    /// Serialize in the shape accepted by [`KnowledgeBase::from_json`].
    pub fn to_json(&self) -> Result<String, KnowledgeError> {
        let value = serde_json::json!({
            "low": self.low,
            "medium": self.medium,
            "severe": self.severe,
        });
        Ok(serde_json::to_string_pretty(&value)?)
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTable {
    low: Vec<RawCondition>,
    medium: Vec<RawCondition>,
    severe: Vec<RawCondition>,
}

#[derive(Deserialize)]
struct RawCondition {
    condition: String,
    #[serde(default)]
    medicines: Option<Vec<MedicineRecommendation>>,
    #[serde(default)]
    action: Option<String>,
    advice: String,
}

fn validate_tier(
    tier: Severity,
    raw: Vec<RawCondition>,
) -> Result<Vec<ConditionRecord>, KnowledgeError> {
    if raw.is_empty() {
        return Err(KnowledgeError::EmptyTier(tier));
    }

    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(raw.len());

    for item in raw {
        let condition = item.condition;
        if condition.trim().is_empty() {
            return Err(KnowledgeError::EmptyConditionName { tier });
        }
        if !seen.insert(condition.clone()) {
            return Err(KnowledgeError::DuplicateCondition { tier, condition });
        }

        let entry = match tier {
            Severity::Severe => {
                if item.medicines.is_some_and(|m| !m.is_empty()) {
                    return Err(KnowledgeError::UnexpectedMedicines { tier, condition });
                }
                let Some(action) = item.action else {
                    return Err(KnowledgeError::MissingAction { tier, condition });
                };
                ConditionEntry::Emergency {
                    action,
                    advice: item.advice,
                }
            }
            Severity::Low | Severity::Medium => {
                if item.action.is_some() {
                    return Err(KnowledgeError::UnexpectedAction { tier, condition });
                }
                let medicines = item.medicines.unwrap_or_default();
                if medicines.is_empty() {
                    return Err(KnowledgeError::MissingMedicines { tier, condition });
                }
                ConditionEntry::SelfCare {
                    medicines,
                    advice: item.advice,
                }
            }
        };

        records.push(ConditionRecord { condition, entry });
    }

    Ok(records)
}
