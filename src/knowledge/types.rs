use serde::{Deserialize, Serialize};

/// One over-the-counter suggestion. Doses are display strings, never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineRecommendation {
    pub name: String,
    pub dose: String,
    pub max_daily: String,
}

impl MedicineRecommendation {
    pub fn new(name: &str, dose: &str, max_daily: &str) -> Self {
        Self {
            name: name.to_string(),
            dose: dose.to_string(),
            max_daily: max_daily.to_string(),
        }
    }
}

/// Recommendation data for a single condition.
///
/// Low and medium tiers carry self-care medicines; the severe tier carries
/// an imperative action instead and never suggests self-medication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionEntry {
    SelfCare {
        medicines: Vec<MedicineRecommendation>,
        advice: String,
    },
    Emergency {
        action: String,
        advice: String,
    },
}

impl ConditionEntry {
    pub fn advice(&self) -> &str {
        match self {
            Self::SelfCare { advice, .. } | Self::Emergency { advice, .. } => advice,
        }
    }

    /// Empty for emergency entries.
    pub fn medicines(&self) -> &[MedicineRecommendation] {
        match self {
            Self::SelfCare { medicines, .. } => medicines,
            Self::Emergency { .. } => &[],
        }
    }

    pub fn action(&self) -> Option<&str> {
        match self {
            Self::Emergency { action, .. } => Some(action),
            Self::SelfCare { .. } => None,
        }
    }
}

/// A named condition inside a tier, kept in authoring order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionRecord {
    pub condition: String,
    #[serde(flatten)]
    pub entry: ConditionEntry,
}
