//! Stage 2: condition lookup inside the chosen tier.

use crate::knowledge::{ConditionEntry, KnowledgeBase};
use crate::models::{MatchStrategy, Severity};

use super::keywords::classify_severity;
use super::types::{
    ClassificationResult, TriageOutcome, GENERIC_SEVERE_ACTION, GENERIC_SEVERE_ADVICE,
};

/// Stateless classifier bound to one knowledge table.
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'a> {
    knowledge: &'a KnowledgeBase,
    strategy: MatchStrategy,
}

impl Classifier<'static> {
    /// Built-in table with reference matching.
    pub fn builtin() -> Self {
        Self::new(KnowledgeBase::builtin(), MatchStrategy::Reference)
    }
}

impl<'a> Classifier<'a> {
    pub fn new(knowledge: &'a KnowledgeBase, strategy: MatchStrategy) -> Self {
        Self {
            knowledge,
            strategy,
        }
    }

    pub fn knowledge(&self) -> &'a KnowledgeBase {
        self.knowledge
    }

    pub fn strategy(&self) -> MatchStrategy {
        self.strategy
    }

    /// Classify one utterance. Never fails.
    pub fn classify(&self, utterance: &str) -> ClassificationResult {
        let severity = classify_severity(utterance);
        let lower = utterance.to_lowercase();

        let outcome = match self.find_condition(severity, &lower) {
            Some((condition, entry)) => TriageOutcome::Matched {
                condition: condition.to_string(),
                entry: entry.clone(),
            },
            None if severity == Severity::Severe => TriageOutcome::GenericSevere {
                action: GENERIC_SEVERE_ACTION.to_string(),
                advice: GENERIC_SEVERE_ADVICE.to_string(),
            },
            None => TriageOutcome::Unmatched,
        };

        tracing::debug!(
            severity = %severity,
            condition = ?outcome_condition(&outcome),
            input_len = utterance.len(),
            "Classified utterance"
        );

        ClassificationResult { severity, outcome }
    }

    /// Direct table access for a known condition name.
    pub fn lookup(&self, severity: Severity, condition: &str) -> Option<&'a ConditionEntry> {
        self.knowledge.get(severity, condition)
    }

    fn find_condition(&self, tier: Severity, lower: &str) -> Option<(&'a str, &'a ConditionEntry)> {
        self.knowledge
            .entries_for(tier)
            .find(|(name, _)| condition_matches(self.strategy, tier, name, lower))
    }
}

fn outcome_condition(outcome: &TriageOutcome) -> Option<&str> {
    match outcome {
        TriageOutcome::Matched { condition, .. } => Some(condition),
        _ => None,
    }
}

/// Does a table key appear in an already lower-cased utterance?
///
/// `Reference` strips the first space from medium and severe keys only, and
/// never touches the utterance, so "chest pain" is searched as "chestpain".
/// `Symmetric` removes all whitespace from both sides.
pub fn condition_matches(strategy: MatchStrategy, tier: Severity, key: &str, lower: &str) -> bool {
    let key = key.to_lowercase();
    match strategy {
        MatchStrategy::Reference => match tier {
            Severity::Low => lower.contains(&key),
            Severity::Medium | Severity::Severe => lower.contains(&key.replacen(' ', "", 1)),
        },
        MatchStrategy::Symmetric => {
            let key = strip_whitespace(&key);
            !key.is_empty() && strip_whitespace(lower).contains(&key)
        }
    }
}

fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Classify against the built-in table with reference matching.
pub fn classify(utterance: &str) -> ClassificationResult {
    Classifier::builtin().classify(utterance)
}

/// Exact lookup in the built-in table.
pub fn lookup(severity: Severity, condition: &str) -> Option<&'static ConditionEntry> {
    KnowledgeBase::builtin().get(severity, condition)
}
