//! Turns one user utterance into one chat reply.
//!
//! Order: greeting → follow-up on known symptoms → triage recommendation →
//! pain guidance → generative fallback → request for more detail.

use serde::{Deserialize, Serialize};

use crate::generative::TextGenerator;
use crate::models::Severity;
use crate::triage::{matched_tier, ClassificationResult, Classifier};

use super::conversation::ConversationContext;
use super::format::{format_medicine_block, format_recommendation};

pub const WELCOME_MESSAGE: &str = "Hello! I'm TriageCare AI, your medical intake assistant. \
     Please describe your symptoms or health concerns, and I'll help guide you to the appropriate care.";

pub const GREETING_REPLY: &str = "Hello! I'm TriageCare AI. \
     Please describe your symptoms and I'll provide appropriate recommendations based on severity.";

pub const PAIN_ASSESSMENT_REPLY: &str = "**PAIN ASSESSMENT**\n\n\
     I understand you're experiencing pain. To provide better guidance:\n\n\
     • **Location**: Where exactly is the pain?\n\
     • **Intensity**: Rate 1-10 (10 being unbearable)\n\
     • **Duration**: How long have you had this pain?\n\
     • **Cause**: Any recent injury or activity?\n\n\
     Please provide more details for specific recommendations.";

pub const GENERIC_REPLY: &str = "I'm here to help with your health concerns. \
     Could you describe your symptoms in more detail? For example, mention the location, \
     intensity, and any activities that might have caused the issue.";

pub const GENERATED_SUFFIX: &str = "Is there anything else you'd like to know?";

const GREETING_WORDS: &[&str] = &["hi", "hello"];
const FOLLOW_UP_PHRASES: &[&str] = &["what about"];
const FOLLOW_UP_WORDS: &[&str] = &["also", "and", "plus", "additionally", "more", "other", "else"];
const PAIN_WORDS: &[&str] = &["pain", "hurt", "ache"];
const LEG_PAIN_CUES: &[&str] = &["leg", "running", "exercise"];

/// Which branch produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplySource {
    Greeting,
    FollowUp,
    Recommendation,
    PainGuidance,
    PainAssessment,
    Generated,
    Generic,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub text: String,
    pub source: ReplySource,
    /// Present once the utterance reached the triage stage.
    pub classification: Option<ClassificationResult>,
}

pub struct ChatResponder<'a> {
    classifier: Classifier<'a>,
    generator: Option<&'a dyn TextGenerator>,
}

impl<'a> ChatResponder<'a> {
    pub fn new(classifier: Classifier<'a>) -> Self {
        Self {
            classifier,
            generator: None,
        }
    }

    /// Attach the optional generative fallback.
    pub fn with_generator(mut self, generator: &'a dyn TextGenerator) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Reply to one utterance. Blank input yields no reply.
    pub fn respond(&self, ctx: &mut ConversationContext, message: &str) -> Option<ChatReply> {
        let message = message.trim();
        if message.is_empty() {
            return None;
        }

        ctx.record(message);
        let lower = message.to_lowercase();
        let tier = matched_tier(message);

        if tier.is_none() && contains_word(&lower, GREETING_WORDS) {
            return Some(self.reply(GREETING_REPLY.to_string(), ReplySource::Greeting, None));
        }

        // A severe utterance is always triaged, even if it reads like a follow-up.
        // The opening message is never a follow-up, however it is phrased.
        if tier != Some(Severity::Severe)
            && ctx.transcript().len() > 1
            && ctx.has_symptoms()
            && is_follow_up(&lower)
        {
            let text = self.follow_up(ctx, &lower);
            return Some(self.reply(text, ReplySource::FollowUp, None));
        }

        let result = self.classifier.classify(message);
        if let Some(text) = format_recommendation(&result) {
            return Some(self.reply(text, ReplySource::Recommendation, Some(result)));
        }

        if PAIN_WORDS.iter().any(|w| lower.contains(w)) {
            if LEG_PAIN_CUES.iter().any(|w| lower.contains(w)) {
                if let Some(text) = self.leg_pain_guidance() {
                    return Some(self.reply(text, ReplySource::PainGuidance, Some(result)));
                }
            }
            return Some(self.reply(
                PAIN_ASSESSMENT_REPLY.to_string(),
                ReplySource::PainAssessment,
                Some(result),
            ));
        }

        if let Some(text) = self.generate_fallback(ctx, message) {
            return Some(self.reply(text, ReplySource::Generated, Some(result)));
        }

        Some(self.reply(GENERIC_REPLY.to_string(), ReplySource::Generic, Some(result)))
    }

    fn reply(
        &self,
        text: String,
        source: ReplySource,
        classification: Option<ClassificationResult>,
    ) -> ChatReply {
        tracing::debug!(source = ?source, "Chat reply produced");
        ChatReply {
            text,
            source,
            classification,
        }
    }

    fn follow_up(&self, ctx: &ConversationContext, lower: &str) -> String {
        if lower.contains("cough") {
            if let Some(text) = self.low_recap(
                "cough",
                "Anything else you'd like to know about your symptoms?",
            ) {
                return text;
            }
        }
        if lower.contains("cold") {
            if let Some(text) = self.low_recap(
                "cold",
                "Is there anything else about your symptoms you'd like to discuss?",
            ) {
                return text;
            }
        }
        format!(
            "Based on your current symptoms ({}), I can provide more specific guidance. \
             What would you like to know more about?",
            ctx.symptoms().join(", ")
        )
    }

    fn low_recap(&self, condition: &str, closing: &str) -> Option<String> {
        let entry = self.classifier.lookup(Severity::Low, condition)?;
        Some(format!(
            "**For your {condition} (LOW SEVERITY):**\n\n{}\n**Advice:** {}\n\n{closing}",
            format_medicine_block(entry.medicines()),
            entry.advice()
        ))
    }

    fn leg_pain_guidance(&self) -> Option<String> {
        let entry = self.classifier.lookup(Severity::Low, "leg pain")?;
        Some(format!(
            "**LOW SEVERITY - LEG PAIN**\n\n{}\n**Advice:** {}\n\nDo you have any other symptoms or questions?",
            format_medicine_block(entry.medicines()),
            entry.advice()
        ))
    }

    fn generate_fallback(&self, ctx: &ConversationContext, message: &str) -> Option<String> {
        let generator = self.generator?;
        let prompt = build_fallback_prompt(ctx.symptoms(), message);

        match generator.generate(&prompt) {
            Ok(text) => Some(format!("{}\n\n{GENERATED_SUFFIX}", text.trim())),
            Err(e) => {
                tracing::warn!(error = %e, "Generative fallback failed, using generic reply");
                None
            }
        }
    }
}

/// Prompt for the generative fallback; mentions symptoms discussed so far.
pub fn build_fallback_prompt(symptoms: &[String], message: &str) -> String {
    let context = if symptoms.is_empty() {
        String::new()
    } else {
        format!("Current symptoms discussed: {}. ", symptoms.join(", "))
    };
    format!(
        "You are TriageCare AI. {context}User says: \"{message}\". \
         Provide helpful medical guidance and ask follow-up questions. Keep response under 100 words."
    )
}

fn words(lower: &str) -> impl Iterator<Item = &str> {
    lower
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|w| !w.is_empty())
}

fn contains_word(lower: &str, targets: &[&str]) -> bool {
    words(lower).any(|w| targets.contains(&w))
}

fn is_follow_up(lower: &str) -> bool {
    FOLLOW_UP_PHRASES.iter().any(|p| lower.contains(p)) || contains_word(lower, FOLLOW_UP_WORDS)
}
