//! Symptom triage: keyword severity tiers plus condition lookup.
//!
//! Pure functions over text and the immutable knowledge table. Nothing here
//! fails; unknown input lands in the default tier with no condition.

pub mod classify;
pub mod keywords;
pub mod types;

pub use classify::*;
pub use keywords::{classify_severity, matched_tier, DEFAULT_SEVERITY};
pub use types::*;
