//! Dialogue: rule-based answers to onboarding questions.
//!
//! Every utterance is classified against a fixed, ordered keyword rule list
//! and answered from a canned template, some of which interpolate the
//! employee's `OnboardingRecord`. Nothing is remembered between turns; the
//! transcript is kept by the chat session, not the engine.

pub mod engine;
pub mod intent;
pub mod templates;
pub mod transcript;

pub use engine::{DialogueEngine, IntentRule, Reply, Trigger};
pub use intent::Intent;
pub use transcript::{DialogueTurn, Speaker, Transcript};
