//! Append-only chat transcript.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    Employee,
    Assistant,
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Employee => write!(f, "employee"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// One line of the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueTurn {
    pub speaker: Speaker,
    pub text: String,
    pub at: DateTime<Utc>,
}

/// Ordered turns for one chat session. Turns can be appended but never
/// edited, removed or reordered.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Transcript {
    turns: Vec<DialogueTurn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, speaker: Speaker, text: impl Into<String>) -> &DialogueTurn {
        self.turns.push(DialogueTurn {
            speaker,
            text: text.into(),
            at: Utc::now(),
        });
        &self.turns[self.turns.len() - 1]
    }

    pub fn turns(&self) -> &[DialogueTurn] {
        &self.turns
    }
}
