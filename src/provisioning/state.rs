//! Provisioning step state machine.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ProvisioningError;

/// The provisioning stages, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKey {
    Profile,
    Slack,
    Github,
    Chatbot,
}

impl StepKey {
    pub const ALL: [StepKey; 4] = [Self::Profile, Self::Slack, Self::Github, Self::Chatbot];
}

impl std::fmt::Display for StepKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Profile => "profile",
            Self::Slack => "slack",
            Self::Github => "github",
            Self::Chatbot => "chatbot",
        };
        write!(f, "{s}")
    }
}

/// State of a single step.
///
/// Progresses linearly: Pending → Active → Completed. `Failed` is reachable
/// only from Active, when the runner gives up on the step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepState {
    Pending,
    Active,
    Completed,
    Failed,
}

impl StepState {
    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: StepState) -> bool {
        use StepState::*;
        matches!(
            (self, target),
            (Pending, Active) | (Active, Completed) | (Active, Failed)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl Default for StepState {
    fn default() -> Self {
        Self::Pending
    }
}

impl std::fmt::Display for StepState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        write!(f, "{s}")
    }
}

/// A step and where it is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisioningStep {
    pub key: StepKey,
    pub state: StepState,
}

impl ProvisioningStep {
    pub fn new(key: StepKey) -> Self {
        Self {
            key,
            state: StepState::Pending,
        }
    }

    pub fn transition_to(&mut self, target: StepState) -> Result<(), ProvisioningError> {
        if !self.state.can_transition_to(target) {
            return Err(ProvisioningError::InvalidTransition {
                key: self.key,
                from: self.state.to_string(),
                to: target.to_string(),
            });
        }
        self.state = target;
        Ok(())
    }
}

/// Progress notification for the UI: `key` just entered `state`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepEvent {
    pub key: StepKey,
    pub state: StepState,
}

impl StepEvent {
    pub fn active(key: StepKey) -> Self {
        Self {
            key,
            state: StepState::Active,
        }
    }

    pub fn completed(key: StepKey) -> Self {
        Self {
            key,
            state: StepState::Completed,
        }
    }
}

/// A step to run and how long its simulated work takes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSpec {
    pub key: StepKey,
    pub duration: Duration,
}

impl StepSpec {
    pub fn new(key: StepKey, duration: Duration) -> Self {
        Self { key, duration }
    }
}

/// The portal's standard pacing.
pub fn default_plan() -> Vec<StepSpec> {
    vec![
        StepSpec::new(StepKey::Profile, Duration::from_millis(1200)),
        StepSpec::new(StepKey::Slack, Duration::from_millis(1500)),
        StepSpec::new(StepKey::Github, Duration::from_millis(1300)),
        StepSpec::new(StepKey::Chatbot, Duration::from_millis(1000)),
    ]
}
