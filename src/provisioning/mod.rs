//! The simulated account set-up sequence shown after intake.
//!
//! Steps (profile, Slack, GitHub, chatbot) run one at a time through
//! pending → active → completed, emitting a `StepEvent` on every transition
//! so a progress indicator can follow along.

pub mod orchestrator;
pub mod state;

pub use orchestrator::{Orchestrator, ProvisioningReport, RetryPolicy, SimulatedRunner, StepRunner};
pub use state::{ProvisioningStep, StepEvent, StepKey, StepSpec, StepState, default_plan};
