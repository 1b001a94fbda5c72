//! Sequential step orchestrator.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{info, warn};

use super::state::{ProvisioningStep, StepEvent, StepSpec, StepState};
use crate::error::ProvisioningError;

/// Performs the work behind one step.
#[async_trait]
pub trait StepRunner: Send + Sync {
    /// Run the step once. An `Err` carries a human-readable reason.
    async fn execute(&self, step: &StepSpec) -> Result<(), String>;
}

/// Waits out the step's duration and always succeeds.
pub struct SimulatedRunner;

#[async_trait]
impl StepRunner for SimulatedRunner {
    async fn execute(&self, step: &StepSpec) -> Result<(), String> {
        tokio::time::sleep(step.duration).await;
        Ok(())
    }
}

/// How often a failing step is retried before the run aborts.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts per step, including the first. Zero is treated as one.
    pub max_attempts: u32,
    /// Pause between attempts.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            backoff: Duration::ZERO,
        }
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct ProvisioningReport {
    pub steps: Vec<ProvisioningStep>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Runs steps strictly one after another.
///
/// Each step emits `active` when it starts and `completed` when it finishes;
/// the next step does not start before that. A run resolves once, after the
/// last step and the settle pause.
pub struct Orchestrator {
    plan: Vec<StepSpec>,
    runner: Arc<dyn StepRunner>,
    retry: RetryPolicy,
    settle: Duration,
}

impl Orchestrator {
    /// Orchestrator over `plan` with the simulated runner and no retries.
    pub fn new(plan: Vec<StepSpec>) -> Self {
        Self {
            plan,
            runner: Arc::new(SimulatedRunner),
            retry: RetryPolicy::default(),
            settle: Duration::ZERO,
        }
    }

    pub fn with_runner(mut self, runner: Arc<dyn StepRunner>) -> Self {
        self.runner = runner;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Pause after the last step before completion is reported.
    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    pub fn plan(&self) -> &[StepSpec] {
        &self.plan
    }

    /// Run every step in order, reporting transitions on `events`.
    ///
    /// A dropped receiver does not stop the run.
    pub async fn run(
        &self,
        events: &mpsc::UnboundedSender<StepEvent>,
    ) -> Result<ProvisioningReport, ProvisioningError> {
        let started_at = Utc::now();
        let mut steps: Vec<ProvisioningStep> = self
            .plan
            .iter()
            .map(|spec| ProvisioningStep::new(spec.key))
            .collect();
        let max_attempts = self.retry.max_attempts.max(1);

        for (step, spec) in steps.iter_mut().zip(&self.plan) {
            advance(step, StepState::Active, events)?;
            info!(
                step = %spec.key,
                duration_ms = spec.duration.as_millis() as u64,
                "Provisioning step started"
            );

            let mut attempts = 0;
            loop {
                attempts += 1;
                match self.runner.execute(spec).await {
                    Ok(()) => break,
                    Err(reason) if attempts < max_attempts => {
                        warn!(
                            step = %spec.key,
                            attempt = attempts,
                            reason = %reason,
                            "Provisioning step failed, retrying"
                        );
                        tokio::time::sleep(self.retry.backoff).await;
                    }
                    Err(reason) => {
                        warn!(
                            step = %spec.key,
                            attempts,
                            reason = %reason,
                            "Provisioning step failed, aborting run"
                        );
                        advance(step, StepState::Failed, events)?;
                        return Err(ProvisioningError::StepFailed {
                            key: spec.key,
                            attempts,
                            reason,
                        });
                    }
                }
            }

            advance(step, StepState::Completed, events)?;
        }

        tokio::time::sleep(self.settle).await;
        info!(steps = steps.len(), "Provisioning complete");

        Ok(ProvisioningReport {
            steps,
            started_at,
            finished_at: Utc::now(),
        })
    }
}

fn advance(
    step: &mut ProvisioningStep,
    target: StepState,
    events: &mpsc::UnboundedSender<StepEvent>,
) -> Result<(), ProvisioningError> {
    step.transition_to(target)?;
    // Ok if nobody is watching progress.
    let _ = events.send(StepEvent {
        key: step.key,
        state: target,
    });
    Ok(())
}
