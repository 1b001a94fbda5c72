//! Keyword rules engine for onboarding questions.
//!
//! Rules are evaluated in declared order against the lowercased utterance and
//! the first match wins. Order matters: "who do I contact about my manager"
//! is a manager question, not a contact-routing one, because the manager rule
//! comes first. Matching is plain substring search; there is no stemming,
//! negation handling or synonym expansion.

use tracing::debug;

use super::intent::Intent;
use super::templates;
use crate::resolver::OnboardingRecord;

/// When a rule's keywords count as a match.
#[derive(Debug, Clone, Copy)]
pub enum Trigger {
    /// At least one keyword is present.
    Any(&'static [&'static str]),
    /// Every keyword is present.
    All(&'static [&'static str]),
}

impl Trigger {
    /// `lowered` must already be lowercase.
    fn matches(&self, lowered: &str) -> bool {
        match self {
            Self::Any(words) => words.iter().any(|w| lowered.contains(w)),
            Self::All(words) => words.iter().all(|w| lowered.contains(w)),
        }
    }
}

/// One `(predicate, responder)` pair.
#[derive(Debug, Clone)]
pub struct IntentRule {
    pub intent: Intent,
    pub trigger: Trigger,
    pub render: fn(&OnboardingRecord) -> String,
}

/// A classified utterance with its rendered reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub intent: Intent,
    pub text: String,
}

/// Stateless first-match-wins dialogue engine.
pub struct DialogueEngine {
    rules: Vec<IntentRule>,
}

impl DialogueEngine {
    /// The onboarding assistant's rule set.
    pub fn default_rules() -> Self {
        let rules = vec![
            IntentRule {
                intent: Intent::ManagerContact,
                trigger: Trigger::Any(&["manager", "report"]),
                render: templates::manager_contact,
            },
            IntentRule {
                intent: Intent::Channels,
                trigger: Trigger::Any(&["slack", "channel"]),
                render: templates::channels,
            },
            IntentRule {
                intent: Intent::Repositories,
                trigger: Trigger::Any(&["github", "repo"]),
                render: templates::repositories,
            },
            // Hardcoded to Aurora regardless of the employee's project.
            IntentRule {
                intent: Intent::ProjectDetail,
                trigger: Trigger::Any(&["aurora", "design system"]),
                render: templates::project_detail,
            },
            IntentRule {
                intent: Intent::FirstDay,
                trigger: Trigger::Any(&["first day", "start"]),
                render: templates::first_day,
            },
            IntentRule {
                intent: Intent::ContactRouting,
                trigger: Trigger::All(&["who", "contact"]),
                render: templates::contact_routing,
            },
            IntentRule {
                intent: Intent::FirstWeek,
                trigger: Trigger::Any(&["task", "first week"]),
                render: templates::first_week,
            },
            IntentRule {
                intent: Intent::CompanyValues,
                trigger: Trigger::Any(&["value", "culture"]),
                render: templates::company_values,
            },
        ];

        Self { rules }
    }

    /// An engine with no rules; every utterance gets the help text.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// The rules in evaluation order.
    pub fn rules(&self) -> &[IntentRule] {
        &self.rules
    }

    fn matching_rule(&self, utterance: &str) -> Option<&IntentRule> {
        let lowered = utterance.to_lowercase();
        self.rules.iter().find(|r| r.trigger.matches(&lowered))
    }

    /// Classify an utterance. Unmatched input is `Intent::Help`.
    pub fn classify(&self, utterance: &str) -> Intent {
        self.matching_rule(utterance)
            .map(|r| r.intent)
            .unwrap_or(Intent::Help)
    }

    /// Classify and render in one pass.
    pub fn reply(&self, utterance: &str, record: &OnboardingRecord) -> Reply {
        match self.matching_rule(utterance) {
            Some(rule) => {
                debug!(intent = %rule.intent, "Utterance matched rule");
                Reply {
                    intent: rule.intent,
                    text: (rule.render)(record),
                }
            }
            None => {
                debug!("No rule matched, falling back to help");
                Reply {
                    intent: Intent::Help,
                    text: templates::help(record),
                }
            }
        }
    }

    /// Response text for an utterance. Total over every input string.
    pub fn respond(&self, utterance: &str, record: &OnboardingRecord) -> String {
        self.reply(utterance, record).text
    }

    /// Greeting for a freshly logged-in employee.
    pub fn welcome_message(&self, employee_name: &str, record: &OnboardingRecord) -> String {
        templates::welcome(employee_name, record)
    }
}

impl Default for DialogueEngine {
    fn default() -> Self {
        Self::default_rules()
    }
}
