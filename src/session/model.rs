//! Persisted employee handoff record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::resolver::OnboardingRecord;

/// Written once when the HR form resolves; read back at login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSession {
    pub name: String,
    pub email: String,
    pub project: String,
    pub role: String,
    pub onboarding_data: OnboardingRecord,
    pub onboarded_at: DateTime<Utc>,
}

impl EmployeeSession {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        project: impl Into<String>,
        role: impl Into<String>,
        onboarding_data: OnboardingRecord,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            project: project.into(),
            role: role.into(),
            onboarding_data,
            onboarded_at: Utc::now(),
        }
    }

    /// Up to two uppercase initials, e.g. "Jordan Lee" → "JL".
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect()
    }

    /// Case-insensitive match on name and email.
    pub fn matches_login(&self, name: &str, email: &str) -> bool {
        self.name.trim().to_lowercase() == name.trim().to_lowercase()
            && store_key(&self.email) == store_key(email)
    }
}

/// Normalized email used to key stored sessions.
pub(crate) fn store_key(email: &str) -> String {
    email.trim().to_lowercase()
}
