//! Intent categories recognised by the dialogue engine.

use serde::{Deserialize, Serialize};

/// A classified category of employee utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    ManagerContact,
    Channels,
    Repositories,
    ProjectDetail,
    FirstDay,
    ContactRouting,
    FirstWeek,
    CompanyValues,
    /// Nothing matched; list the topics the assistant can help with.
    Help,
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::ManagerContact => "manager_contact",
            Self::Channels => "channels",
            Self::Repositories => "repositories",
            Self::ProjectDetail => "project_detail",
            Self::FirstDay => "first_day",
            Self::ContactRouting => "contact_routing",
            Self::FirstWeek => "first_week",
            Self::CompanyValues => "company_values",
            Self::Help => "help",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_serde() {
        use Intent::*;
        let intents = [
            ManagerContact,
            Channels,
            Repositories,
            ProjectDetail,
            FirstDay,
            ContactRouting,
            FirstWeek,
            CompanyValues,
            Help,
        ];
        for intent in intents {
            let json = serde_json::to_string(&intent).unwrap();
            assert_eq!(format!("\"{intent}\""), json);
        }
    }
}
