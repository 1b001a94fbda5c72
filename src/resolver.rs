//! Turns a (project, role) selection into an `OnboardingRecord`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ResolutionError;
use crate::registry::{GithubRepo, Project, Registry, Role};

/// Project facts copied into a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub name: String,
    pub description: String,
    pub repos: Vec<GithubRepo>,
}

/// Role facts copied into a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleSummary {
    pub title: String,
    pub department: String,
    pub team: String,
    pub manager: String,
    pub manager_email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackAccess {
    /// Deduplicated channels, first-seen order (project channels first).
    pub channels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubAccess {
    pub repos: Vec<GithubRepo>,
}

/// Resolved provisioning facts for one employee.
///
/// Owns copies of everything it needs; later catalog changes never reach a
/// record that was already built. Share it read-only behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingRecord {
    pub project: ProjectSummary,
    pub role: RoleSummary,
    pub slack: SlackAccess,
    pub github: GithubAccess,
}

impl OnboardingRecord {
    fn build(project: &Project, role: &Role) -> Self {
        Self {
            project: ProjectSummary {
                name: project.name.clone(),
                description: project.description.clone(),
                repos: project.github_repos.clone(),
            },
            role: RoleSummary {
                title: role.title.clone(),
                department: role.department.clone(),
                team: role.team.clone(),
                manager: role.manager.clone(),
                manager_email: role.manager_email.clone(),
            },
            slack: SlackAccess {
                channels: merge_channels(project, role),
            },
            github: GithubAccess {
                repos: project.github_repos.clone(),
            },
        }
    }

    /// Channel names joined for display.
    pub fn channel_list(&self) -> String {
        self.slack.channels.join(", ")
    }

    /// Repository names joined for display.
    pub fn repo_names(&self) -> String {
        self.github
            .repos
            .iter()
            .map(|r| r.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Manager line as shown in summaries: `Name (Team)`.
    pub fn manager_line(&self) -> String {
        format!("{} ({})", self.role.manager, self.role.team)
    }

    /// Plain-text summary of what was provisioned.
    pub fn summary(&self) -> String {
        [
            format!("Slack Channels: {}", self.channel_list()),
            format!("GitHub Repos: {}", self.repo_names()),
            format!("Manager: {}", self.manager_line()),
            format!("Manager email: {}", self.role.manager_email),
        ]
        .join("\n")
    }
}

fn merge_channels(project: &Project, role: &Role) -> Vec<String> {
    let mut channels: Vec<String> = Vec::new();
    for channel in project
        .slack_channels
        .iter()
        .chain(role.additional_channels.iter())
    {
        if !channels.contains(channel) {
            channels.push(channel.clone());
        }
    }
    channels
}

/// Resolves selections against a shared registry.
#[derive(Debug, Clone)]
pub struct Resolver {
    registry: Arc<Registry>,
}

impl Resolver {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    fn lookup(
        &self,
        project_id: &str,
        role_title: &str,
    ) -> Result<(&Project, &Role), ResolutionError> {
        let project = self.registry.lookup_project(project_id).ok_or_else(|| {
            ResolutionError::UnknownProject {
                project_id: project_id.to_string(),
            }
        })?;
        let role = self
            .registry
            .lookup_role(role_title)
            .ok_or_else(|| ResolutionError::UnknownRole {
                role_title: role_title.to_string(),
            })?;
        Ok((project, role))
    }

    /// Build the onboarding record for a project and role.
    ///
    /// An unknown project is reported before an unknown role.
    pub fn resolve(
        &self,
        project_id: &str,
        role_title: &str,
    ) -> Result<OnboardingRecord, ResolutionError> {
        let (project, role) = self.lookup(project_id, role_title)?;
        let record = OnboardingRecord::build(project, role);
        debug!(
            project = %project_id,
            role = %role_title,
            channels = record.slack.channels.len(),
            repos = record.github.repos.len(),
            "Resolved onboarding record"
        );
        Ok(record)
    }

    /// The deduplicated channel set alone, with the same failure rules as `resolve`.
    pub fn channels_for(
        &self,
        project_id: &str,
        role_title: &str,
    ) -> Result<Vec<String>, ResolutionError> {
        let (project, role) = self.lookup(project_id, role_title)?;
        Ok(merge_channels(project, role))
    }
}
