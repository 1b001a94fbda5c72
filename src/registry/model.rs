//! Project and role catalog entities.

use serde::{Deserialize, Serialize};

/// A repository a project grants access to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubRepo {
    pub name: String,
    pub url: String,
}

impl GithubRepo {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// A project a new hire can be onboarded onto. Keyed by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub github_repos: Vec<GithubRepo>,
    pub slack_channels: Vec<String>,
    /// Role titles offered on this project, in display order.
    pub available_roles: Vec<String>,
}

/// A role definition. Keyed by `title`; shared across projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub title: String,
    pub department: String,
    pub team: String,
    pub manager: String,
    pub manager_email: String,
    #[serde(default)]
    pub additional_channels: Vec<String>,
    pub description: String,
}

/// Serialized catalog layout (`{"projects": [...], "roles": [...]}`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub projects: Vec<Project>,
    pub roles: Vec<Role>,
}

/// Form option for the project picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectOption {
    pub value: String,
    pub label: String,
    pub description: String,
}

/// Form option for the role picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleOption {
    pub value: String,
    pub label: String,
    pub description: String,
}

/// A project role entry whose title has no matching role definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingRole {
    pub project_id: String,
    pub role_title: String,
}
