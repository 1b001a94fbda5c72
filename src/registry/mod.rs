//! Read-only catalog of projects and roles.
//!
//! The registry is built once at startup (from the built-in catalog or a JSON
//! file) and shared behind an `Arc`. Lookups are exact-match only: project ids
//! and role titles must match as stored, with no case folding.

pub mod catalog;
pub mod model;

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::ConfigError;

pub use catalog::builtin_catalog;
pub use model::{Catalog, DanglingRole, GithubRepo, Project, ProjectOption, Role, RoleOption};

/// Static catalog of projects and roles.
#[derive(Debug, Clone)]
pub struct Registry {
    /// Projects in catalog order (form display order).
    projects: Vec<Project>,
    project_index: HashMap<String, usize>,
    roles: HashMap<String, Role>,
}

impl Registry {
    /// Registry over the compiled-in catalog.
    pub fn builtin() -> Self {
        let (registry, _duplicates) = Self::index(builtin_catalog());
        registry
    }

    /// Build a registry from a catalog, rejecting duplicate keys.
    pub fn from_catalog(catalog: Catalog) -> Result<Self, ConfigError> {
        let (registry, duplicates) = Self::index(catalog);
        match duplicates.into_iter().next() {
            Some((entity, key)) => Err(ConfigError::DuplicateKey { entity, key }),
            None => Ok(registry),
        }
    }

    /// Load a JSON catalog file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::CatalogRead {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog: Catalog =
            serde_json::from_str(&raw).map_err(|source| ConfigError::CatalogParse {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(
            path = %path.display(),
            projects = catalog.projects.len(),
            roles = catalog.roles.len(),
            "Loaded catalog"
        );
        Self::from_catalog(catalog)
    }

    fn index(catalog: Catalog) -> (Self, Vec<(&'static str, String)>) {
        let mut duplicates = Vec::new();

        let mut projects = Vec::with_capacity(catalog.projects.len());
        let mut project_index = HashMap::with_capacity(catalog.projects.len());
        for project in catalog.projects {
            if project_index.contains_key(&project.id) {
                duplicates.push(("project", project.id));
                continue;
            }
            project_index.insert(project.id.clone(), projects.len());
            projects.push(project);
        }

        let mut roles = HashMap::with_capacity(catalog.roles.len());
        for role in catalog.roles {
            if roles.contains_key(&role.title) {
                duplicates.push(("role", role.title));
                continue;
            }
            roles.insert(role.title.clone(), role);
        }

        (
            Self {
                projects,
                project_index,
                roles,
            },
            duplicates,
        )
    }

    /// Look up a project by exact id.
    pub fn lookup_project(&self, id: &str) -> Option<&Project> {
        self.project_index.get(id).map(|&i| &self.projects[i])
    }

    /// Look up a role by exact title.
    pub fn lookup_role(&self, title: &str) -> Option<&Role> {
        self.roles.get(title)
    }

    /// All projects in catalog order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Number of role definitions.
    pub fn role_count(&self) -> usize {
        self.roles.len()
    }

    /// Project picker options, in catalog order.
    pub fn project_options(&self) -> Vec<ProjectOption> {
        self.projects
            .iter()
            .map(|p| ProjectOption {
                value: p.id.clone(),
                label: p.name.clone(),
                description: p.description.clone(),
            })
            .collect()
    }

    /// Role picker options for a project. Unknown projects yield no options.
    pub fn role_options_for_project(&self, project_id: &str) -> Vec<RoleOption> {
        let Some(project) = self.lookup_project(project_id) else {
            return Vec::new();
        };
        project
            .available_roles
            .iter()
            .map(|title| RoleOption {
                value: title.clone(),
                label: title.clone(),
                description: self
                    .lookup_role(title)
                    .map(|r| r.description.clone())
                    .unwrap_or_default(),
            })
            .collect()
    }

    /// Project role titles with no matching role definition.
    pub fn dangling_roles(&self) -> Vec<DanglingRole> {
        self.projects
            .iter()
            .flat_map(|p| {
                p.available_roles
                    .iter()
                    .filter(|title| !self.roles.contains_key(title.as_str()))
                    .map(|title| DanglingRole {
                        project_id: p.id.clone(),
                        role_title: title.clone(),
                    })
            })
            .collect()
    }

    /// Check referential integrity between projects and roles.
    ///
    /// Dangling titles are logged; with `strict` the first one is an error.
    pub fn validate(&self, strict: bool) -> Result<(), ConfigError> {
        let dangling = self.dangling_roles();
        for d in &dangling {
            warn!(
                project = %d.project_id,
                role = %d.role_title,
                "Project lists a role with no definition"
            );
        }
        match dangling.into_iter().next() {
            Some(d) if strict => Err(ConfigError::DanglingRole {
                project_id: d.project_id,
                role_title: d.role_title,
            }),
            _ => Ok(()),
        }
    }
}
