//! Error types for the onboarding portal.

use std::path::PathBuf;

use crate::provisioning::StepKey;

/// Top-level error type for the portal.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to read catalog {path}: {source}")]
    CatalogRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog {path}: {source}")]
    CatalogParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Duplicate {entity} key in catalog: {key}")]
    DuplicateKey { entity: &'static str, key: String },

    #[error("Project {project_id} lists unknown role {role_title}")]
    DanglingRole {
        project_id: String,
        role_title: String,
    },
}

/// Failures turning a (project, role) selection into an onboarding record.
///
/// Both variants are user-correctable: the caller should re-prompt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolutionError {
    #[error("Unknown project: {project_id}")]
    UnknownProject { project_id: String },

    #[error("Unknown role: {role_title}")]
    UnknownRole { role_title: String },
}

/// Provisioning step failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProvisioningError {
    #[error("Step {key} failed after {attempts} attempt(s): {reason}")]
    StepFailed {
        key: StepKey,
        attempts: u32,
        reason: String,
    },

    #[error("Step {key} cannot move from {from} to {to}")]
    InvalidTransition {
        key: StepKey,
        from: String,
        to: String,
    },
}

/// Session persistence errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for the portal.
pub type Result<T> = std::result::Result<T, Error>;
