//! Configuration types.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;
use crate::provisioning::{StepSpec, default_plan};

/// Pause after the last provisioning step before success is shown.
pub const DEFAULT_SETTLE: Duration = Duration::from_millis(500);

/// "Composing…" delay before each assistant reply: `base` plus a uniform
/// random extra of up to `jitter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComposingDelay {
    pub base: Duration,
    pub jitter: Duration,
}

impl ComposingDelay {
    pub const NONE: ComposingDelay = ComposingDelay {
        base: Duration::ZERO,
        jitter: Duration::ZERO,
    };

    /// Pick a concrete delay for one reply.
    pub fn sample(&self) -> Duration {
        use rand::Rng;

        let jitter_ms = self.jitter.as_millis() as u64;
        if jitter_ms == 0 {
            return self.base;
        }
        self.base + Duration::from_millis(rand::thread_rng().gen_range(0..=jitter_ms))
    }
}

impl Default for ComposingDelay {
    fn default() -> Self {
        Self {
            base: Duration::from_millis(1000),
            jitter: Duration::from_millis(1000),
        }
    }
}

/// Portal configuration.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// HTTP listen port.
    pub port: u16,
    /// JSON file holding employee sessions.
    pub sessions_path: PathBuf,
    /// Alternative catalog file; the built-in catalog is used when unset.
    pub catalog_path: Option<PathBuf>,
    /// Refuse to start when a project lists an undefined role.
    pub strict_catalog: bool,
    /// Delay applied before each chat reply.
    pub composing_delay: ComposingDelay,
    /// Provisioning steps and their simulated durations.
    pub provisioning_plan: Vec<StepSpec>,
    /// Pause after the last provisioning step.
    pub provisioning_settle: Duration,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            sessions_path: PathBuf::from("./data/sessions.json"),
            catalog_path: None,
            strict_catalog: false,
            composing_delay: ComposingDelay::default(),
            provisioning_plan: default_plan(),
            provisioning_settle: DEFAULT_SETTLE,
        }
    }
}

impl PortalConfig {
    /// Build config from `ONBOARD_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary variable source. Unset keys keep their
    /// defaults; set but unparseable keys are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = parse_or(&lookup, "ONBOARD_PORT", defaults.port)?;
        let sessions_path = lookup("ONBOARD_SESSIONS_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.sessions_path);
        let catalog_path = lookup("ONBOARD_CATALOG_PATH")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);
        let strict_catalog = match lookup("ONBOARD_STRICT_CATALOG") {
            Some(raw) => parse_flag("ONBOARD_STRICT_CATALOG", &raw)?,
            None => defaults.strict_catalog,
        };
        let delay_ms: u64 = parse_or(
            &lookup,
            "ONBOARD_CHAT_DELAY_MS",
            defaults.composing_delay.base.as_millis() as u64,
        )?;
        let jitter_ms: u64 = parse_or(
            &lookup,
            "ONBOARD_CHAT_JITTER_MS",
            defaults.composing_delay.jitter.as_millis() as u64,
        )?;

        Ok(Self {
            port,
            sessions_path,
            catalog_path,
            strict_catalog,
            composing_delay: ComposingDelay {
                base: Duration::from_millis(delay_ms),
                jitter: Duration::from_millis(jitter_ms),
            },
            ..defaults
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("{raw:?}: {e}"),
        }),
        None => Ok(default),
    }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("expected a boolean, got {other:?}"),
        }),
    }
}
