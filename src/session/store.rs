//! `SessionStore` trait and its in-memory and JSON-file backends.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use super::model::{EmployeeSession, store_key};
use crate::error::SessionError;

/// Persistence for employee handoff records.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store a session, replacing any earlier one for the same email, and
    /// make it the current session.
    async fn save(&self, session: &EmployeeSession) -> Result<(), SessionError>;

    /// Look up a session by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> Result<Option<EmployeeSession>, SessionError>;

    /// The most recently saved session.
    async fn current(&self) -> Result<Option<EmployeeSession>, SessionError>;

    /// Identify an employee by name and email.
    async fn login(
        &self,
        name: &str,
        email: &str,
    ) -> Result<Option<EmployeeSession>, SessionError> {
        Ok(self
            .find_by_email(email)
            .await?
            .filter(|s| s.matches_login(name, email)))
    }
}

/// Serialized layout shared by both backends.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionTable {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    current: Option<String>,
    #[serde(default)]
    employees: HashMap<String, EmployeeSession>,
}

impl SessionTable {
    fn insert(&mut self, session: &EmployeeSession) {
        let key = store_key(&session.email);
        self.employees.insert(key.clone(), session.clone());
        self.current = Some(key);
    }

    fn get(&self, email: &str) -> Option<EmployeeSession> {
        self.employees.get(&store_key(email)).cloned()
    }

    fn current(&self) -> Option<EmployeeSession> {
        self.current
            .as_ref()
            .and_then(|key| self.employees.get(key))
            .cloned()
    }
}

/// Process-local store; contents vanish on restart.
#[derive(Default)]
pub struct MemorySessionStore {
    table: RwLock<SessionTable>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn save(&self, session: &EmployeeSession) -> Result<(), SessionError> {
        self.table.write().await.insert(session);
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<EmployeeSession>, SessionError> {
        Ok(self.table.read().await.get(email))
    }

    async fn current(&self) -> Result<Option<EmployeeSession>, SessionError> {
        Ok(self.table.read().await.current())
    }
}

/// Store backed by a single JSON file, rewritten on every save.
pub struct JsonFileSessionStore {
    path: PathBuf,
    table: Mutex<SessionTable>,
}

impl JsonFileSessionStore {
    /// Open the store at `path`, starting empty if the file does not exist.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let path = path.into();
        let table = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => SessionTable::default(),
            Err(e) => return Err(e.into()),
        };
        info!(
            path = %path.display(),
            employees = table.employees.len(),
            "Opened session store"
        );
        Ok(Self {
            path,
            table: Mutex::new(table),
        })
    }

    async fn persist(&self, table: &SessionTable) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let json = serde_json::to_vec_pretty(table)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        debug!(path = %self.path.display(), "Persisted session store");
        Ok(())
    }
}

#[async_trait]
impl SessionStore for JsonFileSessionStore {
    async fn save(&self, session: &EmployeeSession) -> Result<(), SessionError> {
        // Hold the lock across the write so concurrent saves hit disk in order.
        // The in-memory table only changes once the file is written.
        let mut table = self.table.lock().await;
        let mut next = table.clone();
        next.insert(session);
        self.persist(&next).await?;
        *table = next;
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<EmployeeSession>, SessionError> {
        Ok(self.table.lock().await.get(email))
    }

    async fn current(&self) -> Result<Option<EmployeeSession>, SessionError> {
        Ok(self.table.lock().await.current())
    }
}
