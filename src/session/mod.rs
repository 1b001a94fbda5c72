//! Employee session handoff between intake and the chat portal.

pub mod model;
pub mod store;

pub use model::EmployeeSession;
pub use store::{JsonFileSessionStore, MemorySessionStore, SessionStore};
