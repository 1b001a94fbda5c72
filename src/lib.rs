//! Onboard Assist: new-hire intake, simulated provisioning and an
//! onboarding chat assistant.

pub mod chat;
pub mod config;
pub mod dialogue;
pub mod error;
pub mod provisioning;
pub mod registry;
pub mod resolver;
pub mod routes;
pub mod session;
