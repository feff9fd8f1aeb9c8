//! Core domain concepts shared across all subdomains.
//!
//! - [`agent::AgentKind`] — the external CLI agents a council can call
//! - [`prompt::Prompt`] — a validated prompt (preamble + body)
//! - [`error::DomainError`] — validation errors raised before any spawn

pub mod agent;
pub mod error;
pub mod prompt;
pub mod string;
