//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Every variant is a validation failure: it is raised before any agent
/// process is spawned and rejects the call outright.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Prompt cannot be empty")]
    EmptyPrompt,

    #[error("Unknown agent: {0} (expected one of: codex, gemini)")]
    UnknownAgent(String),

    #[error("Debate rounds must be between {min} and {max}, got {got}")]
    InvalidRounds { got: i64, min: u8, max: u8 },

    #[error("Orchestrator answer cannot be empty")]
    EmptyOrchestratorAnswer,

    #[error("No agents configured")]
    NoAgents,

    #[error("Agent listed more than once: {0}")]
    DuplicateAgent(String),

    #[error("Timeout must be greater than zero")]
    InvalidTimeout,
}

impl DomainError {
    /// Stable machine-readable code, used in structured output.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::EmptyPrompt => "empty_prompt",
            DomainError::UnknownAgent(_) => "unknown_agent",
            DomainError::InvalidRounds { .. } => "invalid_rounds",
            DomainError::EmptyOrchestratorAnswer => "empty_orchestrator_answer",
            DomainError::NoAgents => "no_agents",
            DomainError::DuplicateAgent(_) => "duplicate_agent",
            DomainError::InvalidTimeout => "invalid_timeout",
        }
    }
}
