//! Application layer for agent-council
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use config::{OrchestratorSettings, PatternTimeouts};
pub use error::OrchestrationError;
pub use orchestrator::{CallOptions, Orchestrator};
pub use ports::{
    agent_runner::AgentRunner,
    context_loader::{ContextLoaderPort, NoContext},
    progress::{NoProgress, ProgressNotifier},
};
pub use use_cases::ask::AskUseCase;
pub use use_cases::consensus::{RunConsensusInput, RunConsensusUseCase};
pub use use_cases::council::{RunCouncilInput, RunCouncilUseCase};
pub use use_cases::debate::{RunDebateInput, RunDebateUseCase};
