//! Infrastructure layer for agent-council
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: agent CLI adapters, the process runner,
//! configuration file loading and the local context loader.

pub mod agents;
pub mod config;
pub mod context;
pub mod process;

// Re-export commonly used types
pub use agents::{
    AgentAdapter, CodexAdapter, GeminiAdapter, Invocation, JsonLineAdapter, PromptDelivery,
    resolve_command,
};
pub use config::{
    ConfigLoader, ConfigValidationError, FileAgentConfig, FileConfig, FileOutputConfig,
    FileOutputFormat,
};
pub use context::LocalContextLoader;
pub use process::{ProcessAgentRunner, ProcessRunner};
