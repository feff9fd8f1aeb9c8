//! Application-level configuration.
//!
//! - [`OrchestratorSettings`] — participating agents, synthesizer, per-pattern
//!   timeouts, default project path
//! - [`PatternTimeouts`] — time budget of one invocation per pattern

pub mod settings;

pub use settings::{OrchestratorSettings, PatternTimeouts};
