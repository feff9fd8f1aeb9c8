//! Process execution for agent CLIs
//!
//! - [`ProcessRunner`] - spawn, time-bound and reap one child per call
//! - [`ProcessAgentRunner`] - the application's `AgentRunner` port over it

mod agent_runner;
mod runner;

pub use agent_runner::ProcessAgentRunner;
pub use runner::{DEFAULT_KILL_GRACE, ProcessRunner};
