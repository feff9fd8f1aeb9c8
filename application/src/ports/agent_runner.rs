//! Agent runner port
//!
//! Defines how the application layer calls an external CLI agent.

use async_trait::async_trait;
use council_domain::{AgentKind, AgentResponse, Prompt};
use std::time::Duration;

/// Runs one prompt through one agent.
///
/// Implementations (adapters) live in the infrastructure layer. They never
/// return an error: spawn failures, timeouts, non-zero exits and malformed
/// output all come back as a failed [`AgentResponse`].
///
/// Dropping the returned future must stop the underlying invocation.
#[async_trait]
pub trait AgentRunner: Send + Sync {
    /// Invoke `agent` with `prompt`, bounded by `timeout`.
    async fn invoke(&self, agent: AgentKind, prompt: &Prompt, timeout: Duration) -> AgentResponse;
}
