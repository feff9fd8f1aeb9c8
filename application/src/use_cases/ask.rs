//! Ask use case
//!
//! One prompt to one agent, or the same prompt to many agents in parallel.

use crate::ports::agent_runner::AgentRunner;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::shared::fan_out;
use council_domain::{AgentKind, AgentResponse, Phase, Prompt};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Use case for single and parallel asks
pub struct AskUseCase<R: AgentRunner + 'static> {
    runner: Arc<R>,
}

impl<R: AgentRunner + 'static> AskUseCase<R> {
    pub fn new(runner: Arc<R>) -> Self {
        Self { runner }
    }

    /// Ask one agent.
    pub async fn ask_single(
        &self,
        agent: AgentKind,
        prompt: &Prompt,
        timeout: Duration,
    ) -> AgentResponse {
        info!("Asking {}", agent.display_name());
        self.runner.invoke(agent, prompt, timeout).await
    }

    /// Ask every agent concurrently, with default (no-op) progress.
    pub async fn ask_many(
        &self,
        agents: &[AgentKind],
        prompt: &Prompt,
        timeout: Duration,
    ) -> Vec<AgentResponse> {
        self.ask_many_with_progress(agents, prompt, timeout, &NoProgress)
            .await
    }

    /// Ask every agent concurrently.
    ///
    /// Returns exactly one response per agent, in the order given.
    pub async fn ask_many_with_progress(
        &self,
        agents: &[AgentKind],
        prompt: &Prompt,
        timeout: Duration,
        progress: &dyn ProgressNotifier,
    ) -> Vec<AgentResponse> {
        info!("Asking {} agents in parallel", agents.len());
        let calls = agents.iter().map(|a| (*a, prompt.clone())).collect();
        fan_out(&self.runner, calls, timeout, &Phase::Ask, progress).await
    }
}
