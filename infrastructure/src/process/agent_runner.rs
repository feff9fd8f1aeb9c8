//! [`AgentRunner`] backed by real CLI processes.

use super::runner::ProcessRunner;
use crate::agents::AgentAdapter;
use crate::config::FileConfig;
use async_trait::async_trait;
use council_application::AgentRunner;
use council_domain::{AgentKind, AgentResponse, FailureKind, Prompt};
use std::collections::HashMap;
use std::time::Duration;
use tracing::info;

/// Maps each agent to its adapter and runs it through a [`ProcessRunner`].
pub struct ProcessAgentRunner {
    adapters: HashMap<AgentKind, AgentAdapter>,
    process: ProcessRunner,
}

impl ProcessAgentRunner {
    pub fn new(process: ProcessRunner) -> Self {
        Self {
            adapters: HashMap::new(),
            process,
        }
    }

    /// One adapter per known agent, built from the file configuration.
    pub fn from_config(config: &FileConfig, process: ProcessRunner) -> Self {
        AgentKind::all()
            .into_iter()
            .fold(Self::new(process), |runner, agent| {
                let adapter = config.agents.get(agent).to_adapter(agent);
                runner.with_adapter(agent, adapter)
            })
    }

    pub fn with_adapter(mut self, agent: AgentKind, adapter: AgentAdapter) -> Self {
        self.adapters.insert(agent, adapter);
        self
    }

    pub fn adapter(&self, agent: AgentKind) -> Option<&AgentAdapter> {
        self.adapters.get(&agent)
    }
}

#[async_trait]
impl AgentRunner for ProcessAgentRunner {
    async fn invoke(&self, agent: AgentKind, prompt: &Prompt, timeout: Duration) -> AgentResponse {
        let Some(adapter) = self.adapters.get(&agent) else {
            return AgentResponse::failure(
                agent.as_str(),
                FailureKind::SpawnFailure,
                format!("no adapter configured for {}", agent),
            );
        };

        info!("Invoking {} (timeout {:?})", agent, timeout);
        self.process.invoke(adapter, prompt, timeout).await
    }
}
