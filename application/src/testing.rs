//! Test doubles shared by the use case tests.

use crate::ports::agent_runner::AgentRunner;
use async_trait::async_trait;
use council_domain::{AgentKind, AgentResponse, Prompt};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

type Reply = dyn Fn(AgentKind, &Prompt) -> AgentResponse + Send + Sync;

/// Records every invocation and answers with a scripted reply.
pub(crate) struct MockRunner {
    calls: Mutex<Vec<(AgentKind, String)>>,
    delays: HashMap<AgentKind, Duration>,
    reply: Box<Reply>,
}

impl MockRunner {
    pub(crate) fn new(
        reply: impl Fn(AgentKind, &Prompt) -> AgentResponse + Send + Sync + 'static,
    ) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            delays: HashMap::new(),
            reply: Box::new(reply),
        }
    }

    /// Every agent answers `"<agent> on: <body>"`.
    pub(crate) fn echo() -> Self {
        Self::new(|agent, prompt| {
            AgentResponse::success(agent.as_str(), format!("{} on: {}", agent, prompt.body()))
        })
    }

    pub(crate) fn with_delay(mut self, agent: AgentKind, delay: Duration) -> Self {
        self.delays.insert(agent, delay);
        self
    }

    /// `(agent, rendered prompt)` in invocation order.
    pub(crate) fn calls(&self) -> Vec<(AgentKind, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn prompts_for(&self, agent: AgentKind) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|(a, _)| *a == agent)
            .map(|(_, prompt)| prompt)
            .collect()
    }
}

#[async_trait]
impl AgentRunner for MockRunner {
    async fn invoke(&self, agent: AgentKind, prompt: &Prompt, _timeout: Duration) -> AgentResponse {
        self.calls.lock().unwrap().push((agent, prompt.render()));
        if let Some(delay) = self.delays.get(&agent) {
            tokio::time::sleep(*delay).await;
        }
        (self.reply)(agent, prompt)
    }
}
