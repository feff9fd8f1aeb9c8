//! Run Consensus use case
//!
//! Parallel answers from every agent, then a single synthesis over the
//! successful ones.

use crate::error::OrchestrationError;
use crate::ports::agent_runner::AgentRunner;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::shared::{check_agents, display_name, fan_out, named_answers};
use council_domain::{
    AgentKind, AgentResponse, ConsensusResult, MERGE_SYNTHESIZER_ID, Phase, Prompt,
    PromptTemplate, merge_answers,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Input for the RunConsensus use case
#[derive(Debug, Clone)]
pub struct RunConsensusInput {
    pub prompt: Prompt,
    pub agents: Vec<AgentKind>,
    /// Agent that writes the synthesis; `None` merges without a model call
    pub synthesizer: Option<AgentKind>,
    pub timeout: Duration,
}

impl RunConsensusInput {
    pub fn new(prompt: Prompt, agents: Vec<AgentKind>, timeout: Duration) -> Self {
        Self {
            prompt,
            agents,
            synthesizer: Some(AgentKind::Gemini),
            timeout,
        }
    }

    pub fn with_synthesizer(mut self, synthesizer: Option<AgentKind>) -> Self {
        self.synthesizer = synthesizer;
        self
    }
}

/// Use case for running a consensus
pub struct RunConsensusUseCase<R: AgentRunner + 'static> {
    runner: Arc<R>,
}

impl<R: AgentRunner + 'static> RunConsensusUseCase<R> {
    pub fn new(runner: Arc<R>) -> Self {
        Self { runner }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: RunConsensusInput,
    ) -> Result<ConsensusResult, OrchestrationError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunConsensusInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<ConsensusResult, OrchestrationError> {
        check_agents(&input.agents)?;

        let topic = input.prompt.body().to_string();
        info!("Starting consensus with {} agents", input.agents.len());

        // Phase 1: independent answers
        let calls = input
            .agents
            .iter()
            .map(|a| (*a, input.prompt.clone()))
            .collect();
        let individual = fan_out(&self.runner, calls, input.timeout, &Phase::Ask, progress).await;

        let answers = named_answers(&individual);
        if answers.is_empty() {
            warn!("All agents failed, skipping synthesis");
            return Ok(ConsensusResult::all_failed(topic, individual));
        }

        // Phase 2: synthesis over the successful subset
        let synthesis = self
            .phase_synthesis(&input, &topic, &answers, progress)
            .await;

        Ok(ConsensusResult::new(topic, individual, synthesis))
    }

    async fn phase_synthesis(
        &self,
        input: &RunConsensusInput,
        topic: &str,
        answers: &[(String, String)],
        progress: &dyn ProgressNotifier,
    ) -> AgentResponse {
        progress.on_phase_start(&Phase::Synthesis, 1);

        let synthesis = match input.synthesizer {
            Some(synthesizer) => {
                info!(
                    "Synthesizing {} answers with {}",
                    answers.len(),
                    display_name(synthesizer.as_str())
                );
                let body = PromptTemplate::consensus_synthesis(topic, answers);
                let prompt = input.prompt.with_body(body);
                self.runner.invoke(synthesizer, &prompt, input.timeout).await
            }
            None => {
                debug!("No synthesizer configured, merging {} answers", answers.len());
                let started = Instant::now();
                AgentResponse::success(MERGE_SYNTHESIZER_ID, merge_answers(topic, answers))
                    .with_duration(started.elapsed())
            }
        };

        progress.on_task_complete(&Phase::Synthesis, &synthesis.agent, synthesis.success);
        progress.on_phase_complete(&Phase::Synthesis);
        synthesis
    }
}
