//! Run Council use case
//!
//! Stage 1 collects the orchestrating party's answer and one answer per
//! agent. Stage 2 sends one anonymized bundle to every agent for review.
//! Stage 3 (chairman) belongs to the caller: the record returned here is
//! its input.

use crate::error::OrchestrationError;
use crate::ports::agent_runner::AgentRunner;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::shared::{check_agents, fan_out};
use council_domain::{
    AgentKind, AgentResponse, AnonymizedBundle, CouncilRecord, DomainError, ORCHESTRATOR_ID,
    Phase, Prompt, PromptTemplate,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Fewest successful answers worth a peer review.
const MIN_REVIEWABLE_ANSWERS: usize = 2;

/// Input for the RunCouncil use case
#[derive(Debug, Clone)]
pub struct RunCouncilInput {
    pub prompt: Prompt,
    /// The orchestrating party's own answer to the same prompt
    pub orchestrator_answer: String,
    pub agents: Vec<AgentKind>,
    pub timeout: Duration,
}

impl RunCouncilInput {
    pub fn new(
        prompt: Prompt,
        orchestrator_answer: impl Into<String>,
        agents: Vec<AgentKind>,
        timeout: Duration,
    ) -> Self {
        Self {
            prompt,
            orchestrator_answer: orchestrator_answer.into(),
            agents,
            timeout,
        }
    }
}

/// Use case for running a council
pub struct RunCouncilUseCase<R: AgentRunner + 'static> {
    runner: Arc<R>,
    rng: Mutex<StdRng>,
}

impl<R: AgentRunner + 'static> RunCouncilUseCase<R> {
    pub fn new(runner: Arc<R>) -> Self {
        Self {
            runner,
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Use a seeded label shuffle (reproducible assignments).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: RunCouncilInput) -> Result<CouncilRecord, OrchestrationError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunCouncilInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<CouncilRecord, OrchestrationError> {
        if input.orchestrator_answer.trim().is_empty() {
            return Err(DomainError::EmptyOrchestratorAnswer.into());
        }
        check_agents(&input.agents)?;

        let topic = input.prompt.body().to_string();
        info!("Starting council with {} agents", input.agents.len());

        // Stage 1: Individual
        let individual = self.stage_individual(&input, progress).await;

        let successful = individual.iter().filter(|r| r.success).count();
        if successful < MIN_REVIEWABLE_ANSWERS {
            warn!(
                "Only {} successful answer(s), skipping peer review",
                successful
            );
            return Ok(CouncilRecord::individual_only(
                topic,
                individual,
                format!(
                    "fewer than {} successful answers ({})",
                    MIN_REVIEWABLE_ANSWERS, successful
                ),
            ));
        }

        // Stage 2: Peer Review
        let (bundle, map) = {
            let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
            AnonymizedBundle::build(&individual, &mut *rng)
        };
        debug!("Anonymized {} answers for review", bundle.len());

        let review_body = PromptTemplate::council_review(&topic, &bundle);
        let review_prompt = input.prompt.with_body(review_body.clone());
        let calls = input
            .agents
            .iter()
            .map(|agent| (*agent, review_prompt.clone()))
            .collect();
        let peer_reviews = fan_out(
            &self.runner,
            calls,
            input.timeout,
            &Phase::PeerReview,
            progress,
        )
        .await;

        // Stage 3 (chairman) is the caller's own step
        Ok(CouncilRecord::reviewed(
            topic,
            individual,
            peer_reviews,
            review_body,
            map,
        ))
    }

    /// The orchestrator's answer first, then one answer per agent.
    async fn stage_individual(
        &self,
        input: &RunCouncilInput,
        progress: &dyn ProgressNotifier,
    ) -> Vec<AgentResponse> {
        let calls = input
            .agents
            .iter()
            .map(|agent| (*agent, input.prompt.clone()))
            .collect();
        let responses = fan_out(
            &self.runner,
            calls,
            input.timeout,
            &Phase::Individual,
            progress,
        )
        .await;

        let mut individual = Vec::with_capacity(responses.len() + 1);
        individual.push(AgentResponse::success(
            ORCHESTRATOR_ID,
            input.orchestrator_answer.clone(),
        ));
        individual.extend(responses);
        individual
    }
}
