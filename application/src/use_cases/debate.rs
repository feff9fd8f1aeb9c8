//! Run Debate use case
//!
//! Rounds run strictly in sequence; the agents inside one round run
//! concurrently. From round 2 on, each agent sees its own previous answer
//! and every other agent's previous answer.

use crate::error::OrchestrationError;
use crate::ports::agent_runner::AgentRunner;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::shared::{check_agents, fan_out};
use council_domain::{
    AgentKind, DebateRounds, DebateState, DebateTranscript, Phase, Prompt,
    PromptTemplate,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Input for the RunDebate use case
#[derive(Debug, Clone)]
pub struct RunDebateInput {
    pub prompt: Prompt,
    pub agents: Vec<AgentKind>,
    pub rounds: DebateRounds,
    pub timeout: Duration,
}

impl RunDebateInput {
    pub fn new(
        prompt: Prompt,
        agents: Vec<AgentKind>,
        rounds: DebateRounds,
        timeout: Duration,
    ) -> Self {
        Self {
            prompt,
            agents,
            rounds,
            timeout,
        }
    }
}

/// Use case for running a multi-round debate
pub struct RunDebateUseCase<R: AgentRunner + 'static> {
    runner: Arc<R>,
}

impl<R: AgentRunner + 'static> RunDebateUseCase<R> {
    pub fn new(runner: Arc<R>) -> Self {
        Self { runner }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: RunDebateInput,
    ) -> Result<DebateTranscript, OrchestrationError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunDebateInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<DebateTranscript, OrchestrationError> {
        check_agents(&input.agents)?;

        let total = input.rounds;
        info!(
            "Starting {}-round debate with {} agents",
            total.get(),
            input.agents.len()
        );

        let mut transcript = DebateTranscript::new(input.prompt.body());
        let mut state = DebateState::start();

        while let DebateState::RoundPending(round) = state {
            let calls = input
                .agents
                .iter()
                .map(|agent| (*agent, Self::round_prompt(&input, &transcript, *agent, round)))
                .collect();

            let responses = fan_out(
                &self.runner,
                calls,
                input.timeout,
                &Phase::DebateRound(round),
                progress,
            )
            .await;
            transcript.push_round(responses);

            state = state.advance(total);
            debug!("Round {} complete", round);
            state = state.advance(total);
        }

        Ok(transcript)
    }

    /// Round 1 is the topic itself; later rounds carry the previous answers.
    fn round_prompt(
        input: &RunDebateInput,
        transcript: &DebateTranscript,
        agent: AgentKind,
        round: u8,
    ) -> Prompt {
        if round == 1 {
            return input.prompt.clone();
        }

        let own = transcript.carried_answer(agent);
        let others: Vec<(String, String)> = input
            .agents
            .iter()
            .filter(|other| **other != agent)
            .map(|other| {
                (
                    other.display_name().to_string(),
                    transcript.carried_answer(*other),
                )
            })
            .collect();

        input.prompt.with_body(PromptTemplate::debate_round(
            &transcript.topic,
            round,
            input.rounds.get(),
            &own,
            &others,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockRunner;
    use council_domain::{AgentResponse, FailureKind};

    fn input(rounds: u8) -> RunDebateInput {
        RunDebateInput::new(
            Prompt::new("Monorepo or polyrepo?").unwrap(),
            vec![AgentKind::Codex, AgentKind::Gemini],
            DebateRounds::new(i64::from(rounds)).unwrap(),
            Duration::from_secs(10),
        )
    }

    /// Each answer names the agent and how many prompts it has seen.
    fn counting_runner() -> MockRunner {
        let seen = std::sync::Mutex::new(std::collections::HashMap::<AgentKind, u8>::new());
        MockRunner::new(move |agent, _| {
            let mut seen = seen.lock().unwrap();
            let n = seen.entry(agent).or_insert(0);
            *n += 1;
            AgentResponse::success(agent.as_str(), format!("{} round {} text", agent, n))
        })
    }

    #[tokio::test]
    async fn test_three_rounds_thread_previous_answers() {
        let runner = Arc::new(counting_runner());
        let use_case = RunDebateUseCase::new(Arc::clone(&runner));

        let transcript = use_case.execute(input(3)).await.unwrap();

        assert_eq!(transcript.rounds.len(), 3);
        assert_eq!(transcript.final_round().unwrap().round, 3);

        for agent in [AgentKind::Codex, AgentKind::Gemini] {
            let prompts = runner.prompts_for(agent);
            assert_eq!(prompts.len(), 3);
            assert_eq!(prompts[0], "Monorepo or polyrepo?");
            for k in 1..=2u8 {
                let body = &prompts[k as usize];
                assert!(body.contains(&format!("codex round {} text", k)));
                assert!(body.contains(&format!("gemini round {} text", k)));
                assert!(body.contains(&format!("round {} of 3", k + 1)));
            }
        }
    }

    #[tokio::test]
    async fn test_single_round_is_independent_answers() {
        let runner = Arc::new(MockRunner::echo());
        let use_case = RunDebateUseCase::new(Arc::clone(&runner));

        let transcript = use_case.execute(input(1)).await.unwrap();

        assert_eq!(transcript.rounds.len(), 1);
        assert_eq!(runner.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_agent_carries_placeholder_forward() {
        let runner = Arc::new(MockRunner::new(|agent, _| match agent {
            AgentKind::Codex => {
                AgentResponse::failure("codex", FailureKind::SpawnFailure, "CLI not found: codex")
            }
            AgentKind::Gemini => AgentResponse::success("gemini", "gemini view"),
        }));
        let use_case = RunDebateUseCase::new(Arc::clone(&runner));

        let transcript = use_case.execute(input(2)).await.unwrap();

        assert_eq!(transcript.rounds.len(), 2);
        let gemini_round_two = &runner.prompts_for(AgentKind::Gemini)[1];
        assert!(
            gemini_round_two
                .contains("Codex's previous response:\n[no response: CLI not found: codex]")
        );
        assert!(gemini_round_two.contains("Your previous response:\ngemini view"));
    }
}
