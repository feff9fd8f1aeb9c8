//! Scatter-gather helper shared by every pattern.

use crate::ports::agent_runner::AgentRunner;
use crate::ports::progress::ProgressNotifier;
use council_domain::{AgentKind, AgentResponse, DomainError, FailureKind, Phase, Prompt};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// A non-empty participant list with no agent listed twice.
pub(crate) fn check_agents(agents: &[AgentKind]) -> Result<(), DomainError> {
    if agents.is_empty() {
        return Err(DomainError::NoAgents);
    }
    for (i, agent) in agents.iter().enumerate() {
        if agents[..i].contains(agent) {
            return Err(DomainError::DuplicateAgent(agent.to_string()));
        }
    }
    Ok(())
}

/// Run every `(agent, prompt)` call concurrently and wait for all of them.
///
/// The result has one entry per call, in call order, whatever order the
/// calls finish in. A call whose task panics or is aborted becomes a failed
/// entry; it never aborts the join. Dropping the returned future aborts
/// every outstanding call.
pub(crate) async fn fan_out<R: AgentRunner + 'static>(
    runner: &Arc<R>,
    calls: Vec<(AgentKind, Prompt)>,
    timeout: Duration,
    phase: &Phase,
    progress: &dyn ProgressNotifier,
) -> Vec<AgentResponse> {
    progress.on_phase_start(phase, calls.len());

    let agents: Vec<AgentKind> = calls.iter().map(|(agent, _)| *agent).collect();
    let mut join_set = JoinSet::new();

    for (index, (agent, prompt)) in calls.into_iter().enumerate() {
        let runner = Arc::clone(runner);
        join_set.spawn(async move {
            let outcome = AssertUnwindSafe(runner.invoke(agent, &prompt, timeout))
                .catch_unwind()
                .await;
            let response = outcome.unwrap_or_else(|_| {
                AgentResponse::failure(agent.as_str(), FailureKind::SpawnFailure, "agent task panicked")
            });
            (index, response)
        });
    }

    let mut slots: Vec<Option<AgentResponse>> = vec![None; agents.len()];

    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((index, response)) => {
                if response.success {
                    info!(
                        "{} [{}] answered in {:.2}s",
                        response.agent,
                        phase,
                        response.duration.as_secs_f64()
                    );
                } else {
                    warn!(
                        "{} [{}] failed: {}",
                        response.agent,
                        phase,
                        response.error_message()
                    );
                }
                progress.on_task_complete(phase, &response.agent, response.success);
                slots[index] = Some(response);
            }
            Err(e) => {
                warn!("Task join error: {}", e);
            }
        }
    }

    progress.on_phase_complete(phase);

    let responses: Vec<AgentResponse> = slots
        .into_iter()
        .zip(agents)
        .map(|(slot, agent)| {
            slot.unwrap_or_else(|| {
                AgentResponse::failure(agent.as_str(), FailureKind::Cancelled, "task aborted")
            })
        })
        .collect();

    debug!(
        "{} complete: {}/{} succeeded",
        phase,
        responses.iter().filter(|r| r.success).count(),
        responses.len()
    );

    responses
}

/// `(display name, answer)` pairs for the successful responses.
pub(crate) fn named_answers(responses: &[AgentResponse]) -> Vec<(String, String)> {
    responses
        .iter()
        .filter(|r| r.success)
        .map(|r| (display_name(&r.agent), r.text.clone()))
        .collect()
}

/// Human-facing name for an agent identifier.
pub(crate) fn display_name(agent: &str) -> String {
    agent
        .parse::<AgentKind>()
        .map(|kind| kind.display_name().to_string())
        .unwrap_or_else(|_| agent.to_string())
}
