//! Multi-round debate records
//!
//! A debate runs rounds `1..=N` strictly in sequence:
//!
//! ```text
//! RoundPending(1) → RoundComplete(1) → RoundPending(2) → … → RoundComplete(N) → DebateComplete
//! ```
//!
//! Round 1 is an independent answer to the topic. Every later round shows
//! each agent its own previous answer and the other agents' previous
//! answers verbatim. An agent that failed carries its last successful
//! answer forward, or a placeholder when it never answered.

use crate::core::agent::AgentKind;
use crate::core::error::DomainError;
use crate::orchestration::value_objects::AgentResponse;
use serde::{Deserialize, Serialize};

/// Validated number of debate rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct DebateRounds(u8);

impl DebateRounds {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Validates the requested round count.
    ///
    /// Out-of-range values are rejected, never clamped.
    pub fn new(rounds: i64) -> Result<Self, DomainError> {
        if rounds < i64::from(Self::MIN) || rounds > i64::from(Self::MAX) {
            return Err(DomainError::InvalidRounds {
                got: rounds,
                min: Self::MIN,
                max: Self::MAX,
            });
        }
        Ok(Self(rounds as u8))
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl Default for DebateRounds {
    fn default() -> Self {
        Self(2)
    }
}

impl TryFrom<i64> for DebateRounds {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DebateRounds> for u8 {
    fn from(value: DebateRounds) -> Self {
        value.0
    }
}

/// Progress of a debate through its rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebateState {
    RoundPending(u8),
    RoundComplete(u8),
    DebateComplete,
}

impl DebateState {
    /// Initial state of every debate.
    pub fn start() -> Self {
        DebateState::RoundPending(1)
    }

    /// Advance one transition.
    pub fn advance(self, total: DebateRounds) -> Self {
        match self {
            DebateState::RoundPending(k) => DebateState::RoundComplete(k),
            DebateState::RoundComplete(k) if k < total.get() => DebateState::RoundPending(k + 1),
            DebateState::RoundComplete(_) | DebateState::DebateComplete => {
                DebateState::DebateComplete
            }
        }
    }
}

/// All agents' responses for one round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebateRound {
    /// 1-based round number
    pub round: u8,
    /// One response per agent, in participant order
    pub responses: Vec<AgentResponse>,
}

impl DebateRound {
    pub fn new(round: u8, responses: Vec<AgentResponse>) -> Self {
        Self { round, responses }
    }

    pub fn response_for(&self, agent: AgentKind) -> Option<&AgentResponse> {
        self.responses.iter().find(|r| r.agent == agent.as_str())
    }
}

/// The ordered, append-only sequence of rounds of one debate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebateTranscript {
    pub topic: String,
    pub rounds: Vec<DebateRound>,
}

impl DebateTranscript {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            rounds: Vec::new(),
        }
    }

    /// Number of the round that should be recorded next.
    pub fn next_round(&self) -> u8 {
        self.rounds.len() as u8 + 1
    }

    /// Append a completed round. Responses are numbered in sequence.
    pub fn push_round(&mut self, responses: Vec<AgentResponse>) -> &DebateRound {
        let round = DebateRound::new(self.next_round(), responses);
        self.rounds.push(round);
        &self.rounds[self.rounds.len() - 1]
    }

    /// The last completed round, if any.
    pub fn final_round(&self) -> Option<&DebateRound> {
        self.rounds.last()
    }

    /// The answer an agent carries into the next round.
    ///
    /// This is its most recent successful answer; if it has never answered,
    /// a placeholder naming its latest failure.
    pub fn carried_answer(&self, agent: AgentKind) -> String {
        let mut last_error = None;
        for round in self.rounds.iter().rev() {
            if let Some(response) = round.response_for(agent) {
                if let Some(answer) = response.answer() {
                    return answer.to_string();
                }
                if last_error.is_none() {
                    last_error = Some(response.error_message().to_string());
                }
            }
        }
        format!(
            "[no response: {}]",
            last_error.as_deref().unwrap_or("agent did not answer")
        )
    }
}
