//! Orchestration domain entities

use serde::{Deserialize, Serialize};

/// Step of an orchestration pattern, reported to progress observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Parallel fan-out of one prompt to every agent
    Ask,
    /// Consensus synthesis over the collected answers
    Synthesis,
    /// One debate round (1-based)
    DebateRound(u8),
    /// Council stage 1: independent answers
    Individual,
    /// Council stage 2: anonymized peer review
    PeerReview,
}

impl Phase {
    pub fn as_str(&self) -> &str {
        match self {
            Phase::Ask => "ask",
            Phase::Synthesis => "synthesis",
            Phase::DebateRound(_) => "debate_round",
            Phase::Individual => "individual",
            Phase::PeerReview => "peer_review",
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            Phase::Ask => "Parallel Ask".to_string(),
            Phase::Synthesis => "Synthesis".to_string(),
            Phase::DebateRound(round) => format!("Debate Round {}", round),
            Phase::Individual => "Individual Answers".to_string(),
            Phase::PeerReview => "Peer Review".to_string(),
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Orchestration patterns exposed to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    Single,
    Parallel,
    Consensus,
    Debate,
    Council,
}

impl Pattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pattern::Single => "single",
            Pattern::Parallel => "parallel",
            Pattern::Consensus => "consensus",
            Pattern::Debate => "debate",
            Pattern::Council => "council",
        }
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
