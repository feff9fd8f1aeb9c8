//! Domain layer for agent-council
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Agents
//!
//! An agent is an external language-model CLI (Codex, Gemini). Every call to
//! one yields an [`AgentResponse`]: an answer, or a classified failure.
//!
//! ## Patterns
//!
//! - **Single / Parallel**: one or many agents answer the same prompt
//! - **Consensus**: parallel answers, then a synthesis
//! - **Debate**: 1-5 rounds, each agent sees the others' previous answers
//! - **Council**: individual answers, anonymized peer review, and a record
//!   for the calling party to chair

pub mod context;
pub mod core;
pub mod orchestration;
pub mod prompt;

// Re-export commonly used types
pub use context::{ContextPreamble, KnownContextFile, LoadedContextFile};
pub use core::{
    agent::{AgentKind, ORCHESTRATOR_ID},
    error::DomainError,
    prompt::Prompt,
};
pub use orchestration::{
    consensus::{ConsensusResult, MERGE_SYNTHESIZER_ID, merge_answers},
    council::{
        AnonymizationMap, AnonymizedAnswer, AnonymizedBundle, CouncilRecord, CouncilStage, LABELS,
    },
    debate::{DebateRound, DebateRounds, DebateState, DebateTranscript},
    entities::{Pattern, Phase},
    value_objects::{AgentResponse, FailureKind},
};
pub use prompt::PromptTemplate;
