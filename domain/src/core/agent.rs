//! Agent value object representing an external CLI agent

use crate::core::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier used for the calling party in council records.
pub const ORCHESTRATOR_ID: &str = "orchestrator";

/// External command-line agents that can take part in a council (Value Object)
///
/// The set is closed: each variant has a matching adapter in the
/// infrastructure layer that knows its argument shape and output schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AgentKind {
    /// OpenAI Codex CLI (`codex exec --json`)
    Codex,
    /// Google Gemini CLI (`gemini -p --output-format json`)
    Gemini,
}

impl AgentKind {
    /// Get the string identifier for this agent
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentKind::Codex => "codex",
            AgentKind::Gemini => "gemini",
        }
    }

    /// Human-readable name used in prompts that name agents (debate, consensus)
    pub fn display_name(&self) -> &'static str {
        match self {
            AgentKind::Codex => "Codex",
            AgentKind::Gemini => "Gemini",
        }
    }

    /// All agents, in their canonical order
    pub fn all() -> Vec<AgentKind> {
        vec![AgentKind::Codex, AgentKind::Gemini]
    }

    /// Default model identifier passed to the agent's CLI
    pub fn default_model(&self) -> &'static str {
        match self {
            AgentKind::Codex => "gpt-5.3-codex",
            AgentKind::Gemini => "gemini-3-pro-preview",
        }
    }
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AgentKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "codex" => Ok(AgentKind::Codex),
            "gemini" => Ok(AgentKind::Gemini),
            other => Err(DomainError::UnknownAgent(other.to_string())),
        }
    }
}

impl Serialize for AgentKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AgentKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
