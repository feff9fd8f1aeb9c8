//! Orchestrator settings - the resolved settings record every pattern reads.
//!
//! [`OrchestratorSettings`] is built by the infrastructure config loader
//! (or by hand in tests) and handed to the
//! [`Orchestrator`](crate::orchestrator::Orchestrator).

use crate::use_cases::shared::check_agents;
use council_domain::{AgentKind, DomainError};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

/// Per-pattern time budgets for a single agent invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternTimeouts {
    pub ask: Duration,
    pub consensus: Duration,
    pub debate: Duration,
    pub council: Duration,
}

impl Default for PatternTimeouts {
    fn default() -> Self {
        Self {
            ask: Duration::from_secs(120),
            consensus: Duration::from_secs(180),
            debate: Duration::from_secs(300),
            council: Duration::from_secs(300),
        }
    }
}

/// Settings record for the orchestration layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorSettings {
    /// Agents that take part in multi-agent patterns, in result order
    pub agents: Vec<AgentKind>,
    /// Agent that writes the consensus synthesis; `None` merges deterministically
    pub synthesizer: Option<AgentKind>,
    pub timeouts: PatternTimeouts,
    /// Project root used when a call names none
    pub project_path: Option<PathBuf>,
    /// Whether to prepend the shared project context by default
    pub include_context: bool,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            agents: AgentKind::all(),
            synthesizer: Some(AgentKind::Gemini),
            timeouts: PatternTimeouts::default(),
            project_path: None,
            include_context: true,
        }
    }
}

impl OrchestratorSettings {
    // ==================== Builder Methods ====================

    pub fn with_agents(mut self, agents: Vec<AgentKind>) -> Self {
        self.agents = agents;
        self
    }

    pub fn with_synthesizer(mut self, synthesizer: Option<AgentKind>) -> Self {
        self.synthesizer = synthesizer;
        self
    }

    pub fn with_timeouts(mut self, timeouts: PatternTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn with_project_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.project_path = Some(path.into());
        self
    }

    pub fn with_include_context(mut self, include: bool) -> Self {
        self.include_context = include;
        self
    }

    // ==================== Queries ====================

    /// Check the record before any pattern runs.
    pub fn validate(&self) -> Result<(), DomainError> {
        check_agents(&self.agents)?;
        let t = &self.timeouts;
        if [t.ask, t.consensus, t.debate, t.council]
            .iter()
            .any(|d| d.is_zero())
        {
            return Err(DomainError::InvalidTimeout);
        }
        Ok(())
    }

    /// Resolve the project root: explicit argument, then the configured
    /// path, then `cwd`. Relative paths are taken against `cwd` and the
    /// result is always absolute, since the memory slug is derived from it.
    pub fn resolve_project_path(&self, explicit: Option<&Path>, cwd: &Path) -> PathBuf {
        match explicit.or(self.project_path.as_deref()) {
            Some(path) => absolutize(path, cwd),
            None => cwd.to_path_buf(),
        }
    }
}

/// Symlinks resolved when the path exists, `.`/`..` folded lexically otherwise.
fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    let joined = cwd.join(path);
    if let Ok(canonical) = joined.canonicalize() {
        return canonical;
    }
    let mut resolved = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            other => resolved.push(other),
        }
    }
    resolved
}
