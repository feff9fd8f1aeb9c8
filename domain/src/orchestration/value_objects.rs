//! Orchestration value objects - immutable per-agent results.
//!
//! - [`FailureKind`] - why an invocation did not produce an answer
//! - [`AgentResponse`] - normalized outcome of one agent invocation

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Why an agent invocation did not produce an answer.
///
/// The first four kinds are process-level failures converted at the process
/// runner boundary. `Upstream` marks a step that was not attempted because
/// its inputs failed; `Cancelled` marks a caller cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The binary was missing, not executable, or otherwise failed to start.
    SpawnFailure,
    /// The process exceeded its time budget and was terminated.
    Timeout,
    /// The process exited with a non-zero status.
    NonZeroExit,
    /// The process succeeded but its output did not match the expected schema.
    MalformedOutput,
    /// Not attempted because every input to this step failed.
    Upstream,
    /// The call was cancelled by the caller.
    Cancelled,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::SpawnFailure => "spawn_failure",
            FailureKind::Timeout => "timeout",
            FailureKind::NonZeroExit => "non_zero_exit",
            FailureKind::MalformedOutput => "malformed_output",
            FailureKind::Upstream => "upstream",
            FailureKind::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Normalized outcome of a single agent invocation.
///
/// Exactly one of `text` / `error` is populated: a successful response
/// always carries non-empty text, a failed one always carries a non-empty
/// error and its [`FailureKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentResponse {
    /// Agent identifier (e.g. "codex", "gemini", "orchestrator")
    pub agent: String,
    /// Whether the agent produced an answer
    pub success: bool,
    /// The answer text (empty on failure)
    pub text: String,
    /// Failure description (absent on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Failure classification (absent on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
    /// Wall-clock time spent on the invocation
    #[serde(rename = "elapsed_seconds", with = "duration_secs")]
    pub duration: Duration,
}

impl AgentResponse {
    /// Creates a successful response.
    ///
    /// Blank text is not an answer: it yields a `MalformedOutput` failure
    /// instead, which keeps the text/error invariant.
    pub fn success(agent: impl Into<String>, text: impl Into<String>) -> Self {
        let agent = agent.into();
        let text = text.into();
        if text.trim().is_empty() {
            return Self::failure(agent, FailureKind::MalformedOutput, "empty output");
        }
        Self {
            agent,
            success: true,
            text,
            error: None,
            failure: None,
            duration: Duration::ZERO,
        }
    }

    /// Creates a failed response.
    ///
    /// An empty error message is replaced by the failure kind's name.
    pub fn failure(agent: impl Into<String>, kind: FailureKind, error: impl Into<String>) -> Self {
        let error = error.into();
        let error = if error.trim().is_empty() {
            kind.as_str().to_string()
        } else {
            error
        };
        Self {
            agent: agent.into(),
            success: false,
            text: String::new(),
            error: Some(error),
            failure: Some(kind),
            duration: Duration::ZERO,
        }
    }

    /// Sets the measured duration.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Returns `true` if this response carries an answer.
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// The answer text, if successful.
    pub fn answer(&self) -> Option<&str> {
        self.success.then_some(self.text.as_str())
    }

    /// Failure description, or an empty string on success.
    pub fn error_message(&self) -> &str {
        self.error.as_deref().unwrap_or_default()
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let rounded = (duration.as_secs_f64() * 100.0).round() / 100.0;
        serializer.serialize_f64(rounded)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}
