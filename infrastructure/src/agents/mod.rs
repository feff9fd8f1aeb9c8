//! CLI agent adapters
//!
//! Each adapter knows one agent's command line and output schema:
//!
//! - [`CodexAdapter`] - `codex exec --json`, JSONL event stream
//! - [`GeminiAdapter`] - `gemini -p --output-format json`, one JSON document
//! - [`JsonLineAdapter`] - any CLI that prints one JSON object on its last line
//!
//! [`AgentAdapter`] is the closed set the process runner dispatches on.
//! Both halves of the contract are pure: building an invocation touches no
//! process, and parsing never panics.

mod codex;
mod gemini;
mod json_line;
mod resolve;

pub use codex::CodexAdapter;
pub use gemini::GeminiAdapter;
pub use json_line::{JsonLineAdapter, PromptDelivery};
pub use resolve::resolve_command;

use council_domain::{AgentResponse, FailureKind, Prompt};
use std::path::PathBuf;

/// A fully described process launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
    /// Bytes written to the child's stdin, which is then closed
    pub stdin: Option<String>,
}

/// Closed set of agent adapters.
#[derive(Debug, Clone)]
pub enum AgentAdapter {
    Codex(CodexAdapter),
    Gemini(GeminiAdapter),
    JsonLine(JsonLineAdapter),
}

impl AgentAdapter {
    /// Identifier recorded on every response this adapter produces.
    pub fn name(&self) -> &str {
        match self {
            AgentAdapter::Codex(_) => "codex",
            AgentAdapter::Gemini(_) => "gemini",
            AgentAdapter::JsonLine(adapter) => adapter.name(),
        }
    }

    /// Build the command line for `prompt`.
    pub fn build_invocation(&self, prompt: &Prompt) -> Invocation {
        match self {
            AgentAdapter::Codex(adapter) => adapter.build_invocation(prompt),
            AgentAdapter::Gemini(adapter) => adapter.build_invocation(prompt),
            AgentAdapter::JsonLine(adapter) => adapter.build_invocation(prompt),
        }
    }

    /// Turn raw output into a response.
    ///
    /// A non-zero `exit_code` is reported as such without looking at stdout.
    pub fn parse_output(&self, stdout: &str, exit_code: Option<i32>) -> AgentResponse {
        if let Some(code) = exit_code
            && code != 0
        {
            return AgentResponse::failure(
                self.name(),
                FailureKind::NonZeroExit,
                format!("Exit code {}", code),
            );
        }

        let parsed = match self {
            AgentAdapter::Codex(adapter) => adapter.parse_output(stdout),
            AgentAdapter::Gemini(adapter) => adapter.parse_output(stdout),
            AgentAdapter::JsonLine(adapter) => adapter.parse_output(stdout),
        };

        match parsed {
            Ok(text) => AgentResponse::success(self.name(), text),
            Err(reason) => AgentResponse::failure(self.name(), FailureKind::MalformedOutput, reason),
        }
    }
}

/// The last non-empty line of `output`, trimmed.
fn last_non_empty_line(output: &str) -> Option<&str> {
    output.lines().map(str::trim).rfind(|line| !line.is_empty())
}
