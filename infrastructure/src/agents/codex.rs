//! Codex CLI adapter

use super::Invocation;
use council_domain::core::string::preview;
use council_domain::{AgentKind, Prompt};
use serde_json::Value;
use std::path::PathBuf;

/// Runs `codex exec --json` and reads its JSONL event stream.
#[derive(Debug, Clone)]
pub struct CodexAdapter {
    pub command: PathBuf,
    pub model: String,
}

impl Default for CodexAdapter {
    fn default() -> Self {
        Self {
            command: PathBuf::from("codex"),
            model: AgentKind::Codex.default_model().to_string(),
        }
    }
}

impl CodexAdapter {
    pub fn new(command: impl Into<PathBuf>, model: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            model: model.into(),
        }
    }

    pub fn build_invocation(&self, prompt: &Prompt) -> Invocation {
        Invocation {
            program: self.command.clone(),
            args: vec![
                "exec".to_string(),
                "--model".to_string(),
                self.model.clone(),
                "--json".to_string(),
                "--full-auto".to_string(),
                "--skip-git-repo-check".to_string(),
                prompt.render(),
            ],
            stdin: None,
        }
    }

    /// Join every completed `agent_message` item, blank-line separated.
    ///
    /// Lines that are not JSON (progress noise) are skipped.
    pub fn parse_output(&self, stdout: &str) -> Result<String, String> {
        let messages: Vec<String> = stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter_map(|line| serde_json::from_str::<Value>(line).ok())
            .filter_map(|event| agent_message_text(&event))
            .collect();

        if messages.is_empty() {
            return Err(if stdout.trim().is_empty() {
                "empty output".to_string()
            } else {
                format!("no agent message in codex output: {}", preview(stdout, 120))
            });
        }
        Ok(messages.join("\n\n"))
    }
}

/// Text of an `item.completed` event carrying an `agent_message`.
///
/// Reads `item.text`, falling back to the `text` of each `item.content[]`
/// part.
fn agent_message_text(event: &Value) -> Option<String> {
    if event["type"] != "item.completed" {
        return None;
    }
    let item = &event["item"];
    if item["type"] != "agent_message" {
        return None;
    }

    if let Some(text) = item["text"].as_str().map(str::trim)
        && !text.is_empty()
    {
        return Some(text.to_string());
    }

    let parts: Vec<&str> = item["content"]
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|part| part["text"].as_str())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();
    (!parts.is_empty()).then(|| parts.join("\n\n"))
}
