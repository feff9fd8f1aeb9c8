//! Agent CLI configuration from TOML (`[agents]` section)

use crate::agents::{
    AgentAdapter, CodexAdapter, GeminiAdapter, JsonLineAdapter, PromptDelivery, resolve_command,
};
use council_domain::AgentKind;
use serde::{Deserialize, Serialize};

/// Per-agent CLI settings
///
/// ```toml
/// [agents.codex]
/// command = "~/bin/codex"
/// model = "gpt-5.2-codex"
///
/// [agents.gemini.json_line]
/// args = ["run", "--json"]
/// delivery = "stdin"
/// text_field = "answer"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentsConfig {
    pub codex: FileAgentConfig,
    pub gemini: FileAgentConfig,
}

impl FileAgentsConfig {
    pub fn get(&self, agent: AgentKind) -> &FileAgentConfig {
        match agent {
            AgentKind::Codex => &self.codex,
            AgentKind::Gemini => &self.gemini,
        }
    }
}

/// Settings for one agent CLI
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentConfig {
    /// Executable override; resolved via `PATH` when unset
    pub command: Option<String>,
    /// Model override; the agent's default model when unset
    pub model: Option<String>,
    /// Drive the CLI through the generic JSON-line adapter instead
    pub json_line: Option<FileJsonLineConfig>,
}

/// Generic JSON-line adapter settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileJsonLineConfig {
    pub args: Vec<String>,
    pub delivery: PromptDelivery,
    pub text_field: String,
}

impl Default for FileJsonLineConfig {
    fn default() -> Self {
        Self {
            args: Vec::new(),
            delivery: PromptDelivery::default(),
            text_field: "text".to_string(),
        }
    }
}

impl FileAgentConfig {
    /// Model to pass on the command line.
    pub fn model_for(&self, agent: AgentKind) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| agent.default_model().to_string())
    }

    /// Build the adapter for `agent`, resolving its executable.
    pub fn to_adapter(&self, agent: AgentKind) -> AgentAdapter {
        let program = resolve_command(agent.as_str(), self.command.as_deref());

        if let Some(json_line) = &self.json_line {
            return AgentAdapter::JsonLine(
                JsonLineAdapter::new(agent.as_str(), program)
                    .with_args(json_line.args.iter().cloned())
                    .with_delivery(json_line.delivery)
                    .with_text_field(json_line.text_field.clone()),
            );
        }

        let model = self.model_for(agent);
        match agent {
            AgentKind::Codex => AgentAdapter::Codex(CodexAdapter::new(program, model)),
            AgentKind::Gemini => AgentAdapter::Gemini(GeminiAdapter::new(program, model)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_adapters() {
        let config = FileAgentsConfig::default();
        let adapter = config.get(AgentKind::Codex).to_adapter(AgentKind::Codex);
        match adapter {
            AgentAdapter::Codex(codex) => {
                assert_eq!(codex.model, AgentKind::Codex.default_model());
            }
            other => panic!("expected codex adapter, got {:?}", other),
        }
    }

    #[test]
    fn test_command_and_model_override() {
        let config = FileAgentConfig {
            command: Some("/opt/gemini".to_string()),
            model: Some("gemini-2.5-flash".to_string()),
            json_line: None,
        };
        match config.to_adapter(AgentKind::Gemini) {
            AgentAdapter::Gemini(gemini) => {
                assert_eq!(gemini.command, PathBuf::from("/opt/gemini"));
                assert_eq!(gemini.model, "gemini-2.5-flash");
            }
            other => panic!("expected gemini adapter, got {:?}", other),
        }
    }

    #[test]
    fn test_json_line_override_keeps_agent_name() {
        let config = FileAgentConfig {
            command: Some("/usr/local/bin/stub".to_string()),
            model: None,
            json_line: Some(FileJsonLineConfig {
                args: vec!["--json".to_string()],
                delivery: PromptDelivery::Stdin,
                text_field: "answer".to_string(),
            }),
        };
        let adapter = config.to_adapter(AgentKind::Codex);
        assert_eq!(adapter.name(), "codex");
        match adapter {
            AgentAdapter::JsonLine(json) => {
                assert_eq!(json.args, vec!["--json"]);
                assert_eq!(json.delivery, PromptDelivery::Stdin);
                assert_eq!(json.text_field, "answer");
            }
            other => panic!("expected json-line adapter, got {:?}", other),
        }
    }
}
