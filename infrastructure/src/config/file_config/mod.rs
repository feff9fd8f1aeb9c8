//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into the application's
//! [`OrchestratorSettings`] after validation.

mod agents;
mod output;
mod timeouts;

pub use agents::{FileAgentConfig, FileAgentsConfig, FileJsonLineConfig};
pub use output::{FileOutputConfig, FileOutputFormat};
pub use timeouts::FileTimeoutsConfig;

use council_application::OrchestratorSettings;
use council_domain::AgentKind;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Synthesizer value that selects the deterministic merge.
pub const NO_SYNTHESIZER: &str = "none";

/// Configuration problems that stop the CLI before any agent runs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("timeouts.{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("agents.{0}.command must not be empty")]
    EmptyCommand(AgentKind),

    #[error("agents.{0}.model must not be empty")]
    EmptyModel(AgentKind),

    #[error("agents.{0}.json_line.text_field must not be empty")]
    EmptyTextField(AgentKind),

    #[error("participants must name at least one agent")]
    NoParticipants,

    #[error("unknown synthesizer '{0}' (expected codex, gemini or none)")]
    UnknownSynthesizer(String),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Agents taking part in multi-agent patterns, in result order
    pub participants: Vec<AgentKind>,
    /// Consensus synthesizer: an agent name, or "none" for the merge
    pub synthesizer: String,
    /// Project root used when a call names none
    pub project_path: Option<PathBuf>,
    /// Prepend the shared project context by default
    pub include_context: bool,
    /// Per-agent CLI settings
    pub agents: FileAgentsConfig,
    /// Per-pattern timeouts
    pub timeouts: FileTimeoutsConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            participants: AgentKind::all(),
            synthesizer: AgentKind::Gemini.as_str().to_string(),
            project_path: None,
            include_context: true,
            agents: FileAgentsConfig::default(),
            timeouts: FileTimeoutsConfig::default(),
            output: FileOutputConfig::default(),
        }
    }
}

impl FileConfig {
    /// Validate the entire configuration, stopping at the first problem.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if let Some(pattern) = self.timeouts.first_zero() {
            return Err(ConfigValidationError::ZeroTimeout(pattern));
        }

        for agent in AgentKind::all() {
            let config = self.agents.get(agent);
            if config.command.as_deref().is_some_and(|c| c.trim().is_empty()) {
                return Err(ConfigValidationError::EmptyCommand(agent));
            }
            if config.model.as_deref().is_some_and(|m| m.trim().is_empty()) {
                return Err(ConfigValidationError::EmptyModel(agent));
            }
            if let Some(json_line) = &config.json_line
                && json_line.text_field.trim().is_empty()
            {
                return Err(ConfigValidationError::EmptyTextField(agent));
            }
        }

        if self.participants.is_empty() {
            return Err(ConfigValidationError::NoParticipants);
        }

        self.parse_synthesizer().map(|_| ())
    }

    /// `Ok(None)` selects the deterministic merge.
    pub fn parse_synthesizer(&self) -> Result<Option<AgentKind>, ConfigValidationError> {
        let value = self.synthesizer.trim();
        if value.eq_ignore_ascii_case(NO_SYNTHESIZER) {
            return Ok(None);
        }
        value
            .parse::<AgentKind>()
            .map(Some)
            .map_err(|_| ConfigValidationError::UnknownSynthesizer(self.synthesizer.clone()))
    }

    /// Validate and convert into the settings record the orchestrator reads.
    pub fn to_settings(&self) -> Result<OrchestratorSettings, ConfigValidationError> {
        self.validate()?;

        let mut agents = Vec::with_capacity(self.participants.len());
        for agent in &self.participants {
            if !agents.contains(agent) {
                agents.push(*agent);
            }
        }

        let mut settings = OrchestratorSettings::default()
            .with_agents(agents)
            .with_synthesizer(self.parse_synthesizer()?)
            .with_timeouts(self.timeouts.to_pattern_timeouts())
            .with_include_context(self.include_context);
        if let Some(path) = &self.project_path {
            settings = settings.with_project_path(path);
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
participants = ["gemini", "codex"]
synthesizer = "codex"
project_path = "/work/app"
include_context = false

[agents.codex]
command = "/opt/codex"
model = "o4-mini"

[agents.gemini.json_line]
args = ["--json"]
delivery = "stdin"

[timeouts]
ask = 60
debate = 600

[output]
format = "json"
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.participants, vec![AgentKind::Gemini, AgentKind::Codex]);
        assert_eq!(config.agents.codex.model.as_deref(), Some("o4-mini"));
        assert!(config.agents.gemini.json_line.is_some());
        assert_eq!(
            config.agents.gemini.json_line.as_ref().unwrap().text_field,
            "text"
        );
        assert_eq!(config.timeouts.ask, 60);
        assert_eq!(config.timeouts.consensus, 180);
        assert_eq!(config.output.format, Some(FileOutputFormat::Json));

        let settings = config.to_settings().unwrap();
        assert_eq!(settings.agents, vec![AgentKind::Gemini, AgentKind::Codex]);
        assert_eq!(settings.synthesizer, Some(AgentKind::Codex));
        assert_eq!(settings.timeouts.debate, Duration::from_secs(600));
        assert_eq!(settings.project_path, Some(PathBuf::from("/work/app")));
        assert!(!settings.include_context);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: FileConfig =
            toml::from_str("[agents.gemini]\nmodel = \"gemini-2.5-flash\"\n").unwrap();
        assert_eq!(config.participants, AgentKind::all());
        assert_eq!(config.synthesizer, "gemini");
        assert!(config.include_context);
        assert!(config.agents.codex.command.is_none());
        assert!(config.output.color);
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = FileConfig::default();
        assert!(config.validate().is_ok());
        let settings = config.to_settings().unwrap();
        assert_eq!(settings.agents, AgentKind::all());
        assert_eq!(settings.synthesizer, Some(AgentKind::Gemini));
    }

    #[test]
    fn test_synthesizer_none_selects_merge() {
        let config = FileConfig {
            synthesizer: "None".to_string(),
            ..Default::default()
        };
        assert_eq!(config.to_settings().unwrap().synthesizer, None);

        let config = FileConfig {
            synthesizer: "claude".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::UnknownSynthesizer("claude".to_string()))
        );
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config: FileConfig = toml::from_str("[timeouts]\nconsensus = 0\n").unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::ZeroTimeout("consensus"))
        );
        assert_eq!(
            config.validate().unwrap_err().to_string(),
            "timeouts.consensus must be greater than zero"
        );
    }

    #[test]
    fn test_validate_rejects_empty_command_and_model() {
        let config: FileConfig = toml::from_str("[agents.codex]\ncommand = \"\"\n").unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::EmptyCommand(AgentKind::Codex))
        );

        let config: FileConfig = toml::from_str("[agents.gemini]\nmodel = \" \"\n").unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::EmptyModel(AgentKind::Gemini))
        );
    }

    #[test]
    fn test_validate_rejects_empty_participants() {
        let config: FileConfig = toml::from_str("participants = []\n").unwrap();
        assert_eq!(config.validate(), Err(ConfigValidationError::NoParticipants));
    }

    #[test]
    fn test_duplicate_participants_collapse() {
        let config: FileConfig =
            toml::from_str("participants = [\"codex\", \"codex\", \"gemini\"]\n").unwrap();
        assert_eq!(
            config.to_settings().unwrap().agents,
            vec![AgentKind::Codex, AgentKind::Gemini]
        );
    }

    #[test]
    fn test_unknown_participant_fails_to_parse() {
        assert!(toml::from_str::<FileConfig>("participants = [\"claude\"]\n").is_err());
    }
}
