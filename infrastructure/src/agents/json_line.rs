//! Generic adapter for CLIs that answer with one JSON object per run.

use super::{Invocation, last_non_empty_line};
use council_domain::Prompt;
use council_domain::core::string::preview;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

/// How the prompt reaches the child process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptDelivery {
    /// Written to stdin, which is then closed
    Stdin,
    /// Appended as the final argument
    #[default]
    LastArg,
}

/// Expects a JSON object on the final non-empty stdout line, with the answer
/// in a designated string field.
#[derive(Debug, Clone)]
pub struct JsonLineAdapter {
    name: String,
    pub program: PathBuf,
    pub args: Vec<String>,
    pub delivery: PromptDelivery,
    pub text_field: String,
}

impl JsonLineAdapter {
    pub fn new(name: impl Into<String>, program: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
            args: Vec::new(),
            delivery: PromptDelivery::default(),
            text_field: "text".to_string(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_delivery(mut self, delivery: PromptDelivery) -> Self {
        self.delivery = delivery;
        self
    }

    pub fn with_text_field(mut self, field: impl Into<String>) -> Self {
        self.text_field = field.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn build_invocation(&self, prompt: &Prompt) -> Invocation {
        let mut args = self.args.clone();
        let stdin = match self.delivery {
            PromptDelivery::Stdin => Some(prompt.render()),
            PromptDelivery::LastArg => {
                args.push(prompt.render());
                None
            }
        };
        Invocation {
            program: self.program.clone(),
            args,
            stdin,
        }
    }

    pub fn parse_output(&self, stdout: &str) -> Result<String, String> {
        let line = last_non_empty_line(stdout).ok_or_else(|| "empty output".to_string())?;

        let object = match serde_json::from_str::<Value>(line) {
            Ok(Value::Object(map)) => map,
            Ok(_) => return Err(format!("expected a JSON object, got: {}", preview(line, 120))),
            Err(e) => return Err(format!("invalid JSON ({}): {}", e, preview(line, 120))),
        };

        match object.get(&self.text_field) {
            Some(Value::String(text)) => Ok(text.clone()),
            Some(_) => Err(format!("field `{}` is not a string", self.text_field)),
            None => Err(format!("missing field `{}`", self.text_field)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::AgentAdapter;
    use council_domain::FailureKind;

    #[test]
    fn test_text_field_round_trip() {
        let adapter = AgentAdapter::JsonLine(JsonLineAdapter::new("stub", "stub"));
        let response = adapter.parse_output(r#"{"text": "ok"}"#, Some(0));
        assert!(response.success);
        assert_eq!(response.text, "ok");
    }

    #[test]
    fn test_malformed_json_is_failure() {
        let adapter = AgentAdapter::JsonLine(JsonLineAdapter::new("stub", "stub"));
        let response = adapter.parse_output(r#"{"text": "ok""#, Some(0));
        assert!(!response.success);
        assert_eq!(response.failure, Some(FailureKind::MalformedOutput));
        assert!(response.error_message().starts_with("invalid JSON"));
    }

    #[test]
    fn test_custom_field_and_last_line() {
        let adapter = JsonLineAdapter::new("stub", "stub").with_text_field("answer");
        let stdout = "warming up\n{\"answer\": \"42\"}\n\n";
        assert_eq!(adapter.parse_output(stdout).unwrap(), "42");
        assert_eq!(
            adapter.parse_output(r#"{"text": "x"}"#).unwrap_err(),
            "missing field `answer`"
        );
        assert_eq!(
            adapter.parse_output(r#"{"answer": 7}"#).unwrap_err(),
            "field `answer` is not a string"
        );
        assert!(adapter.parse_output("[1, 2]").is_err());
    }

    #[test]
    fn test_prompt_delivery() {
        let prompt = Prompt::new("hello").unwrap();
        let by_arg = JsonLineAdapter::new("stub", "llm").with_args(["--json"]);
        let invocation = by_arg.build_invocation(&prompt);
        assert_eq!(invocation.args, vec!["--json", "hello"]);
        assert!(invocation.stdin.is_none());

        let by_stdin = by_arg.with_delivery(PromptDelivery::Stdin);
        let invocation = by_stdin.build_invocation(&prompt);
        assert_eq!(invocation.args, vec!["--json"]);
        assert_eq!(invocation.stdin.as_deref(), Some("hello"));
    }
}
