//! Gemini CLI adapter

use super::{Invocation, last_non_empty_line};
use council_domain::core::string::preview;
use council_domain::{AgentKind, Prompt};
use serde_json::Value;
use std::path::PathBuf;

/// Fields that may carry the answer in a JSON object, in priority order.
const RESPONSE_KEYS: [&str; 4] = ["response", "text", "content", "result"];

/// Fields that may carry the answer in one chunk of a JSON array.
const CHUNK_KEYS: [&str; 3] = ["response", "text", "content"];

/// Runs `gemini -p <prompt> --output-format json`.
#[derive(Debug, Clone)]
pub struct GeminiAdapter {
    pub command: PathBuf,
    pub model: String,
}

impl Default for GeminiAdapter {
    fn default() -> Self {
        Self {
            command: PathBuf::from("gemini"),
            model: AgentKind::Gemini.default_model().to_string(),
        }
    }
}

impl GeminiAdapter {
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
                "--model".to_string(),
                self.model.clone(),
                "-p".to_string(),
                prompt.render(),
                "--output-format".to_string(),
                "json".to_string(),
            ],
            stdin: None,
        }
    }

    /// Read the answer from the whole of stdout, or failing that from its
    /// final non-empty line (the CLI sometimes logs before the document).
    pub fn parse_output(&self, stdout: &str) -> Result<String, String> {
        let trimmed = stdout.trim();
        if trimmed.is_empty() {
            return Err("empty output".to_string());
        }

        let document = serde_json::from_str::<Value>(trimmed).ok().or_else(|| {
            last_non_empty_line(trimmed).and_then(|line| serde_json::from_str(line).ok())
        });

        document
            .as_ref()
            .and_then(extract_answer)
            .ok_or_else(|| format!("unrecognized gemini output: {}", preview(trimmed, 120)))
    }
}

fn extract_answer(document: &Value) -> Option<String> {
    match document {
        Value::Object(map) => RESPONSE_KEYS
            .iter()
            .find_map(|key| map.get(*key))
            .map(value_text),
        Value::Array(chunks) => {
            let parts: Vec<String> = chunks
                .iter()
                .map(|chunk| match chunk {
                    Value::Object(map) => CHUNK_KEYS
                        .iter()
                        .find_map(|key| map.get(*key))
                        .map(value_text)
                        .unwrap_or_else(|| chunk.to_string()),
                    other => value_text(other),
                })
                .collect();
            (!parts.is_empty()).then(|| parts.join("\n"))
        }
        _ => None,
    }
}

/// Strings are trimmed; anything else is re-serialized as JSON.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(stdout: &str) -> Result<String, String> {
        GeminiAdapter::default().parse_output(stdout)
    }

    #[test]
    fn test_build_invocation_argument_shape() {
        let adapter = GeminiAdapter::new("gemini", "gemini-test");
        let invocation = adapter.build_invocation(&Prompt::new("hello").unwrap());
        assert_eq!(
            invocation.args,
            vec!["--model", "gemini-test", "-p", "hello", "--output-format", "json"]
        );
    }

    #[test]
    fn test_parse_response_field() {
        assert_eq!(parse(r#"{"response": "  Hi there  ", "stats": {}}"#).unwrap(), "Hi there");
        assert_eq!(parse(r#"{"result": {"a": 1}}"#).unwrap(), r#"{"a":1}"#);
    }

    #[test]
    fn test_parse_chunk_array() {
        let stdout = r#"[{"text": "one"}, {"content": "two"}, "three"]"#;
        assert_eq!(parse(stdout).unwrap(), "one\ntwo\nthree");
    }

    #[test]
    fn test_parse_final_line_after_log_noise() {
        let stdout = "Loaded cached credentials.\n{\"response\": \"answer\"}\n";
        assert_eq!(parse(stdout).unwrap(), "answer");
    }

    #[test]
    fn test_parse_plain_text_is_malformed() {
        let err = parse("I am not JSON").unwrap_err();
        assert!(err.starts_with("unrecognized gemini output"));
        assert!(parse(r#"{"unknown": "x"}"#).is_err());
        assert_eq!(parse("").unwrap_err(), "empty output");
    }
}
