//! Prompt value object

use crate::context::ContextPreamble;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// An outbound prompt for an agent (Value Object)
///
/// A prompt is the shared read-only preamble plus a body. It is never
/// mutated: multi-round patterns derive a fresh prompt per round through
/// [`Prompt::with_body`], which keeps the same preamble.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    preamble: Option<ContextPreamble>,
    body: String,
}

impl Prompt {
    /// Create a prompt without a preamble.
    ///
    /// Returns [`DomainError::EmptyPrompt`] if the body is empty or whitespace.
    pub fn new(body: impl Into<String>) -> Result<Self, DomainError> {
        let body = body.into();
        if body.trim().is_empty() {
            return Err(DomainError::EmptyPrompt);
        }
        Ok(Self {
            preamble: None,
            body,
        })
    }

    /// Attach the shared context preamble.
    pub fn with_preamble(mut self, preamble: Option<ContextPreamble>) -> Self {
        self.preamble = preamble.filter(|p| !p.is_empty());
        self
    }

    /// Derive a new prompt with the same preamble and a different body.
    pub fn with_body(&self, body: impl Into<String>) -> Self {
        Self {
            preamble: self.preamble.clone(),
            body: body.into(),
        }
    }

    /// The caller-supplied (or pattern-derived) body.
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn preamble(&self) -> Option<&ContextPreamble> {
        self.preamble.as_ref()
    }

    /// Full text sent to the agent: preamble, blank line, body.
    pub fn render(&self) -> String {
        match &self.preamble {
            Some(preamble) => format!("{}\n\n{}", preamble.text(), self.body),
            None => self.body.clone(),
        }
    }
}

impl std::fmt::Display for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}
