//! Prompt domain
//!
//! Templates for the prompt bodies built by each orchestration pattern.

mod template;

pub use template::PromptTemplate;
