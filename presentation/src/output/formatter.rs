//! Output formatter trait

use crate::cli::commands::OutputFormat;
use crate::output::console::ConsoleFormatter;
use crate::output::json::JsonFormatter;
use council_domain::{AgentResponse, ConsensusResult, CouncilRecord, DebateTranscript};

/// Trait for formatting pattern results
pub trait OutputFormatter {
    /// Format a single agent's response
    fn format_response(&self, response: &AgentResponse) -> String;

    /// Format parallel responses, in agent order
    fn format_responses(&self, responses: &[AgentResponse]) -> String;

    /// Format a consensus result
    fn format_consensus(&self, result: &ConsensusResult) -> String;

    /// Format a debate transcript
    fn format_debate(&self, transcript: &DebateTranscript) -> String;

    /// Format a council record
    fn format_council(&self, record: &CouncilRecord) -> String;
}

/// Formatter for the selected output format
pub fn formatter_for(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(ConsoleFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}
