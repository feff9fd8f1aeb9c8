//! JSON output for scripting and tool integrations

use crate::output::formatter::OutputFormatter;
use council_domain::{AgentResponse, ConsensusResult, CouncilRecord, DebateTranscript};
use serde::Serialize;

/// Pretty-printed JSON of the domain records
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_response(&self, response: &AgentResponse) -> String {
        Self::to_json(response)
    }

    fn format_responses(&self, responses: &[AgentResponse]) -> String {
        Self::to_json(responses)
    }

    fn format_consensus(&self, result: &ConsensusResult) -> String {
        Self::to_json(result)
    }

    fn format_debate(&self, transcript: &DebateTranscript) -> String {
        Self::to_json(transcript)
    }

    /// The label map is not part of the record's serialized form.
    fn format_council(&self, record: &CouncilRecord) -> String {
        Self::to_json(record)
    }
}
