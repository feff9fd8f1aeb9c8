//! Console output formatter for pattern results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use council_domain::{AgentResponse, ConsensusResult, CouncilRecord, DebateTranscript};

/// Formats results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// One response under a `── agent ──` heading
    pub fn response_block(response: &AgentResponse) -> String {
        let elapsed = format!("({:.1}s)", response.duration.as_secs_f64()).dimmed();
        match response.answer() {
            Some(text) => format!(
                "\n{} {}\n{}\n",
                format!("── {} ──", response.agent).yellow().bold(),
                elapsed,
                text
            ),
            None => format!(
                "\n{} {}\n{} {}\n",
                format!("── {} ──", response.agent).red().bold(),
                elapsed,
                "Error:".red(),
                response.error_message()
            ),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    fn topic_line(label: &str, topic: &str) -> String {
        format!("{} {}\n", label.cyan().bold(), topic)
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_response(&self, response: &AgentResponse) -> String {
        match response.answer() {
            Some(text) => text.to_string(),
            None => format!(
                "{} {}: {}",
                "x".red(),
                response.agent.bold(),
                response.error_message()
            ),
        }
    }

    fn format_responses(&self, responses: &[AgentResponse]) -> String {
        let mut output = Self::header("Parallel Answers");
        output.push('\n');
        for response in responses {
            output.push_str(&Self::response_block(response));
        }
        output.push_str(&Self::footer());
        output
    }

    fn format_consensus(&self, result: &ConsensusResult) -> String {
        let mut output = Self::header("Consensus");
        output.push('\n');
        output.push_str(&Self::topic_line("Question:", &result.topic));

        output.push_str(&Self::section_header("Individual Answers"));
        for response in &result.individual {
            output.push_str(&Self::response_block(response));
        }

        output.push_str(&Self::section_header(&format!(
            "Synthesis ({})",
            result.synthesis.agent
        )));
        match result.synthesis.answer() {
            Some(text) => output.push_str(&format!("\n{}\n", text)),
            None => output.push_str(&format!(
                "\n{} {}\n",
                "Not available:".red().bold(),
                result.synthesis.error_message()
            )),
        }

        output.push_str(&Self::footer());
        output
    }

    fn format_debate(&self, transcript: &DebateTranscript) -> String {
        let mut output = Self::header("Debate");
        output.push('\n');
        output.push_str(&Self::topic_line("Topic:", &transcript.topic));

        for round in &transcript.rounds {
            output.push_str(&Self::section_header(&format!(
                "Round {} of {}",
                round.round,
                transcript.rounds.len()
            )));
            for response in &round.responses {
                output.push_str(&Self::response_block(response));
            }
        }

        output.push_str(&Self::footer());
        output
    }

    fn format_council(&self, record: &CouncilRecord) -> String {
        let mut output = Self::header("Council");
        output.push('\n');
        output.push_str(&Self::topic_line("Question:", &record.topic));

        output.push_str(&Self::section_header("Stage 1: Individual Answers"));
        for response in &record.individual {
            output.push_str(&Self::response_block(response));
        }

        if let Some(reason) = &record.peer_review_skipped {
            output.push_str(&format!(
                "\n{} {}\n",
                "Peer review skipped:".yellow().bold(),
                reason
            ));
            output.push_str(&Self::footer());
            return output;
        }

        output.push_str(&Self::section_header("Stage 2: Anonymous Peer Review"));
        for review in &record.peer_reviews {
            output.push_str(&Self::response_block(review));
        }

        if let Some(brief) = record.chairman_brief() {
            output.push_str(&Self::section_header("Stage 3: Chairman Brief"));
            output.push('\n');
            output.push_str(&Self::indent(&brief, "  "));
            output.push('\n');
        }

        output.push_str(&Self::footer());
        output
    }
}
