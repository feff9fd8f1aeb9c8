//! Consensus records and the deterministic fallback merge

use crate::orchestration::value_objects::{AgentResponse, FailureKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Agent identifier used for a synthesis produced without a model call.
pub const MERGE_SYNTHESIZER_ID: &str = "merge";

/// Result of a consensus run: the individual answers and their synthesis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsensusResult {
    pub topic: String,
    /// Phase 1: one response per participating agent, in participant order
    pub individual: Vec<AgentResponse>,
    /// Phase 2: the synthesis (a failure when phase 1 produced nothing)
    pub synthesis: AgentResponse,
}

impl ConsensusResult {
    pub fn new(
        topic: impl Into<String>,
        individual: Vec<AgentResponse>,
        synthesis: AgentResponse,
    ) -> Self {
        Self {
            topic: topic.into(),
            individual,
            synthesis,
        }
    }

    /// A result whose synthesis was never attempted because every agent
    /// failed. The synthesis error lists each agent's reason.
    pub fn all_failed(topic: impl Into<String>, individual: Vec<AgentResponse>) -> Self {
        let reasons = individual
            .iter()
            .map(|r| format!("{}: {}", r.agent, r.error_message()))
            .collect::<Vec<_>>()
            .join("; ");
        let synthesis = AgentResponse::failure(
            "synthesis",
            FailureKind::Upstream,
            format!("all agents failed, synthesis not attempted ({})", reasons),
        );
        Self::new(topic, individual, synthesis)
    }

    pub fn successful(&self) -> impl Iterator<Item = &AgentResponse> {
        self.individual.iter().filter(|r| r.success)
    }

    pub fn failed(&self) -> impl Iterator<Item = &AgentResponse> {
        self.individual.iter().filter(|r| !r.success)
    }
}

/// Merge answers without a model: points every answer shares, then what
/// each answer adds on its own.
///
/// A "point" is a non-empty line, compared after trimming list markers and
/// case-folding. Output order follows the input order.
pub fn merge_answers(topic: &str, answers: &[(String, String)]) -> String {
    let point_sets: Vec<BTreeSet<String>> = answers
        .iter()
        .map(|(_, text)| text.lines().filter_map(normalize_point).collect())
        .collect();

    let shared: BTreeSet<String> = match point_sets.split_first() {
        Some((first, rest)) if !rest.is_empty() => first
            .iter()
            .filter(|p| rest.iter().all(|set| set.contains(*p)))
            .cloned()
            .collect(),
        _ => BTreeSet::new(),
    };

    let mut out = format!("Merged answers for: {}\n", topic);

    out.push_str("\n## Points of agreement\n");
    let mut agreed = Vec::new();
    if let Some((_, first_text)) = answers.first() {
        for line in first_text.lines() {
            if let Some(point) = normalize_point(line)
                && shared.contains(&point)
                && !agreed.contains(&point)
            {
                out.push_str(&format!("- {}\n", clean_point(line)));
                agreed.push(point);
            }
        }
    }
    if agreed.is_empty() {
        out.push_str("- (none found verbatim)\n");
    }

    out.push_str("\n## Key differences\n");
    for (name, text) in answers {
        out.push_str(&format!("\n### {}\n", name));
        let mut any = false;
        for line in text.lines() {
            if let Some(point) = normalize_point(line)
                && !shared.contains(&point)
            {
                out.push_str(&format!("- {}\n", clean_point(line)));
                any = true;
            }
        }
        if !any {
            out.push_str("- (nothing beyond the shared points)\n");
        }
    }

    out
}

fn clean_point(line: &str) -> &str {
    line.trim()
        .trim_start_matches(['-', '*', '•'])
        .trim_start()
}

fn normalize_point(line: &str) -> Option<String> {
    let cleaned = clean_point(line)
        .trim_end_matches(['.', ';', ','])
        .to_lowercase();
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    (!collapsed.is_empty()).then_some(collapsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_failed_lists_reasons() {
        let result = ConsensusResult::all_failed(
            "topic",
            vec![
                AgentResponse::failure("codex", FailureKind::Timeout, "timeout after 5s"),
                AgentResponse::failure("gemini", FailureKind::SpawnFailure, "not found"),
            ],
        );
        assert!(!result.synthesis.success);
        assert_eq!(result.synthesis.failure, Some(FailureKind::Upstream));
        let error = result.synthesis.error_message();
        assert!(error.contains("codex: timeout after 5s"));
        assert!(error.contains("gemini: not found"));
        assert_eq!(result.failed().count(), 2);
    }

    #[test]
    fn test_merge_finds_shared_points() {
        let answers = vec![
            (
                "Codex".to_string(),
                "- Use Result for errors.\n- Prefer thiserror".to_string(),
            ),
            (
                "Gemini".to_string(),
                "* use result for errors\n* Avoid panics".to_string(),
            ),
        ];
        let merged = merge_answers("error handling", &answers);
        let agreement = merged
            .split("## Key differences")
            .next()
            .unwrap()
            .to_string();
        assert!(agreement.contains("- Use Result for errors."));
        assert!(merged.contains("### Codex\n- Prefer thiserror"));
        assert!(merged.contains("### Gemini\n- Avoid panics"));
    }

    #[test]
    fn test_merge_single_answer_has_no_agreement() {
        let answers = vec![("Codex".to_string(), "only one".to_string())];
        let merged = merge_answers("t", &answers);
        assert!(merged.contains("- (none found verbatim)"));
        assert!(merged.contains("### Codex\n- only one"));
    }
}
