//! Three-stage council records
//!
//! ```text
//! Individual ──► PeerReview ──► Chairman
//! ```
//!
//! - **Individual**: the orchestrating party's own answer plus one
//!   independent answer per agent.
//! - **PeerReview**: every successful answer gets an opaque label; the same
//!   anonymized bundle goes to every reviewer.
//! - **Chairman**: the orchestrating party's own synthesis step. The council
//!   only assembles the inputs for it.
//!
//! The label assignment is shuffled per council run and is never written
//! into any prompt sent to a participant.

use crate::orchestration::value_objects::AgentResponse;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Fixed label set handed out to anonymized answers.
pub const LABELS: [&str; 8] = ["A", "B", "C", "D", "E", "F", "G", "H"];

/// Council stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CouncilStage {
    Individual,
    PeerReview,
    Chairman,
}

impl CouncilStage {
    pub fn display_name(&self) -> &'static str {
        match self {
            CouncilStage::Individual => "Stage 1: Individual",
            CouncilStage::PeerReview => "Stage 2: Peer Review",
            CouncilStage::Chairman => "Stage 3: Chairman",
        }
    }
}

/// Write-once mapping between participants and opaque labels.
///
/// Built once per council run by [`AnonymizationMap::assign`]; it has no
/// mutators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnonymizationMap {
    /// `(label, participant)` pairs in label order
    entries: Vec<(String, String)>,
}

impl AnonymizationMap {
    /// Assign labels to participants in a random order.
    ///
    /// Participants beyond the size of [`LABELS`] are not labelled.
    pub fn assign<R: Rng + ?Sized>(participants: &[String], rng: &mut R) -> Self {
        let mut shuffled: Vec<String> = participants.to_vec();
        shuffled.shuffle(rng);
        let entries = LABELS
            .iter()
            .zip(shuffled)
            .map(|(label, participant)| (label.to_string(), participant))
            .collect();
        Self { entries }
    }

    pub fn label_of(&self, participant: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, p)| p == participant)
            .map(|(label, _)| label.as_str())
    }

    pub fn participant_of(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, participant)| participant.as_str())
    }

    /// `(label, participant)` pairs in label order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(l, p)| (l.as_str(), p.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One labelled answer inside the review bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnonymizedAnswer {
    pub label: String,
    pub text: String,
}

/// The answers every reviewer sees, ordered by label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnonymizedBundle {
    pub answers: Vec<AnonymizedAnswer>,
}

impl AnonymizedBundle {
    /// Build the bundle from the successful individual answers.
    ///
    /// Failed answers are excluded and never consume a label.
    pub fn build<R: Rng + ?Sized>(
        individual: &[AgentResponse],
        rng: &mut R,
    ) -> (Self, AnonymizationMap) {
        let successful: Vec<&AgentResponse> = individual.iter().filter(|r| r.success).collect();
        let participants: Vec<String> = successful.iter().map(|r| r.agent.clone()).collect();
        let map = AnonymizationMap::assign(&participants, rng);

        let answers = map
            .entries()
            .filter_map(|(label, participant)| {
                successful
                    .iter()
                    .find(|r| r.agent == participant)
                    .map(|r| AnonymizedAnswer {
                        label: label.to_string(),
                        text: r.text.clone(),
                    })
            })
            .collect();

        (Self { answers }, map)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

/// Everything the council assembled for the chairman.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouncilRecord {
    pub topic: String,
    /// Stages whose results are present in this record
    pub stages: Vec<CouncilStage>,
    /// Stage 1: the orchestrator's answer first, then one per agent
    pub individual: Vec<AgentResponse>,
    /// Stage 2: one review per reviewing agent
    pub peer_reviews: Vec<AgentResponse>,
    /// The exact review prompt body every reviewer received; the
    /// orchestrating party ranks the same bundle with it before chairing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_prompt: Option<String>,
    /// Why peer review did not run, if it was skipped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peer_review_skipped: Option<String>,
    #[serde(skip)]
    anonymization: Option<AnonymizationMap>,
}

impl CouncilRecord {
    /// A record that stops after the individual stage.
    pub fn individual_only(
        topic: impl Into<String>,
        individual: Vec<AgentResponse>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            topic: topic.into(),
            stages: vec![CouncilStage::Individual],
            individual,
            peer_reviews: Vec::new(),
            review_prompt: None,
            peer_review_skipped: Some(reason.into()),
            anonymization: None,
        }
    }

    /// A record with both the individual and peer-review stages, ready for
    /// the chairman.
    pub fn reviewed(
        topic: impl Into<String>,
        individual: Vec<AgentResponse>,
        peer_reviews: Vec<AgentResponse>,
        review_prompt: impl Into<String>,
        anonymization: AnonymizationMap,
    ) -> Self {
        Self {
            topic: topic.into(),
            stages: vec![
                CouncilStage::Individual,
                CouncilStage::PeerReview,
                CouncilStage::Chairman,
            ],
            individual,
            peer_reviews,
            review_prompt: Some(review_prompt.into()),
            peer_review_skipped: None,
            anonymization: Some(anonymization),
        }
    }

    /// The label assignment of this run, for in-process inspection only.
    ///
    /// Never serialized.
    pub fn anonymization(&self) -> Option<&AnonymizationMap> {
        self.anonymization.as_ref()
    }

    pub fn is_reviewed(&self) -> bool {
        self.stages.contains(&CouncilStage::PeerReview)
    }

    pub fn successful_individual(&self) -> impl Iterator<Item = &AgentResponse> {
        self.individual.iter().filter(|r| r.success)
    }

    /// Material for the chairman: attributed answers, the reviews, and the
    /// key that resolves the labels the reviews refer to.
    ///
    /// Returns `None` when peer review did not run.
    pub fn chairman_brief(&self) -> Option<String> {
        let map = self.anonymization.as_ref()?;

        let mut brief = format!("Council question: {}\n\n## Individual answers\n", self.topic);
        for response in self.successful_individual() {
            let label = map.label_of(&response.agent).unwrap_or("?");
            brief.push_str(&format!(
                "\n### Answer {} ({})\n{}\n",
                label, response.agent, response.text
            ));
        }

        brief.push_str("\n## Peer reviews\n");
        for review in &self.peer_reviews {
            match review.answer() {
                Some(text) => brief.push_str(&format!("\n### Review by {}\n{}\n", review.agent, text)),
                None => brief.push_str(&format!(
                    "\n### Review by {} (failed)\n{}\n",
                    review.agent,
                    review.error_message()
                )),
            }
        }

        brief.push_str("\n## Label key\n");
        for (label, participant) in map.entries() {
            brief.push_str(&format!("- {} = {}\n", label, participant));
        }

        Some(brief)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestration::value_objects::FailureKind;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn participants() -> Vec<String> {
        vec!["orchestrator".into(), "codex".into(), "gemini".into()]
    }

    #[test]
    fn test_assign_labels_every_participant_once() {
        let mut rng = StdRng::seed_from_u64(7);
        let map = AnonymizationMap::assign(&participants(), &mut rng);
        assert_eq!(map.len(), 3);
        let labels: Vec<&str> = map.entries().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["A", "B", "C"]);
        for p in participants() {
            let label = map.label_of(&p).unwrap();
            assert_eq!(map.participant_of(label), Some(p.as_str()));
        }
    }

    #[test]
    fn test_assignment_varies_across_runs() {
        let mut rng = StdRng::seed_from_u64(42);
        let first_labels: std::collections::HashSet<String> = (0..64)
            .map(|_| {
                AnonymizationMap::assign(&participants(), &mut rng)
                    .label_of("orchestrator")
                    .unwrap()
                    .to_string()
            })
            .collect();
        assert!(first_labels.len() > 1);
    }

    #[test]
    fn test_bundle_excludes_failures() {
        let individual = vec![
            AgentResponse::success("orchestrator", "mine"),
            AgentResponse::failure("codex", FailureKind::Timeout, "timeout"),
            AgentResponse::success("gemini", "theirs"),
        ];
        let mut rng = StdRng::seed_from_u64(1);
        let (bundle, map) = AnonymizedBundle::build(&individual, &mut rng);
        assert_eq!(bundle.len(), 2);
        assert_eq!(map.len(), 2);
        assert!(map.label_of("codex").is_none());
        let labels: Vec<&str> = bundle.answers.iter().map(|a| a.label.as_str()).collect();
        assert_eq!(labels, vec!["A", "B"]);
        for answer in &bundle.answers {
            let author = map.participant_of(&answer.label).unwrap();
            let original = individual.iter().find(|r| r.agent == author).unwrap();
            assert_eq!(original.text, answer.text);
        }
    }

    #[test]
    fn test_record_never_serializes_mapping() {
        let mut rng = StdRng::seed_from_u64(3);
        let individual = vec![
            AgentResponse::success("orchestrator", "x"),
            AgentResponse::success("codex", "y"),
        ];
        let (_, map) = AnonymizedBundle::build(&individual, &mut rng);
        let record = CouncilRecord::reviewed("t", individual, vec![], "review", map);
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("anonymization"));
        assert!(record.anonymization().is_some());
        assert!(record.is_reviewed());
    }

    #[test]
    fn test_individual_only_record() {
        let record = CouncilRecord::individual_only(
            "t",
            vec![AgentResponse::success("orchestrator", "x")],
            "fewer than two successful answers",
        );
        assert!(!record.is_reviewed());
        assert_eq!(record.stages, vec![CouncilStage::Individual]);
        assert!(record.peer_review_skipped.is_some());
        assert!(record.chairman_brief().is_none());
    }

    #[test]
    fn test_chairman_brief_resolves_labels() {
        let mut rng = StdRng::seed_from_u64(11);
        let individual = vec![
            AgentResponse::success("orchestrator", "mine"),
            AgentResponse::success("codex", "theirs"),
        ];
        let (_, map) = AnonymizedBundle::build(&individual, &mut rng);
        let codex_label = map.label_of("codex").unwrap().to_string();
        let record = CouncilRecord::reviewed(
            "t",
            individual,
            vec![AgentResponse::success("codex", "RANKING: A > B")],
            "review",
            map,
        );
        let brief = record.chairman_brief().unwrap();
        assert!(brief.contains(&format!("### Answer {} (codex)\ntheirs", codex_label)));
        assert!(brief.contains("### Review by codex\nRANKING: A > B"));
        assert!(brief.contains(&format!("- {} = codex", codex_label)));
    }
}
