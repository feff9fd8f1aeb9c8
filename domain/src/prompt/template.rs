//! Prompt templates for the orchestration patterns

use crate::orchestration::council::AnonymizedBundle;

/// Templates for the prompt bodies each pattern sends after the first call
pub struct PromptTemplate;

impl PromptTemplate {
    /// Synthesis prompt fed the successful consensus answers.
    ///
    /// `answers` are `(display name, answer)` pairs.
    pub fn consensus_synthesis(topic: &str, answers: &[(String, String)]) -> String {
        let subject = match answers.len() {
            1 => "One AI agent was".to_string(),
            n => format!("{} AI agents were", count_word(n)),
        };
        let mut prompt = format!("{} asked: \"{}\"\n", subject, topic);

        for (name, answer) in answers {
            prompt.push_str(&format!("\n{}'s answer:\n{}\n", name, answer));
        }

        prompt.push_str(
            r#"
Synthesize these perspectives. Identify:
1. Points of agreement
2. Key differences
3. A balanced recommendation
Be concise and structured."#,
        );

        prompt
    }

    /// Prompt for debate round `round` (2 or later).
    ///
    /// `own` is the agent's previous answer; `others` are the other agents'
    /// previous answers as `(display name, answer)` pairs, verbatim.
    pub fn debate_round(
        topic: &str,
        round: u8,
        total: u8,
        own: &str,
        others: &[(String, String)],
    ) -> String {
        let mut prompt = format!("Topic: {}\n\nYour previous response:\n{}\n", topic, own);

        for (name, answer) in others {
            prompt.push_str(&format!("\n{}'s previous response:\n{}\n", name, answer));
        }

        prompt.push_str(&format!(
            "\nThis is round {} of {} of a debate. Refine your position, \
             address their points, and strengthen your argument.",
            round, total
        ));

        prompt
    }

    /// Peer review prompt over an anonymized bundle.
    ///
    /// The output depends only on the topic and the bundle, so every
    /// reviewer receives the same bytes. It never names a participant.
    pub fn council_review(topic: &str, bundle: &AnonymizedBundle) -> String {
        let mut prompt = format!(
            r#"Question: {}

Below are {} anonymous answers to this question, labelled by letter.
Authorship is hidden on purpose. Do not guess or mention who wrote which answer.
"#,
            topic,
            bundle.len()
        );

        for answer in &bundle.answers {
            prompt.push_str(&format!("\n--- Answer {} ---\n{}\n", answer.label, answer.text));
        }

        prompt.push_str(
            r#"
For each answer, provide:
1. A brief critique (2-3 sentences)
2. Key strengths
3. Errors or gaps

Then give a final ranking from best to worst, using the labels only, on one line in the form:
RANKING: X > Y > Z"#,
        );

        prompt
    }
}

fn count_word(n: usize) -> String {
    match n {
        2 => "Two".to_string(),
        3 => "Three".to_string(),
        4 => "Four".to_string(),
        n => n.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestration::council::AnonymizedAnswer;

    #[test]
    fn test_consensus_synthesis_includes_answers() {
        let answers = vec![
            ("Codex".to_string(), "Use tokio".to_string()),
            ("Gemini".to_string(), "Use async-std".to_string()),
        ];
        let prompt = PromptTemplate::consensus_synthesis("Which runtime?", &answers);
        assert!(prompt.starts_with("Two AI agents were asked: \"Which runtime?\""));
        assert!(prompt.contains("Codex's answer:\nUse tokio"));
        assert!(prompt.contains("Gemini's answer:\nUse async-std"));
        assert!(prompt.contains("Points of agreement"));
    }

    #[test]
    fn test_debate_round_carries_answers_verbatim() {
        let others = vec![("Gemini".to_string(), "line one\n  line two".to_string())];
        let prompt = PromptTemplate::debate_round("Tabs or spaces?", 2, 3, "Tabs.", &others);
        assert!(prompt.contains("Your previous response:\nTabs.\n"));
        assert!(prompt.contains("Gemini's previous response:\nline one\n  line two\n"));
        assert!(prompt.contains("round 2 of 3"));
    }

    #[test]
    fn test_council_review_lists_labels_only() {
        let bundle = AnonymizedBundle {
            answers: vec![
                AnonymizedAnswer {
                    label: "A".into(),
                    text: "first".into(),
                },
                AnonymizedAnswer {
                    label: "B".into(),
                    text: "second".into(),
                },
            ],
        };
        let prompt = PromptTemplate::council_review("Q?", &bundle);
        assert!(prompt.contains("--- Answer A ---\nfirst"));
        assert!(prompt.contains("--- Answer B ---\nsecond"));
        assert!(prompt.contains("2 anonymous answers"));
        assert_eq!(prompt, PromptTemplate::council_review("Q?", &bundle));
    }
}
