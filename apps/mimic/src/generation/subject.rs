//! Subject Generator — proposes a short, fresh topic for the next post.
//!
//! Novelty is requested from the model, not enforced. A repeat of an earlier
//! subject is detected, logged and reported, but still used.

use serde::Serialize;
use tracing::{info, warn};

use crate::errors::MimicError;
use crate::generation::prompts::{NO_PREVIOUS_SUBJECTS, SUBJECT_PROMPT_TEMPLATE};
use crate::llm_client::prompts::fill_template;
use crate::llm_client::{SamplingProfile, TextGenerator};
use crate::timeline::PostCollection;

/// Subjects used so far in a session, oldest first. Append-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SubjectHistory(Vec<String>);

impl SubjectHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, subject: impl Into<String>) {
        self.0.push(subject.into());
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Case-insensitive membership, ignoring surrounding whitespace.
    pub fn contains(&self, subject: &str) -> bool {
        let needle = subject.trim().to_lowercase();
        self.0.iter().any(|s| s.trim().to_lowercase() == needle)
    }

    /// How the history reads inside the subject prompt.
    pub fn render(&self) -> String {
        if self.0.is_empty() {
            return NO_PREVIOUS_SUBJECTS.to_string();
        }
        self.0
            .iter()
            .map(|s| format!("\"{s}\""))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A generated subject and whether it repeats one already in the history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subject {
    pub text: String,
    pub repeated: bool,
}

/// Asks the model for a new subject unlike anything in `used`.
pub async fn generate_subject(
    llm: &dyn TextGenerator,
    profile: &SamplingProfile,
    posts: &PostCollection,
    used: &SubjectHistory,
) -> Result<Subject, MimicError> {
    let prompt = build_subject_prompt(posts.examples(), used);
    let reply = llm.generate(&prompt, profile).await?;
    let text = clean_subject(&reply);

    let repeated = used.contains(&text);
    if repeated {
        warn!("Model repeated an earlier subject: {:?}", text);
    } else {
        info!("New subject: {:?}", text);
    }

    Ok(Subject { text, repeated })
}

pub fn build_subject_prompt(examples: &str, used: &SubjectHistory) -> String {
    let used_subjects = used.render();
    fill_template(
        SUBJECT_PROMPT_TEMPLATE,
        &[("posts", examples), ("used_subjects", &used_subjects)],
    )
}

/// Trims whitespace and one layer of wrapping quotes.
fn clean_subject(reply: &str) -> String {
    let trimmed = reply.trim();
    let unquoted = ['"', '\'', '“']
        .iter()
        .find_map(|&open| {
            let close = if open == '“' { '”' } else { open };
            trimmed
                .strip_prefix(open)
                .and_then(|rest| rest.strip_suffix(close))
        })
        .unwrap_or(trimmed);
    unquoted.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedGenerator;
    use crate::llm_client::GenerationProfiles;

    fn collection(examples: &str) -> PostCollection {
        PostCollection::new("42".to_string(), vec![], examples.to_string())
    }

    #[test]
    fn test_empty_history_renders_placeholder() {
        assert_eq!(SubjectHistory::new().render(), "none yet");
    }

    #[test]
    fn test_history_renders_in_order() {
        let mut history = SubjectHistory::new();
        history.push("Moon gardening");
        history.push("Vintage keyboards");
        assert_eq!(history.render(), r#""Moon gardening", "Vintage keyboards""#);
    }

    #[test]
    fn test_history_contains_ignores_case_and_padding() {
        let mut history = SubjectHistory::new();
        history.push("Moon Gardening");
        assert!(history.contains("  moon gardening "));
        assert!(!history.contains("Sun gardening"));
    }

    #[test]
    fn test_clean_subject_strips_quotes_and_whitespace() {
        assert_eq!(clean_subject("  \"Urban beekeeping\"\n"), "Urban beekeeping");
        assert_eq!(clean_subject("'Tax season'"), "Tax season");
        assert_eq!(clean_subject("“Night trains”"), "Night trains");
        assert_eq!(clean_subject("Plain subject"), "Plain subject");
        assert_eq!(clean_subject("\"unbalanced"), "\"unbalanced");
    }

    #[test]
    fn test_subject_prompt_embeds_posts_and_every_prior_subject() {
        let mut history = SubjectHistory::new();
        history.push("Coffee rituals");
        history.push("Remote work");
        let examples = "Deploys are my cardio.\nI name my servers after cheeses.";

        let prompt = build_subject_prompt(examples, &history);

        assert!(prompt.contains(examples));
        assert!(prompt.contains("\"Coffee rituals\""));
        assert!(prompt.contains("\"Remote work\""));
        assert!(prompt.contains("under 4 words"));
        assert!(prompt.contains("Do not include any words from the examples"));
    }

    #[tokio::test]
    async fn test_generate_subject_uses_creative_profile() {
        let llm = ScriptedGenerator::with_replies(["\"Lighthouse keepers\""]);
        let profiles = GenerationProfiles::for_model("gpt-3.5-turbo");

        let subject = generate_subject(
            &llm,
            &profiles.creative,
            &collection("posts"),
            &SubjectHistory::new(),
        )
        .await
        .unwrap();

        assert_eq!(subject.text, "Lighthouse keepers");
        assert!(!subject.repeated);
        assert_eq!(llm.calls()[0].profile.temperature, 1.0);
    }

    #[tokio::test]
    async fn test_generate_subject_flags_repeat_but_keeps_it() {
        let llm = ScriptedGenerator::with_replies(["coffee rituals"]);
        let profiles = GenerationProfiles::for_model("gpt-3.5-turbo");
        let mut history = SubjectHistory::new();
        history.push("Coffee rituals");

        let subject = generate_subject(&llm, &profiles.creative, &collection("p"), &history)
            .await
            .unwrap();

        assert_eq!(subject.text, "coffee rituals");
        assert!(subject.repeated);
    }
}
