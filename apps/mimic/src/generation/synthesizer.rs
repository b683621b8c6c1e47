//! Post Synthesizer — writes a new post about a subject in the described tone.

use serde::Serialize;
use tracing::{info, warn};

use crate::errors::MimicError;
use crate::generation::prompts::{MAX_POST_CHARS, POST_PROMPT_TEMPLATE};
use crate::generation::tone::ToneDescription;
use crate::llm_client::prompts::{fill_template, MIMIC_PERSONA};
use crate::llm_client::{SamplingProfile, TextGenerator};
use crate::timeline::PostCollection;

/// A synthesized post.
///
/// The length ceiling is advisory: an over-length post is flagged, never cut.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedPost {
    pub text: String,
    pub char_count: usize,
    pub over_limit: bool,
}

impl GeneratedPost {
    pub fn new(text: String) -> Self {
        let char_count = text.chars().count();
        Self {
            over_limit: char_count > MAX_POST_CHARS,
            char_count,
            text,
        }
    }
}

/// Asks the model for a post about `subject`, styled after `posts` and `tone`.
pub async fn synthesize(
    llm: &dyn TextGenerator,
    profile: &SamplingProfile,
    tone: &ToneDescription,
    posts: &PostCollection,
    subject: &str,
) -> Result<GeneratedPost, MimicError> {
    let prompt = build_post_prompt(tone, posts.examples(), subject);
    let reply = llm.generate(&prompt, profile).await?;
    let post = GeneratedPost::new(reply.trim().to_string());

    if post.over_limit {
        warn!(
            "Generated post is {} chars (advisory max {}): {:?}",
            post.char_count,
            MAX_POST_CHARS,
            post.text.chars().take(60).collect::<String>()
        );
    } else {
        info!("Generated post ({} chars)", post.char_count);
    }

    Ok(post)
}

pub fn build_post_prompt(tone: &ToneDescription, examples: &str, subject: &str) -> String {
    let max_chars = MAX_POST_CHARS.to_string();
    fill_template(
        POST_PROMPT_TEMPLATE,
        &[
            ("persona", MIMIC_PERSONA),
            ("max_chars", &max_chars),
            ("tone", tone.as_str()),
            ("posts", examples),
            ("subject", subject),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedGenerator;
    use crate::llm_client::GenerationProfiles;

    #[test]
    fn test_post_prompt_contains_every_field_verbatim() {
        let tone = ToneDescription::new("1. Pace: frantic\n2. Mood: gleeful {posts}");
        let examples = "Rebased onto main. Regret everything.\n{tone} is a vibe";
        let subject = "Antique maps";

        let prompt = build_post_prompt(&tone, examples, subject);

        assert!(prompt.contains(tone.as_str()));
        assert!(prompt.contains(examples));
        assert!(prompt.contains("about Antique maps ."));
        assert!(prompt.contains("under 300 characters"));
        assert!(prompt.contains(MIMIC_PERSONA));
    }

    #[test]
    fn test_generated_post_flags_over_limit_without_truncating() {
        let long = "é".repeat(MAX_POST_CHARS + 1);
        let post = GeneratedPost::new(long.clone());
        assert!(post.over_limit);
        assert_eq!(post.char_count, MAX_POST_CHARS + 1);
        assert_eq!(post.text, long);

        let exact = GeneratedPost::new("x".repeat(MAX_POST_CHARS));
        assert!(!exact.over_limit);
    }

    #[tokio::test]
    async fn test_synthesize_uses_creative_profile_and_trims() {
        let llm = ScriptedGenerator::with_replies(["\n  Maps lie. Borders lie louder.  \n"]);
        let profiles = GenerationProfiles::for_model("gpt-3.5-turbo");
        let posts = PostCollection::new("42".to_string(), vec![], "ex".to_string());
        let tone = ToneDescription::new("dry");

        let post = synthesize(&llm, &profiles.creative, &tone, &posts, "Antique maps")
            .await
            .unwrap();

        assert_eq!(post.text, "Maps lie. Borders lie louder.");
        let calls = llm.calls();
        assert_eq!(calls[0].profile.temperature, 1.0);
        assert_eq!(calls[0].prompt, build_post_prompt(&tone, "ex", "Antique maps"));
    }

    #[tokio::test]
    async fn test_synthesize_propagates_generation_error() {
        let llm = ScriptedGenerator::failing(429, "quota exceeded");
        let profiles = GenerationProfiles::for_model("gpt-3.5-turbo");
        let posts = PostCollection::new("42".to_string(), vec![], "ex".to_string());
        let err = synthesize(&llm, &profiles.creative, &ToneDescription::new("t"), &posts, "s")
            .await
            .unwrap_err();
        assert!(matches!(err, MimicError::Generation(_)));
    }
}
