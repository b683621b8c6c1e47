//! Tone Analyzer — turns example posts into a free-text style fingerprint.
//!
//! Always runs on the `exact` sampling profile so the same posts yield the
//! same description. The reply is kept verbatim: downstream prompts treat it
//! as opaque prose even though the prompt asks for a list.

use std::fmt;

use serde::Serialize;
use tracing::info;

use crate::errors::MimicError;
use crate::generation::prompts::TONE_PROMPT_TEMPLATE;
use crate::llm_client::prompts::fill_template;
use crate::llm_client::{SamplingProfile, TextGenerator};
use crate::timeline::PostCollection;

/// Opaque description of an author's tone. Never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ToneDescription(String);

impl ToneDescription {
    #[cfg(test)]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ToneDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Asks the model to describe the tone of `posts` along the dimensions in `rubric`.
pub async fn describe_tone(
    llm: &dyn TextGenerator,
    profile: &SamplingProfile,
    rubric: &str,
    posts: &PostCollection,
) -> Result<ToneDescription, MimicError> {
    let prompt = build_tone_prompt(rubric, posts.examples());
    let text = llm.generate(&prompt, profile).await?;
    info!("Tone described ({} chars)", text.chars().count());
    Ok(ToneDescription(text))
}

pub fn build_tone_prompt(rubric: &str, examples: &str) -> String {
    fill_template(
        TONE_PROMPT_TEMPLATE,
        &[("rubric", rubric), ("posts", examples)],
    )
}
