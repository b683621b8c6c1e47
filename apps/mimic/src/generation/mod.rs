// Generation pipeline: tone analysis, subject generation, post synthesis.
// All LLM calls go through llm_client::TextGenerator — no direct API calls here.

pub mod prompts;
pub mod subject;
pub mod synthesizer;
pub mod tone;
