//! Summarization over a hosted chat-completion service.
//!
//! All documents are "stuffed" into the prompt template's single text slot and
//! sent as one request. Long inputs are not chunked or truncated; they fail at
//! the provider if they exceed its context window.

mod chat;
mod model;

pub use chat::ChatSummarizer;
pub use model::LlmModel;

use crate::config::TEXT_SLOT;
use crate::document::{stuff, Document};
use crate::error::{PrecisError, Result};
use async_trait::async_trait;

/// Credential and model for one summarization call.
#[derive(Clone)]
pub struct ModelConfig {
    pub api_key: String,
    pub model: LlmModel,
}

impl ModelConfig {
    pub fn new(api_key: impl Into<String>, model: LlmModel) -> Self {
        Self {
            api_key: api_key.into(),
            model,
        }
    }
}

impl std::fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .finish()
    }
}

/// Place the stuffed document text into the template's text slot.
pub fn render_prompt(template: &str, documents: &[Document]) -> Result<String> {
    if !template.contains(TEXT_SLOT) {
        return Err(PrecisError::Config(format!(
            "prompt template has no {} slot",
            TEXT_SLOT
        )));
    }
    Ok(template.replace(TEXT_SLOT, &stuff(documents)))
}

/// Trait for summarization backends.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize the documents with a single completion request.
    async fn summarize(
        &self,
        documents: &[Document],
        template: &str,
        config: &ModelConfig,
    ) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_prompt_stuffs_all_documents() {
        let docs = vec![Document::new("part one"), Document::new("part two")];
        let prompt = render_prompt("Summarize:\n{{text}}\nEnd", &docs).unwrap();
        assert_eq!(prompt, "Summarize:\npart one\n\npart two\nEnd");
    }

    #[test]
    fn test_render_prompt_requires_slot() {
        let err = render_prompt("no slot here", &[Document::new("x")]).unwrap_err();
        assert!(matches!(err, PrecisError::Config(_)));
    }

    #[test]
    fn test_model_config_debug_redacts_key() {
        let config = ModelConfig::new("gsk_secret", LlmModel::Llama3_8b8192);
        let debug = format!("{:?}", config);
        assert!(!debug.contains("gsk_secret"));
        assert!(debug.contains("Llama3_8b8192"));
    }
}
