//! Pipeline coordination.
//!
//! Runs validation, extraction and summarization for one request, in order,
//! reporting each stage transition to the caller.

use crate::config::{Prompts, Settings};
use crate::document::Document;
use crate::error::{PrecisError, Result};
use crate::extract::{
    ContentSource, Extractor, HttpPageFetcher, PageExtractor, TranscriptExtractor, UrlExtractor,
};
use crate::summarize::{ChatSummarizer, LlmModel, ModelConfig, Summarizer};
use crate::transcript::YoutubeTranscriptClient;
use crate::validate::validate;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};
use url::Url;

/// User-supplied values for one invocation.
#[derive(Clone)]
pub struct SummaryRequest {
    pub api_key: String,
    pub model: LlmModel,
    pub url: String,
}

impl SummaryRequest {
    pub fn new(api_key: impl Into<String>, model: LlmModel, url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model,
            url: url.into(),
        }
    }
}

impl std::fmt::Debug for SummaryRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SummaryRequest")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("url", &self.url)
            .finish()
    }
}

/// How an invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Error,
}

/// Per-invocation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Validating,
    Extracting,
    Summarizing,
    Displaying(Outcome),
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Idle => write!(f, "idle"),
            Stage::Validating => write!(f, "validating"),
            Stage::Extracting => write!(f, "extracting"),
            Stage::Summarizing => write!(f, "summarizing"),
            Stage::Displaying(Outcome::Success) => write!(f, "displaying success"),
            Stage::Displaying(Outcome::Error) => write!(f, "displaying error"),
        }
    }
}

/// Validator → Extractor → Summarizer.
pub struct Pipeline {
    extractor: Arc<dyn Extractor>,
    summarizer: Arc<dyn Summarizer>,
    template: String,
}

impl Pipeline {
    pub fn new(
        extractor: Arc<dyn Extractor>,
        summarizer: Arc<dyn Summarizer>,
        template: impl Into<String>,
    ) -> Self {
        Self {
            extractor,
            summarizer,
            template: template.into(),
        }
    }

    /// Wire the production collaborators from settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let fetch_timeout = Duration::from_secs(settings.fetch.timeout_secs);

        let transcripts = YoutubeTranscriptClient::new(
            &settings.youtube,
            &settings.fetch.user_agent,
            fetch_timeout,
        )?;
        let extractor = UrlExtractor::new(
            TranscriptExtractor::new(Arc::new(transcripts)),
            PageExtractor::new(Arc::new(HttpPageFetcher::new(fetch_timeout)))
                .with_settings(&settings.fetch),
        );

        let summarizer =
            ChatSummarizer::new(&settings.llm).with_tracer(crate::telemetry::tracer());

        let prompts = Prompts::load(settings.prompts.custom_dir.as_deref())?;
        let template = prompts.summary_template(settings.prompts.summary_words);

        Ok(Self::new(Arc::new(extractor), Arc::new(summarizer), template))
    }

    /// Run one invocation. `on_stage` sees every transition, ending in `Idle`.
    #[instrument(skip_all, fields(url = %request.url, model = %request.model))]
    pub async fn run(
        &self,
        request: &SummaryRequest,
        mut on_stage: impl FnMut(Stage),
    ) -> Result<String> {
        let result = self.execute(request, &mut on_stage).await;

        match &result {
            Ok(_) => on_stage(Stage::Displaying(Outcome::Success)),
            Err(e) => {
                warn!(kind = e.kind_label(), error = %e, "Summarization pipeline failed");
                on_stage(Stage::Displaying(Outcome::Error));
            }
        }
        on_stage(Stage::Idle);

        result
    }

    async fn execute(
        &self,
        request: &SummaryRequest,
        on_stage: &mut impl FnMut(Stage),
    ) -> Result<String> {
        on_stage(Stage::Validating);
        let url = validate(&request.api_key, &request.url)?;

        on_stage(Stage::Extracting);
        let documents = self.extractor.extract(&url).await?;
        ensure_content(&documents, &url)?;
        info!("Extracted {} document(s)", documents.len());

        on_stage(Stage::Summarizing);
        let config = ModelConfig::new(request.api_key.trim(), request.model);
        self.summarizer
            .summarize(&documents, &self.template, &config)
            .await
    }
}

/// At least one non-blank document must reach the summarizer.
fn ensure_content(documents: &[Document], url: &Url) -> Result<()> {
    if documents.iter().any(|d| !d.is_blank()) {
        return Ok(());
    }

    let message = format!("No content could be extracted from {}", url);
    Err(match ContentSource::classify(url) {
        ContentSource::Video { .. } => PrecisError::video(message),
        ContentSource::Page => PrecisError::page(message),
    })
}
