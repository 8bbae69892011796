//! Summarizer backed by an OpenAI-compatible chat-completion API.

use super::{render_prompt, ModelConfig, Summarizer};
use crate::config::LlmSettings;
use crate::document::Document;
use crate::error::{PrecisError, Result};
use crate::openai::create_client;
use crate::telemetry::{RunRecord, RunTracer};
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Chat-completion summarizer (Groq by default).
pub struct ChatSummarizer {
    api_base: String,
    temperature: f32,
    timeout: Duration,
    tracer: Option<Arc<RunTracer>>,
}

impl ChatSummarizer {
    pub fn new(settings: &LlmSettings) -> Self {
        Self {
            api_base: settings.api_base.trim_end_matches('/').to_string(),
            temperature: settings.temperature,
            timeout: Duration::from_secs(settings.timeout_secs),
            tracer: None,
        }
    }

    /// Forward each run to a tracing backend.
    ///
    /// The post happens before the summary is returned; the tracer's timeout
    /// bounds the added latency.
    pub fn with_tracer(mut self, tracer: Option<Arc<RunTracer>>) -> Self {
        self.tracer = tracer;
        self
    }

    async fn complete(&self, prompt: &str, config: &ModelConfig) -> Result<String> {
        let client = create_client(&config.api_key, &self.api_base, self.timeout)?;

        let message = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt.to_string())
            .build()
            .map_err(|e| PrecisError::Summarization(e.to_string()))?;

        let messages: Vec<ChatCompletionRequestMessage> = vec![message.into()];

        let request = CreateChatCompletionRequestArgs::default()
            .model(config.model.as_str())
            .messages(messages)
            .temperature(self.temperature)
            .build()
            .map_err(|e| PrecisError::Summarization(e.to_string()))?;

        let response = client
            .chat()
            .create(request)
            .await
            .map_err(|e| PrecisError::Summarization(e.to_string()))?;

        response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or_else(|| PrecisError::Summarization("Empty response from LLM".to_string()))
    }
}

#[async_trait]
impl Summarizer for ChatSummarizer {
    #[instrument(skip_all, fields(model = %config.model, documents = documents.len()))]
    async fn summarize(
        &self,
        documents: &[Document],
        template: &str,
        config: &ModelConfig,
    ) -> Result<String> {
        let prompt = render_prompt(template, documents)?;
        debug!("Prompt is {} characters", prompt.len());

        let start_time = Utc::now();
        let result = self.complete(&prompt, config).await;

        if let Some(tracer) = &self.tracer {
            debug!(project = tracer.project(), "Forwarding run");
            let (output, error) = match &result {
                Ok(text) => (Some(text.clone()), None),
                Err(e) => (None, Some(e.to_string())),
            };
            tracer
                .record(&RunRecord {
                    model: config.model.as_str().to_string(),
                    prompt: prompt.clone(),
                    output,
                    error,
                    start_time,
                    end_time: Utc::now(),
                })
                .await;
        }

        if result.is_ok() {
            info!("Summary generated");
        }
        result
    }
}
