//! Precis - Summarize any URL
//!
//! Summarizes a YouTube video (from its transcript) or any website (from its
//! visible text) with a hosted, OpenAI-compatible LLM.
//!
//! # Architecture
//!
//! - `validate` - Credential and URL checks
//! - `extract` - URL classification and content extraction
//! - `transcript` - YouTube caption retrieval
//! - `summarize` - Prompt rendering and the chat-completion call
//! - `pipeline` - Per-invocation coordination and stage reporting
//! - `telemetry` - Optional run tracing side channel
//! - `cli` - Terminal, interactive and web front ends
//!
//! # Example
//!
//! ```rust,no_run
//! use precis::config::Settings;
//! use precis::pipeline::{Pipeline, SummaryRequest};
//! use precis::summarize::LlmModel;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let pipeline = Pipeline::from_settings(&settings)?;
//!
//!     let request = SummaryRequest::new("gsk_...", LlmModel::Gemma2_9bIt, "https://example.com");
//!     let summary = pipeline.run(&request, |_| {}).await?;
//!     println!("{}", summary);
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod extract;
pub mod openai;
pub mod pipeline;
pub mod summarize;
pub mod telemetry;
pub mod transcript;
pub mod validate;

#[cfg(test)]
mod test_support;

pub use error::{PrecisError, Result};
