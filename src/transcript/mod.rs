//! Video transcript retrieval.
//!
//! Provides a trait-based interface over transcript services so the video
//! extraction path can be exercised without network access.

mod youtube;

pub use youtube::YoutubeTranscriptClient;

use async_trait::async_trait;
use thiserror::Error;

/// One timestamped caption unit.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptFragment {
    pub text: String,
    /// Start offset in seconds.
    pub start: f64,
    /// Duration in seconds.
    pub duration: f64,
}

impl TranscriptFragment {
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }
}

/// Errors reported by a transcript service.
#[derive(Error, Debug)]
pub enum TranscriptError {
    #[error("The video {0} is no longer available")]
    VideoUnavailable(String),

    #[error("YouTube is receiving too many requests from this IP and now requires solving a captcha")]
    TooManyRequests,

    #[error("Subtitles are disabled for this video")]
    TranscriptsDisabled,

    #[error(
        "No transcripts were found for any of the requested language codes: {requested:?} (available: {available:?})"
    )]
    NoTranscriptFound {
        requested: Vec<String>,
        available: Vec<String>,
    },

    #[error("Transcript request failed with status {0}")]
    Status(u16),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse transcript data: {0}")]
    Parse(String),
}

/// Trait for transcript providers.
#[async_trait]
pub trait TranscriptService: Send + Sync {
    /// Fetch caption fragments for a video, in playback order.
    async fn fetch(&self, video_id: &str) -> Result<Vec<TranscriptFragment>, TranscriptError>;
}
