//! Transcript-based extraction for video URLs.

use super::{video_id, Extractor};
use crate::document::Document;
use crate::error::{PrecisError, Result};
use crate::transcript::{TranscriptFragment, TranscriptService};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument};
use url::Url;

/// Join fragment texts with single spaces, in the order given.
pub fn join_fragments(fragments: &[TranscriptFragment]) -> String {
    fragments
        .iter()
        .map(|f| f.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extracts a video's spoken text as a single document.
pub struct TranscriptExtractor {
    service: Arc<dyn TranscriptService>,
}

impl TranscriptExtractor {
    pub fn new(service: Arc<dyn TranscriptService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Extractor for TranscriptExtractor {
    #[instrument(skip(self), fields(url = %url))]
    async fn extract(&self, url: &Url) -> Result<Vec<Document>> {
        let id = video_id(url);

        let fragments = self
            .service
            .fetch(&id)
            .await
            .map_err(|e| PrecisError::video(e.to_string()))?;

        info!("Fetched {} transcript fragments", fragments.len());

        let document = Document::new(join_fragments(&fragments))
            .with_metadata("source", url.as_str())
            .with_metadata("video_id", id);

        Ok(vec![document])
    }
}
