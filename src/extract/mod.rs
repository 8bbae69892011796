//! Content extraction.
//!
//! A URL is classified as either a video or a generic page, and each kind has
//! its own [`Extractor`] implementation. [`UrlExtractor`] dispatches between
//! the two.

mod page;
mod video;

pub use page::{FetchRequest, FetchedPage, HttpPageFetcher, PageExtractor, PageFetcher};
pub use video::{join_fragments, TranscriptExtractor};

use crate::document::Document;
use crate::error::Result;
use async_trait::async_trait;
use url::Url;

/// Fixed desktop-browser User-Agent sent on page requests.
pub const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";

/// Host fragment identifying video URLs.
const VIDEO_HOST_PATTERN: &str = "youtube.com";

/// Where a URL's content comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    /// A video page; content is its transcript.
    Video { video_id: String },
    /// Any other page; content is its HTML rendered as text.
    Page,
}

impl ContentSource {
    /// Classify a URL by its host. Pure; performs no I/O.
    pub fn classify(url: &Url) -> Self {
        let is_video = url
            .host_str()
            .is_some_and(|host| host.to_ascii_lowercase().contains(VIDEO_HOST_PATTERN));

        if is_video {
            ContentSource::Video {
                video_id: video_id(url),
            }
        } else {
            ContentSource::Page
        }
    }
}

/// Everything after the last `v=` in the URL, or the whole URL if absent.
pub fn video_id(url: &Url) -> String {
    url.as_str()
        .rsplit("v=")
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Trait for content extractors.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Extract the documents behind a URL, in order.
    async fn extract(&self, url: &Url) -> Result<Vec<Document>>;
}

/// Extractor that picks the transcript or page path per URL.
pub struct UrlExtractor {
    video: TranscriptExtractor,
    page: PageExtractor,
}

impl UrlExtractor {
    pub fn new(video: TranscriptExtractor, page: PageExtractor) -> Self {
        Self { video, page }
    }
}

#[async_trait]
impl Extractor for UrlExtractor {
    async fn extract(&self, url: &Url) -> Result<Vec<Document>> {
        match ContentSource::classify(url) {
            ContentSource::Video { .. } => self.video.extract(url).await,
            ContentSource::Page => self.page.extract(url).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ExtractionKind, PrecisError};
    use crate::transcript::{TranscriptError, TranscriptFragment, TranscriptService};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_classify_video_hosts() {
        assert_eq!(
            ContentSource::classify(&url("https://youtube.com/watch?v=XYZ123")),
            ContentSource::Video {
                video_id: "XYZ123".to_string()
            }
        );
        assert_eq!(
            ContentSource::classify(&url("https://www.YouTube.com/watch?v=dQw4w9WgXcQ")),
            ContentSource::Video {
                video_id: "dQw4w9WgXcQ".to_string()
            }
        );
        assert!(matches!(
            ContentSource::classify(&url("https://m.youtube.com/watch?v=abc")),
            ContentSource::Video { .. }
        ));
    }

    #[test]
    fn test_classify_generic_hosts() {
        for s in [
            "https://example.com/article",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://example.com/?ref=youtube.com",
            "http://127.0.0.1:3000/",
        ] {
            assert_eq!(ContentSource::classify(&url(s)), ContentSource::Page, "{}", s);
        }
    }

    #[test]
    fn test_video_id_takes_text_after_last_marker() {
        assert_eq!(video_id(&url("https://youtube.com/watch?v=XYZ123")), "XYZ123");
        assert_eq!(
            video_id(&url("https://youtube.com/watch?feature=share&v=XYZ123")),
            "XYZ123"
        );
        // Trailing parameters are kept verbatim and left to the transcript service.
        assert_eq!(
            video_id(&url("https://youtube.com/watch?v=XYZ123&t=42")),
            "XYZ123&t=42"
        );
        // No marker: the whole URL falls through.
        assert_eq!(
            video_id(&url("https://www.youtube.com/@channel")),
            "https://www.youtube.com/@channel"
        );
    }

    struct StubTranscripts {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TranscriptService for StubTranscripts {
        async fn fetch(
            &self,
            _video_id: &str,
        ) -> std::result::Result<Vec<TranscriptFragment>, TranscriptError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![TranscriptFragment::new("from video", 0.0, 1.0)])
        }
    }

    struct StubFetcher {
        requests: Mutex<Vec<FetchRequest>>,
    }

    #[async_trait]
    impl PageFetcher for StubFetcher {
        async fn fetch(&self, request: &FetchRequest) -> Result<FetchedPage> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(FetchedPage {
                status: 200,
                body: "<html><body><p>from page</p></body></html>".to_string(),
            })
        }
    }

    fn dispatcher() -> (UrlExtractor, Arc<StubTranscripts>, Arc<StubFetcher>) {
        let transcripts = Arc::new(StubTranscripts {
            calls: AtomicUsize::new(0),
        });
        let fetcher = Arc::new(StubFetcher {
            requests: Mutex::new(Vec::new()),
        });
        let extractor = UrlExtractor::new(
            TranscriptExtractor::new(transcripts.clone()),
            PageExtractor::new(fetcher.clone()),
        );
        (extractor, transcripts, fetcher)
    }

    #[tokio::test]
    async fn test_dispatch_video() {
        let (extractor, transcripts, fetcher) = dispatcher();
        let docs = extractor
            .extract(&url("https://youtube.com/watch?v=XYZ123"))
            .await
            .unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].content, "from video");
        assert_eq!(transcripts.calls.load(Ordering::SeqCst), 1);
        assert!(fetcher.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_page() {
        let (extractor, transcripts, fetcher) = dispatcher();
        let docs = extractor
            .extract(&url("https://example.com/article"))
            .await
            .unwrap();

        assert!(docs[0].content.contains("from page"));
        assert_eq!(transcripts.calls.load(Ordering::SeqCst), 0);
        assert_eq!(fetcher.requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_dispatch_keeps_error_kind() {
        struct Failing;

        #[async_trait]
        impl TranscriptService for Failing {
            async fn fetch(
                &self,
                _video_id: &str,
            ) -> std::result::Result<Vec<TranscriptFragment>, TranscriptError> {
                Err(TranscriptError::TranscriptsDisabled)
            }
        }

        let (_, _, fetcher) = dispatcher();
        let extractor = UrlExtractor::new(
            TranscriptExtractor::new(Arc::new(Failing)),
            PageExtractor::new(fetcher),
        );

        let err = extractor
            .extract(&url("https://youtube.com/watch?v=XYZ123"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PrecisError::Extraction {
                kind: ExtractionKind::Video,
                ..
            }
        ));
    }
}
