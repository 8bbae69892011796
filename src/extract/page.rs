//! Generic web page extraction.

use super::{Extractor, DESKTOP_USER_AGENT};
use crate::config::FetchSettings;
use crate::document::Document;
use crate::error::{PrecisError, Result};
use async_trait::async_trait;
use regex::Regex;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};
use url::Url;

/// A single page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: Url,
    pub user_agent: String,
    /// Skip TLS certificate verification.
    pub accept_invalid_certs: bool,
}

/// Raw page response.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

/// Trait for page fetchers.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch a page. Transport failures are errors; HTTP statuses are not.
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchedPage>;
}

/// Page fetcher backed by reqwest.
pub struct HttpPageFetcher {
    timeout: Duration,
}

impl HttpPageFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchedPage> {
        if request.accept_invalid_certs {
            warn!(url = %request.url, "TLS certificate verification is disabled for page fetch");
        }

        let client = reqwest::Client::builder()
            .user_agent(request.user_agent.as_str())
            .danger_accept_invalid_certs(request.accept_invalid_certs)
            .timeout(self.timeout)
            .build()
            .map_err(|e| PrecisError::page(e.to_string()))?;

        let response = client
            .get(request.url.clone())
            .send()
            .await
            .map_err(|e| PrecisError::page(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| PrecisError::page(e.to_string()))?;

        Ok(FetchedPage { status, body })
    }
}

/// Extracts readable text from an arbitrary web page.
pub struct PageExtractor {
    fetcher: Arc<dyn PageFetcher>,
    user_agent: String,
    accept_invalid_certs: bool,
    wrap_width: usize,
    title_regex: Regex,
}

impl PageExtractor {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            fetcher,
            user_agent: DESKTOP_USER_AGENT.to_string(),
            accept_invalid_certs: true,
            wrap_width: 120,
            title_regex: Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("Invalid regex"),
        }
    }

    /// Apply user agent, certificate and rendering settings.
    pub fn with_settings(mut self, settings: &FetchSettings) -> Self {
        self.user_agent = settings.user_agent.clone();
        self.accept_invalid_certs = settings.accept_invalid_certs;
        self.wrap_width = settings.wrap_width.max(20);
        self
    }

    /// Page title with entities decoded and whitespace collapsed.
    fn title(&self, html: &str) -> Option<String> {
        let caps = self.title_regex.captures(html)?;
        let decoded = html2text::from_read(caps[1].as_bytes(), self.wrap_width).ok()?;
        let title = decoded.split_whitespace().collect::<Vec<_>>().join(" ");
        (!title.is_empty()).then_some(title)
    }

    /// Render HTML as plain text.
    pub fn html_to_text(&self, html: &str) -> Result<String> {
        html2text::from_read(html.as_bytes(), self.wrap_width)
            .map_err(|e| PrecisError::page(format!("Failed to render page text: {}", e)))
    }
}

#[async_trait]
impl Extractor for PageExtractor {
    #[instrument(skip(self), fields(url = %url))]
    async fn extract(&self, url: &Url) -> Result<Vec<Document>> {
        let request = FetchRequest {
            url: url.clone(),
            user_agent: self.user_agent.clone(),
            accept_invalid_certs: self.accept_invalid_certs,
        };

        let page = self.fetcher.fetch(&request).await?;

        if page.status != 200 {
            return Err(PrecisError::page(format!(
                "Failed to fetch {}: HTTP status {}",
                url, page.status
            )));
        }

        let text = self.html_to_text(&page.body)?;
        let text = text.trim();
        if text.is_empty() {
            return Err(PrecisError::page(format!("No readable text found at {}", url)));
        }

        info!("Extracted {} characters of page text", text.len());

        let mut document = Document::new(text).with_metadata("source", url.as_str());
        if let Some(title) = self.title(&page.body) {
            document = document.with_metadata("title", title);
        }

        Ok(vec![document])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractionKind;
    use crate::test_support::spawn_server;
    use axum::{http::HeaderMap, http::StatusCode, response::Html, routing::get, Router};
    use std::sync::Mutex;

    struct Canned {
        requests: Mutex<Vec<FetchRequest>>,
        status: u16,
        body: &'static str,
    }

    impl Canned {
        fn new(status: u16, body: &'static str) -> Arc<Self> {
            Arc::new(Self {
                requests: Mutex::new(Vec::new()),
                status,
                body,
            })
        }
    }

    #[async_trait]
    impl PageFetcher for Canned {
        async fn fetch(&self, request: &FetchRequest) -> Result<FetchedPage> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(FetchedPage {
                status: self.status,
                body: self.body.to_string(),
            })
        }
    }

    fn article_url() -> Url {
        Url::parse("https://example.com/article").unwrap()
    }

    #[tokio::test]
    async fn test_fetch_once_with_insecure_default_and_fixed_agent() {
        let fetcher = Canned::new(
            200,
            "<html><head><title>An  Article</title></head><body><h1>Heading</h1><p>Body text.</p></body></html>",
        );
        let extractor = PageExtractor::new(fetcher.clone());

        let docs = extractor.extract(&article_url()).await.unwrap();

        let requests = fetcher.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        // Known-insecure default: certificate verification stays disabled.
        assert!(requests[0].accept_invalid_certs);
        assert_eq!(
            requests[0].user_agent,
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64)"
        );
        assert_eq!(requests[0].url, article_url());

        assert_eq!(docs.len(), 1);
        assert!(docs[0].content.contains("Heading"));
        assert!(docs[0].content.contains("Body text."));
        assert!(!docs[0].content.contains("<p>"));
        assert_eq!(docs[0].metadata.get("title").map(String::as_str), Some("An Article"));
    }

    #[tokio::test]
    async fn test_title_entities_are_decoded() {
        let extractor = PageExtractor::new(Canned::new(
            200,
            "<html><head><title>Fish &amp; Chips &#8211; A&nbsp;Guide</title></head><body><p>Body.</p></body></html>",
        ));

        let docs = extractor.extract(&article_url()).await.unwrap();
        assert_eq!(
            docs[0].metadata.get("title").map(String::as_str),
            Some("Fish & Chips \u{2013} A Guide")
        );
    }

    #[tokio::test]
    async fn test_non_200_is_page_error() {
        let extractor = PageExtractor::new(Canned::new(404, "<html>Not found</html>"));

        match extractor.extract(&article_url()).await {
            Err(PrecisError::Extraction { kind, message }) => {
                assert_eq!(kind, ExtractionKind::Page);
                assert!(message.contains("404"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_text_is_page_error() {
        let extractor = PageExtractor::new(Canned::new(200, "<html><body>  </body></html>"));

        let err = extractor.extract(&article_url()).await.unwrap_err();
        assert!(err.to_string().contains("No readable text"));
    }

    #[tokio::test]
    async fn test_settings_override_defaults() {
        let fetcher = Canned::new(200, "<p>text</p>");
        let settings = FetchSettings {
            user_agent: "custom".to_string(),
            accept_invalid_certs: false,
            ..FetchSettings::default()
        };
        let extractor = PageExtractor::new(fetcher.clone()).with_settings(&settings);

        extractor.extract(&article_url()).await.unwrap();

        let requests = fetcher.requests.lock().unwrap();
        assert_eq!(requests[0].user_agent, "custom");
        assert!(!requests[0].accept_invalid_certs);
    }

    #[tokio::test]
    async fn test_http_fetcher_sends_user_agent() {
        let app = Router::new()
            .route(
                "/article",
                get(|headers: HeaderMap| async move {
                    let agent = headers
                        .get("user-agent")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    Html(format!("<html><body><p>agent={}</p></body></html>", agent))
                }),
            )
            .route(
                "/missing",
                get(|| async { (StatusCode::NOT_FOUND, "gone") }),
            );
        let base_url = spawn_server(app).await;

        let extractor = PageExtractor::new(Arc::new(HttpPageFetcher::new(Duration::from_secs(5))));

        let url = Url::parse(&format!("{}/article", base_url)).unwrap();
        let docs = extractor.extract(&url).await.unwrap();
        assert!(docs[0]
            .content
            .contains("agent=Mozilla/5.0 (Windows NT 10.0; Win64; x64)"));

        let url = Url::parse(&format!("{}/missing", base_url)).unwrap();
        let err = extractor.extract(&url).await.unwrap_err();
        assert!(err.to_string().contains("HTTP status 404"));
    }

    #[tokio::test]
    async fn test_http_fetcher_transport_error() {
        let fetcher = HttpPageFetcher::new(Duration::from_secs(2));
        let request = FetchRequest {
            url: Url::parse("http://127.0.0.1:1/").unwrap(),
            user_agent: DESKTOP_USER_AGENT.to_string(),
            accept_invalid_certs: true,
        };

        let err = fetcher.fetch(&request).await.unwrap_err();
        assert_eq!(err.kind_label(), "extraction");
    }
}
