//! YouTube transcript client.
//!
//! Reads the caption track list embedded in the watch page, picks a track in
//! one of the preferred languages and downloads its timedtext XML.

use super::{TranscriptError, TranscriptFragment, TranscriptService};
use crate::config::YoutubeSettings;
use crate::error::Result;
use async_trait::async_trait;
use regex::Regex;
use reqwest::header::ACCEPT_LANGUAGE;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

const CAPTION_TRACKS_MARKER: &str = "\"captionTracks\":";

/// A caption track as listed in the watch page player response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTrack {
    base_url: String,
    language_code: String,
    /// "asr" for auto-generated tracks.
    #[serde(default)]
    kind: Option<String>,
}

impl CaptionTrack {
    fn is_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }
}

/// Transcript client backed by YouTube's public watch page and timedtext API.
pub struct YoutubeTranscriptClient {
    http: reqwest::Client,
    base_url: String,
    languages: Vec<String>,
    text_regex: Regex,
    attr_regex: Regex,
    tag_regex: Regex,
    entity_regex: Regex,
}

impl YoutubeTranscriptClient {
    pub fn new(settings: &YoutubeSettings, user_agent: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            languages: settings.languages.clone(),
            text_regex: Regex::new(r"(?s)<text\b([^>]*?)(?:/>|>(.*?)</text>)")
                .expect("Invalid regex"),
            attr_regex: Regex::new(r#"(\w+)="([^"]*)""#).expect("Invalid regex"),
            tag_regex: Regex::new(r"<[^>]*>").expect("Invalid regex"),
            entity_regex: Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|amp|lt|gt|quot|apos|nbsp);")
                .expect("Invalid regex"),
        })
    }

    async fn fetch_watch_page(&self, video_id: &str) -> std::result::Result<String, TranscriptError> {
        let response = self
            .http
            .get(format!("{}/watch", self.base_url))
            .query(&[("v", video_id)])
            .header(ACCEPT_LANGUAGE, "en-US")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TranscriptError::Status(response.status().as_u16()));
        }

        Ok(response.text().await?)
    }

    /// Find the caption track list in the watch page HTML.
    fn caption_tracks(
        &self,
        html: &str,
        video_id: &str,
    ) -> std::result::Result<Vec<CaptionTrack>, TranscriptError> {
        let Some(pos) = html.find(CAPTION_TRACKS_MARKER) else {
            if html.contains("class=\"g-recaptcha\"") {
                return Err(TranscriptError::TooManyRequests);
            }
            if !html.contains("\"playabilityStatus\":") {
                return Err(TranscriptError::VideoUnavailable(video_id.to_string()));
            }
            return Err(TranscriptError::TranscriptsDisabled);
        };

        let rest = &html[pos + CAPTION_TRACKS_MARKER.len()..];
        serde_json::Deserializer::from_str(rest)
            .into_iter::<Vec<CaptionTrack>>()
            .next()
            .ok_or_else(|| TranscriptError::Parse("empty caption track list".to_string()))?
            .map_err(|e| TranscriptError::Parse(e.to_string()))
    }

    /// Pick the first preferred language, favouring manual over generated tracks.
    fn select_track<'a>(
        &self,
        tracks: &'a [CaptionTrack],
    ) -> std::result::Result<&'a CaptionTrack, TranscriptError> {
        for language in &self.languages {
            let mut candidates = tracks.iter().filter(|t| &t.language_code == language);
            let manual = candidates.clone().find(|t| !t.is_generated());
            if let Some(track) = manual.or_else(|| candidates.next()) {
                return Ok(track);
            }
        }

        Err(TranscriptError::NoTranscriptFound {
            requested: self.languages.clone(),
            available: tracks.iter().map(|t| t.language_code.clone()).collect(),
        })
    }

    async fn fetch_track(&self, track: &CaptionTrack) -> std::result::Result<String, TranscriptError> {
        let url = if track.base_url.starts_with('/') {
            format!("{}{}", self.base_url, track.base_url)
        } else {
            track.base_url.clone()
        };

        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(TranscriptError::Status(response.status().as_u16()));
        }
        Ok(response.text().await?)
    }

    /// Parse timedtext XML into fragments, in document order.
    fn parse_timedtext(&self, xml: &str) -> Vec<TranscriptFragment> {
        self.text_regex
            .captures_iter(xml)
            .filter_map(|caps| {
                let body = caps.get(2)?.as_str();
                let text = self.clean_text(body);
                if text.is_empty() {
                    return None;
                }

                let attrs = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
                let mut start = 0.0;
                let mut duration = 0.0;
                for attr in self.attr_regex.captures_iter(attrs) {
                    match &attr[1] {
                        "start" => start = attr[2].parse().unwrap_or(0.0),
                        "dur" => duration = attr[2].parse().unwrap_or(0.0),
                        _ => {}
                    }
                }

                Some(TranscriptFragment::new(text, start, duration))
            })
            .collect()
    }

    /// Caption text arrives entity-encoded twice and may carry formatting tags.
    fn clean_text(&self, raw: &str) -> String {
        let once = self.decode_entities(raw);
        let twice = self.decode_entities(&once);
        let stripped = self.tag_regex.replace_all(&twice, "");
        stripped.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn decode_entities(&self, input: &str) -> String {
        self.entity_regex
            .replace_all(input, |caps: &regex::Captures| {
                let entity = &caps[1];
                let decoded = match entity {
                    "amp" => Some('&'),
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    "nbsp" => Some(' '),
                    _ if entity.starts_with("#x") || entity.starts_with("#X") => {
                        u32::from_str_radix(&entity[2..], 16).ok().and_then(char::from_u32)
                    }
                    _ => entity[1..].parse::<u32>().ok().and_then(char::from_u32),
                };
                decoded
                    .map(String::from)
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}

#[async_trait]
impl TranscriptService for YoutubeTranscriptClient {
    #[instrument(skip(self))]
    async fn fetch(&self, video_id: &str) -> std::result::Result<Vec<TranscriptFragment>, TranscriptError> {
        let html = self.fetch_watch_page(video_id).await?;
        let tracks = self.caption_tracks(&html, video_id)?;
        let track = self.select_track(&tracks)?;

        debug!(
            language = %track.language_code,
            generated = track.is_generated(),
            "Selected caption track"
        );

        let xml = self.fetch_track(track).await?;
        let fragments = self.parse_timedtext(&xml);

        debug!("Parsed {} transcript fragments", fragments.len());
        Ok(fragments)
    }
}
