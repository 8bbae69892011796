//! Optional run forwarding to a LangSmith-compatible tracing backend.
//!
//! Settings are read from the environment once, at startup, and never change
//! afterwards. Forwarding failures are logged and otherwise ignored.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

const DEFAULT_ENDPOINT: &str = "https://api.smith.langchain.com";
const DEFAULT_PROJECT: &str = "Summarize Any URL (YouTube or Website)";
/// Upper bound a run post may add to a summarization.
const RECORD_TIMEOUT: Duration = Duration::from_secs(2);

static TRACE_SETTINGS: OnceLock<TraceSettings> = OnceLock::new();

/// Process-wide tracing configuration.
#[derive(Clone)]
pub struct TraceSettings {
    pub enabled: bool,
    pub api_key: Option<String>,
    pub project: String,
    pub endpoint: String,
}

impl std::fmt::Debug for TraceSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TraceSettings")
            .field("enabled", &self.enabled)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("project", &self.project)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl TraceSettings {
    /// Read `LANGCHAIN_*` variables from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let enabled = non_empty("LANGCHAIN_TRACING_V2")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes"))
            .unwrap_or(false);

        Self {
            enabled,
            api_key: non_empty("LANGCHAIN_API_KEY"),
            project: non_empty("LANGCHAIN_PROJECT").unwrap_or_else(|| DEFAULT_PROJECT.to_string()),
            endpoint: non_empty("LANGCHAIN_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
                .trim_end_matches('/')
                .to_string(),
        }
    }

    /// Whether runs should be forwarded.
    pub fn is_active(&self) -> bool {
        self.enabled && self.api_key.is_some()
    }
}

/// Initialize the process-wide settings from the environment.
///
/// Later calls return the settings captured by the first call.
pub fn init() -> &'static TraceSettings {
    TRACE_SETTINGS.get_or_init(TraceSettings::from_env)
}

/// Build a tracer from the process-wide settings, if tracing is active.
pub fn tracer() -> Option<Arc<RunTracer>> {
    RunTracer::from_settings(init()).map(Arc::new)
}

/// One summarization run, as forwarded to the backend.
#[derive(Debug, Clone)]
pub struct RunRecord {
    pub model: String,
    pub prompt: String,
    pub output: Option<String>,
    pub error: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

#[derive(Serialize)]
struct RunPayload<'a> {
    id: Uuid,
    name: &'a str,
    run_type: &'a str,
    inputs: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    outputs: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
    start_time: String,
    end_time: String,
    session_name: &'a str,
}

/// Posts run records to `{endpoint}/runs`.
///
/// Each post is awaited inline, bounded by a short timeout, so a slow backend
/// delays a response by at most that timeout.
pub struct RunTracer {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    project: String,
    timeout: Duration,
}

impl RunTracer {
    /// Returns None when tracing is disabled or no key is configured.
    pub fn from_settings(settings: &TraceSettings) -> Option<Self> {
        if !settings.is_active() {
            return None;
        }
        let api_key = settings.api_key.clone()?;

        let http = reqwest::Client::builder()
            .build()
            .inspect_err(|e| warn!(error = %e, "Failed to build tracing client"))
            .ok()?;

        Some(Self {
            http,
            endpoint: settings.endpoint.clone(),
            api_key,
            project: settings.project.clone(),
            timeout: RECORD_TIMEOUT,
        })
    }

    /// Override the per-run timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    /// Forward a run. Never fails; problems are logged.
    pub async fn record(&self, run: &RunRecord) {
        let payload = RunPayload {
            id: Uuid::new_v4(),
            name: "StuffDocumentsChain",
            run_type: "llm",
            inputs: serde_json::json!({ "prompt": run.prompt, "model": run.model }),
            outputs: run
                .output
                .as_ref()
                .map(|text| serde_json::json!({ "text": text })),
            error: run.error.as_deref(),
            start_time: run.start_time.to_rfc3339(),
            end_time: run.end_time.to_rfc3339(),
            session_name: &self.project,
        };

        let result = self
            .http
            .post(format!("{}/runs", self.endpoint))
            .header("x-api-key", &self.api_key)
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await;

        match result {
            Ok(resp) if resp.status().is_success() => {
                debug!(run_id = %payload.id, "Forwarded run to tracing backend");
            }
            Ok(resp) => warn!(status = resp.status().as_u16(), "Tracing backend rejected run"),
            Err(e) => warn!(error = %e, "Failed to forward run to tracing backend"),
        }
    }
}
