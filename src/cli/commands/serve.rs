//! Single-page web UI.
//!
//! `GET /` serves the page, `POST /api/summarize` runs one invocation.

use crate::cli::Output;
use crate::config::Settings;
use crate::error::PrecisError;
use crate::pipeline::{Pipeline, SummaryRequest};
use crate::summarize::LlmModel;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Shared application state.
struct AppState {
    pipeline: Pipeline,
    default_model: LlmModel,
}

/// Run the web UI server.
pub async fn run_serve(host: &str, port: u16, settings: Settings) -> anyhow::Result<()> {
    let state = Arc::new(AppState {
        pipeline: Pipeline::from_settings(&settings)?,
        default_model: settings.llm.default_model,
    });

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Precis");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Web UI", "GET  /");
    Output::kv("Summarize", "POST /api/summarize");
    Output::kv("Health", "GET  /health");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, router(state)).await?;

    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/summarize", post(summarize))
        .layer(cors)
        .with_state(state)
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct SummarizeRequest {
    #[serde(default)]
    api_key: String,
    #[serde(default)]
    model: Option<LlmModel>,
    #[serde(default)]
    url: String,
}

#[derive(Serialize)]
struct SummarizeResponse {
    summary: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
    message: String,
}

fn status_for(error: &PrecisError) -> StatusCode {
    match error {
        e if e.is_input_error() => StatusCode::BAD_REQUEST,
        PrecisError::Extraction { .. } | PrecisError::Summarization(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let options = LlmModel::ALL
        .iter()
        .map(|m| {
            let selected = if *m == state.default_model { " selected" } else { "" };
            format!(r#"<option value="{0}"{1}>{0}</option>"#, m, selected)
        })
        .collect::<Vec<_>>()
        .join("");

    Html(PAGE.replace("{{model_options}}", &options))
}

async fn summarize(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SummarizeRequest>,
) -> impl IntoResponse {
    let request = SummaryRequest::new(
        req.api_key,
        req.model.unwrap_or(state.default_model),
        req.url,
    );

    match state.pipeline.run(&request, |_| {}).await {
        Ok(summary) => Json(SummarizeResponse { summary }).into_response(),
        Err(e) => (
            status_for(&e),
            Json(ErrorResponse {
                error: e.kind_label(),
                message: e.user_message(),
            }),
        )
            .into_response(),
    }
}

const PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Summarize</title>
<style>
  body { font-family: system-ui, sans-serif; margin: 0; display: flex; min-height: 100vh; }
  aside { width: 18rem; padding: 1.5rem; background: #f0f2f6; }
  main { flex: 1; padding: 2rem 3rem; max-width: 60rem; }
  label { display: block; margin: 1rem 0 .3rem; font-weight: 600; }
  input, select { width: 100%; padding: .5rem; box-sizing: border-box; }
  button { margin-top: 1rem; padding: .6rem 1.2rem; cursor: pointer; }
  .msg { display: none; margin-top: 1rem; padding: .8rem 1rem; border-radius: .4rem; }
  .error { background: #ffe0e0; color: #7d1a1a; }
  .success { background: #ddf5e3; color: #14532d; }
  #busy { display: none; margin-top: 1rem; color: #555; }
  #summary { white-space: pre-wrap; margin-top: 1rem; line-height: 1.5; }
</style>
</head>
<body>
<aside>
  <h2>Settings</h2>
  <label for="api_key">Groq API Key</label>
  <input id="api_key" type="password" autocomplete="off">
  <label for="model">Select LLM Model:</label>
  <select id="model">{{model_options}}</select>
</aside>
<main>
  <h1>Summarize Text from YouTube or Website</h1>
  <h3>Summarize Any URL (YouTube or Website)</h3>
  <label for="url">Enter a URL (YouTube or Website)</label>
  <input id="url" type="text" placeholder="https://example.com">
  <button id="go">Summarize the Content</button>
  <div id="busy">Extracting and summarizing content...</div>
  <div id="field-error" class="msg error"></div>
  <div id="content-error" class="msg error"></div>
  <div id="success" class="msg success">Summary generated successfully!</div>
  <div id="summary"></div>
</main>
<script>
const $ = (id) => document.getElementById(id);
const regions = ["field-error", "content-error", "success"];

function show(id, text) {
  regions.forEach((r) => { $(r).style.display = "none"; });
  if (text !== undefined) { $(id).textContent = text; }
  $(id).style.display = "block";
}

$("go").addEventListener("click", async () => {
  $("go").disabled = true;
  $("busy").style.display = "block";
  $("summary").textContent = "";
  try {
    const resp = await fetch("/api/summarize", {
      method: "POST",
      headers: { "Content-Type": "application/json" },
      body: JSON.stringify({ api_key: $("api_key").value, model: $("model").value, url: $("url").value }),
    });
    const body = await resp.json();
    if (resp.ok) {
      show("success");
      $("summary").textContent = body.summary;
    } else if (body.error === "missing_fields" || body.error === "invalid_url") {
      show("field-error", body.message);
    } else {
      show("content-error", body.message);
    }
  } catch (err) {
    show("content-error", "An error occurred: " + err);
  } finally {
    $("busy").style.display = "none";
    $("go").disabled = false;
  }
});
</script>
</body>
</html>
"#;
