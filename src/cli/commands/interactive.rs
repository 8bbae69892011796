//! Interactive terminal session.
//!
//! Asks for the credential and model once, then summarizes URLs until an empty
//! line or `exit`. Each URL is an independent invocation; a failure is shown
//! and the session returns to the URL prompt.

use super::summarize::run_with_spinner;
use crate::cli::Output;
use crate::config::Settings;
use crate::pipeline::{Pipeline, SummaryRequest};
use crate::summarize::LlmModel;
use anyhow::Result;
use console::{style, Term};

/// Run the interactive command.
pub async fn run_interactive(
    api_key: Option<String>,
    model: Option<LlmModel>,
    settings: Settings,
) -> Result<()> {
    let term = Term::stdout();

    println!("\n{}", style("Summarize Text from YouTube or Website").bold().cyan());
    println!(
        "{}\n",
        style("Enter a URL to summarize, or an empty line to quit.").dim()
    );

    let api_key = resolve_api_key(api_key, || {
        term.write_str(&format!("{} ", style("Groq API Key:").bold()))?;
        term.read_secure_line()
    })?;

    let model = match model {
        Some(model) => model,
        None => select_model(&term, settings.llm.default_model)?,
    };
    Output::kv("Model", model.as_str());

    let pipeline = Pipeline::from_settings(&settings)?;

    loop {
        term.write_str(&format!("\n{} ", style("URL:").green().bold()))?;
        let input = term.read_line()?;
        let input = input.trim();

        if input.is_empty() || input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            Output::info("Goodbye!");
            break;
        }

        let request = SummaryRequest::new(api_key.clone(), model, input);
        match run_with_spinner(&pipeline, &request).await {
            Ok(summary) => {
                Output::success("Summary generated successfully!");
                println!("\n{}", summary);
            }
            Err(e) => Output::error(&e.user_message()),
        }
    }

    Ok(())
}

/// Use the provided key, or prompt until a non-blank one is entered.
fn resolve_api_key(
    provided: Option<String>,
    mut prompt: impl FnMut() -> std::io::Result<String>,
) -> std::io::Result<String> {
    if let Some(key) = provided.filter(|k| !k.trim().is_empty()) {
        return Ok(key);
    }

    loop {
        let key = prompt()?;
        if !key.trim().is_empty() {
            return Ok(key.trim().to_string());
        }
        Output::warning("Please enter your Groq API key.");
    }
}

/// Prompt until the user picks a model.
fn select_model(term: &Term, default: LlmModel) -> std::io::Result<LlmModel> {
    println!("{}", style("Select LLM Model:").bold());
    for (i, model) in LlmModel::ALL.iter().enumerate() {
        let marker = if *model == default { " (default)" } else { "" };
        println!("  {} {}{}", style(format!("[{}]", i + 1)).cyan(), model, style(marker).dim());
    }

    loop {
        term.write_str(&format!("{} ", style("Model:").bold()))?;
        let input = term.read_line()?;
        match parse_model_choice(&input, default) {
            Some(model) => return Ok(model),
            None => Output::warning(&format!("Unknown model '{}'", input.trim())),
        }
    }
}

/// Accepts an empty line (default), a 1-based index, or a model identifier.
fn parse_model_choice(input: &str, default: LlmModel) -> Option<LlmModel> {
    let input = input.trim();
    if input.is_empty() {
        return Some(default);
    }
    if let Ok(index) = input.parse::<usize>() {
        return index
            .checked_sub(1)
            .and_then(|i| LlmModel::ALL.get(i).copied());
    }
    input.parse().ok()
}
