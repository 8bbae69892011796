//! Summarize command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::pipeline::{Pipeline, Stage, SummaryRequest};
use crate::summarize::LlmModel;
use anyhow::Result;
use indicatif::ProgressBar;

/// Run the summarize command.
pub async fn run_summarize(
    url: &str,
    api_key: Option<String>,
    model: Option<LlmModel>,
    settings: Settings,
) -> Result<()> {
    let pipeline = Pipeline::from_settings(&settings)?;
    let model = model.unwrap_or(settings.llm.default_model);

    let request = SummaryRequest::new(api_key.unwrap_or_default(), model, url);

    match run_with_spinner(&pipeline, &request).await {
        Ok(summary) => {
            Output::success("Summary generated successfully!");
            println!("\n{}\n", summary);
            Ok(())
        }
        Err(e) => {
            Output::error(&e.user_message());
            Err(e.into())
        }
    }
}

/// Run the pipeline with a spinner shown while content is being processed.
pub(crate) async fn run_with_spinner(
    pipeline: &Pipeline,
    request: &SummaryRequest,
) -> crate::error::Result<String> {
    let mut spinner: Option<ProgressBar> = None;

    pipeline
        .run(request, |stage| match stage {
            Stage::Extracting => {
                spinner = Some(Output::spinner("Extracting and summarizing content..."));
            }
            Stage::Summarizing => {
                if let Some(pb) = &spinner {
                    pb.set_message(format!("Summarizing with {}...", request.model));
                }
            }
            Stage::Displaying(_) => {
                if let Some(pb) = spinner.take() {
                    pb.finish_and_clear();
                }
            }
            Stage::Idle | Stage::Validating => {}
        })
        .await
}
