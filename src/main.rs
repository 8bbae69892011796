//! Precis CLI entry point.

use anyhow::Result;
use clap::Parser;
use precis::cli::{commands, Cli, Commands};
use precis::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Load configuration
    let config_path = cli.config.as_deref().map(Settings::expand_path);
    let settings = Settings::load_from(config_path.as_ref())?;

    // Initialize logging
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("precis={}", log_level)),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let trace = precis::telemetry::init();
    if trace.is_active() {
        tracing::info!(project = %trace.project, "Run tracing enabled");
    }

    // Execute command
    match &cli.command {
        Commands::Summarize { url, api_key, model } => {
            commands::run_summarize(url, api_key.clone(), *model, settings).await?;
        }

        Commands::Interactive { api_key, model } => {
            commands::run_interactive(api_key.clone(), *model, settings).await?;
        }

        Commands::Serve { host, port } => {
            commands::run_serve(host, *port, settings).await?;
        }

        Commands::Config { action } => {
            commands::run_config(action, config_path, settings)?;
        }
    }

    Ok(())
}
