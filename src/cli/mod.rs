//! CLI module for Precis.

pub mod commands;
mod output;

pub use output::Output;

use crate::summarize::LlmModel;
use clap::{Parser, Subcommand};

/// Precis - Summarize any URL
///
/// Summarizes a YouTube video (from its transcript) or any website (from its text)
/// with a hosted LLM.
#[derive(Parser, Debug)]
#[command(name = "precis")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize a single URL and exit
    Summarize {
        /// YouTube or website URL
        url: String,

        /// Groq API key
        #[arg(short = 'k', long, env = "GROQ_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// LLM model to use
        #[arg(short, long, value_enum, ignore_case = true)]
        model: Option<LlmModel>,
    },

    /// Prompt for a key and model once, then summarize URLs until an empty line
    Interactive {
        /// Groq API key (prompted for if not set)
        #[arg(short = 'k', long, env = "GROQ_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// LLM model to use (prompted for if not set)
        #[arg(short, long, value_enum, ignore_case = true)]
        model: Option<LlmModel>,
    },

    /// Serve the single-page web UI
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "8501")]
        port: u16,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_summarize() {
        let cli = Cli::try_parse_from([
            "precis",
            "summarize",
            "https://example.com",
            "--api-key",
            "abc",
            "--model",
            "llama3-8b-8192",
        ])
        .unwrap();

        match cli.command {
            Commands::Summarize { url, api_key, model } => {
                assert_eq!(url, "https://example.com");
                assert_eq!(api_key.as_deref(), Some("abc"));
                assert_eq!(model, Some(LlmModel::Llama3_8b8192));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_model() {
        assert!(Cli::try_parse_from([
            "precis",
            "summarize",
            "https://example.com",
            "--model",
            "gpt-4o"
        ])
        .is_err());
    }

    #[test]
    fn test_serve_defaults() {
        let cli = Cli::try_parse_from(["precis", "-vv", "serve"]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Serve { host, port } => {
                assert_eq!(host, "127.0.0.1");
                assert_eq!(port, 8501);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
