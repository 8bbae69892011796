//! CLI command implementations.

mod config;
mod interactive;
mod serve;
mod summarize;

pub use config::run_config;
pub use interactive::run_interactive;
pub use serve::run_serve;
pub use summarize::run_summarize;
