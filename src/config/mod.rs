//! Configuration module for Precis.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{Prompts, SummaryPrompts, TEXT_SLOT};
pub use settings::{
    FetchSettings, GeneralSettings, LlmSettings, PromptSettings, Settings, YoutubeSettings,
};
