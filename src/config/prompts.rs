//! Prompt templates for Precis.
//!
//! The summary prompt can be customized by placing a `summary.toml` file in the
//! custom prompts directory.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Placeholder that receives the stuffed document text.
pub const TEXT_SLOT: &str = "{{text}}";

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Prompts {
    pub summary: SummaryPrompts,
}

/// Prompt for summarization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryPrompts {
    pub template: String,
}

impl Default for SummaryPrompts {
    fn default() -> Self {
        Self {
            template: r#"
Provide a summary of the following content in {{words}} words:
Content: {{text}}
"#
            .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts, overriding defaults from the custom directory if present.
    pub fn load(custom_dir: Option<&str>) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let summary_path = custom_path.join("summary.toml");
            if summary_path.exists() {
                let content = std::fs::read_to_string(&summary_path)?;
                prompts.summary = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Summary template with everything but the text slot filled in.
    pub fn summary_template(&self, words: u32) -> String {
        let mut vars = HashMap::new();
        vars.insert("words".to_string(), words.to_string());
        Self::render(&self.summary.template, &vars)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }
}
