//! Selectable LLM models.

use serde::{Deserialize, Serialize};

/// Models offered by the model selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum LlmModel {
    #[default]
    #[serde(rename = "Gemma2-9b-It")]
    #[value(name = "Gemma2-9b-It")]
    Gemma2_9bIt,
    #[serde(rename = "Llama3-8b-8192")]
    #[value(name = "Llama3-8b-8192")]
    Llama3_8b8192,
    #[serde(rename = "Llama3-70b-8192")]
    #[value(name = "Llama3-70b-8192")]
    Llama3_70b8192,
}

impl LlmModel {
    pub const ALL: [LlmModel; 3] = [
        LlmModel::Gemma2_9bIt,
        LlmModel::Llama3_8b8192,
        LlmModel::Llama3_70b8192,
    ];

    /// Model identifier sent to the API.
    pub fn as_str(&self) -> &'static str {
        match self {
            LlmModel::Gemma2_9bIt => "Gemma2-9b-It",
            LlmModel::Llama3_8b8192 => "Llama3-8b-8192",
            LlmModel::Llama3_70b8192 => "Llama3-70b-8192",
        }
    }
}

impl std::str::FromStr for LlmModel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown model: {}", s))
    }
}

impl std::fmt::Display for LlmModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("llama3-8b-8192".parse::<LlmModel>(), Ok(LlmModel::Llama3_8b8192));
        assert_eq!("Gemma2-9b-It".parse::<LlmModel>(), Ok(LlmModel::Gemma2_9bIt));
        assert!("gpt-4o".parse::<LlmModel>().is_err());
    }

    #[test]
    fn test_serde_uses_identifiers() {
        let json = serde_json::to_string(&LlmModel::Llama3_70b8192).unwrap();
        assert_eq!(json, "\"Llama3-70b-8192\"");
        let model: LlmModel = serde_json::from_str("\"Llama3-8b-8192\"").unwrap();
        assert_eq!(model, LlmModel::Llama3_8b8192);
    }
}
