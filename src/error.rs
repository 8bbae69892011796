//! Error types for Precis.

use thiserror::Error;

/// Which extraction path produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionKind {
    Video,
    Page,
}

impl std::fmt::Display for ExtractionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractionKind::Video => write!(f, "video"),
            ExtractionKind::Page => write!(f, "page"),
        }
    }
}

/// Library-level error type for Precis operations.
#[derive(Error, Debug)]
pub enum PrecisError {
    #[error("Please provide the required information to proceed.")]
    MissingFields,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("{message}")]
    Extraction {
        kind: ExtractionKind,
        message: String,
    },

    #[error("{0}")]
    Summarization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl PrecisError {
    pub fn video(message: impl Into<String>) -> Self {
        PrecisError::Extraction {
            kind: ExtractionKind::Video,
            message: message.into(),
        }
    }

    pub fn page(message: impl Into<String>) -> Self {
        PrecisError::Extraction {
            kind: ExtractionKind::Page,
            message: message.into(),
        }
    }

    /// Stable machine-readable category, used by the web UI.
    pub fn kind_label(&self) -> &'static str {
        match self {
            PrecisError::MissingFields => "missing_fields",
            PrecisError::InvalidUrl(_) => "invalid_url",
            PrecisError::Extraction { .. } => "extraction",
            PrecisError::Summarization(_) => "summarization",
            _ => "internal",
        }
    }

    /// Whether the error comes from user input rather than a collaborator.
    pub fn is_input_error(&self) -> bool {
        matches!(self, PrecisError::MissingFields | PrecisError::InvalidUrl(_))
    }

    /// Message shown to the user by the front ends.
    pub fn user_message(&self) -> String {
        match self {
            PrecisError::MissingFields => self.to_string(),
            PrecisError::InvalidUrl(_) => {
                "Invalid URL! Please enter a valid YouTube or website URL.".to_string()
            }
            PrecisError::Extraction {
                kind: ExtractionKind::Video,
                message,
            } => format!(
                "Error processing YouTube video: {}. Try another URL or check the link.",
                message
            ),
            other => format!("An error occurred: {}", other),
        }
    }
}

/// Result type alias for Precis operations.
pub type Result<T> = std::result::Result<T, PrecisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_labels() {
        assert_eq!(PrecisError::MissingFields.kind_label(), "missing_fields");
        assert_eq!(PrecisError::InvalidUrl("x".into()).kind_label(), "invalid_url");
        assert_eq!(PrecisError::page("boom").kind_label(), "extraction");
        assert_eq!(
            PrecisError::Summarization("nope".into()).kind_label(),
            "summarization"
        );
        assert_eq!(PrecisError::Config("bad".into()).kind_label(), "internal");
    }

    #[test]
    fn test_user_message_keeps_collaborator_text() {
        let err = PrecisError::video("Subtitles are disabled for this video");
        assert_eq!(
            err.user_message(),
            "Error processing YouTube video: Subtitles are disabled for this video. Try another URL or check the link."
        );

        let err = PrecisError::Summarization("invalid_request_error: Invalid API Key".into());
        assert_eq!(
            err.user_message(),
            "An error occurred: invalid_request_error: Invalid API Key"
        );
    }
}
