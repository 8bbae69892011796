//! Extracted text passed to the summarizer.

use std::collections::BTreeMap;

/// A unit of extracted plain text with optional metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub content: String,
    pub metadata: BTreeMap<String, String>,
}

impl Document {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Attach a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// Join document contents in order, separated by blank lines.
pub fn stuff(documents: &[Document]) -> String {
    documents
        .iter()
        .map(|d| d.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stuff_preserves_order() {
        let docs = vec![Document::new("first"), Document::new("second")];
        assert_eq!(stuff(&docs), "first\n\nsecond");
    }

    #[test]
    fn test_blank() {
        assert!(Document::new("  \n").is_blank());
        assert!(!Document::new("x").with_metadata("source", "u").is_blank());
    }
}
