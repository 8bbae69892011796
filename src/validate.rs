//! Input validation.

use crate::error::{PrecisError, Result};
use url::Url;

/// Check that a credential and URL are present and that the URL is well-formed.
///
/// Missing fields are reported before URL problems. Returns the parsed URL.
pub fn validate(api_key: &str, url: &str) -> Result<Url> {
    if api_key.trim().is_empty() || url.trim().is_empty() {
        return Err(PrecisError::MissingFields);
    }

    let parsed = Url::parse(url.trim()).map_err(|e| PrecisError::InvalidUrl(e.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(PrecisError::InvalidUrl(format!(
            "unsupported scheme '{}'",
            parsed.scheme()
        )));
    }

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(parsed),
        _ => Err(PrecisError::InvalidUrl("missing host".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields() {
        for (key, url) in [
            ("", "https://example.com"),
            ("   ", "https://example.com"),
            ("abc", ""),
            ("abc", " \t\n"),
            ("", ""),
        ] {
            assert!(
                matches!(validate(key, url), Err(PrecisError::MissingFields)),
                "expected MissingFields for ({:?}, {:?})",
                key,
                url
            );
        }
    }

    #[test]
    fn test_missing_fields_wins_over_bad_url() {
        assert!(matches!(
            validate("", "not a url"),
            Err(PrecisError::MissingFields)
        ));
    }

    #[test]
    fn test_invalid_urls() {
        for url in [
            "example.com",
            "not a url",
            "https://",
            "mailto:someone@example.com",
            "file:///etc/passwd",
            "/relative/path",
        ] {
            assert!(
                matches!(validate("abc", url), Err(PrecisError::InvalidUrl(_))),
                "expected InvalidUrl for {:?}",
                url
            );
        }
    }

    #[test]
    fn test_valid_urls() {
        let url = validate("abc", "https://example.com/article").unwrap();
        assert_eq!(url.host_str(), Some("example.com"));

        let url = validate("abc", "  https://youtube.com/watch?v=XYZ123  ").unwrap();
        assert_eq!(url.query(), Some("v=XYZ123"));

        assert!(validate("abc", "http://127.0.0.1:8080/page").is_ok());
    }
}
