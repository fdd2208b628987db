//! Log-safe rendering of secrets and model output.

use std::fmt;

/// Masked API key for logs and config display
///
/// Only the first 6 characters are shown, the rest becomes `***`.
#[derive(Clone, Debug)]
pub struct SensitiveApiKey<'a> {
    inner: &'a str,
}

impl<'a> SensitiveApiKey<'a> {
    /// # Example
    /// ```
    /// use pipecost::logging::SensitiveApiKey;
    ///
    /// let key = "AIzaSyD-example-key-123456";
    /// assert_eq!(SensitiveApiKey::new(key).to_string(), "AIzaSy***");
    /// ```
    pub fn new(key: &'a str) -> Self {
        Self { inner: key }
    }
}

impl<'a> fmt::Display for SensitiveApiKey<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.inner.is_empty() {
            return write!(f, "<unset>");
        }
        let visible: String = self.inner.chars().take(6).collect();
        if self.inner.chars().count() <= 12 {
            // too short to reveal anything
            write!(f, "***")
        } else {
            write!(f, "{}***", visible)
        }
    }
}

/// Shorten model output for a log line without splitting a character
pub fn truncate_for_log(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}… ({} bytes total)", &text[..cut], text.len()),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensitive_api_key_display() {
        let key = "AIzaSyD-example-key-123456";
        assert_eq!(format!("{}", SensitiveApiKey::new(key)), "AIzaSy***");
    }

    #[test]
    fn test_sensitive_api_key_short_and_empty() {
        assert_eq!(SensitiveApiKey::new("abc123").to_string(), "***");
        assert_eq!(SensitiveApiKey::new("").to_string(), "<unset>");
    }

    #[test]
    fn test_truncate_for_log() {
        assert_eq!(truncate_for_log("short", 10), "short");
        assert_eq!(truncate_for_log("abcdef", 3), "abc… (6 bytes total)");
        // multi-byte characters are never split
        assert_eq!(truncate_for_log("€€€€", 2), "€€… (12 bytes total)");
    }
}
