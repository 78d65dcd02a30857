//! Endpoint configuration read through the settings surface.
//!
//! The endpoint URL is the single user-editable setting; keys carry a
//! `sheets_` prefix to avoid collisions with other features sharing the
//! settings store.

use crate::settings::{AppSettings, SettingsResult};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

const KEY_SCRIPT_URL: &str = "sheets_script_url";

static SCRIPT_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https://script\.google\.com/macros/s/[A-Za-z0-9_-]+/exec/?$")
        .expect("script URL pattern must compile")
});

/// Returns whether `url` has the shape of an Apps Script deployment URL.
pub fn is_valid_script_url(url: &str) -> bool {
    SCRIPT_URL_RE.is_match(url.trim())
}

/// Settings-backed view of the remote endpoint configuration.
#[derive(Clone)]
pub struct SheetsConfig {
    settings: Arc<dyn AppSettings>,
}

impl SheetsConfig {
    pub fn new(settings: Arc<dyn AppSettings>) -> Self {
        Self { settings }
    }

    /// Returns the configured endpoint URL, or an empty string.
    pub fn script_url(&self) -> String {
        self.settings.get_string(KEY_SCRIPT_URL, "")
    }

    /// Persists a new endpoint URL.
    pub fn set_script_url(&self, url: &str) -> SettingsResult<()> {
        self.settings.put_string(KEY_SCRIPT_URL, url)
    }

    /// Whether a non-blank endpoint URL is configured.
    pub fn is_configured(&self) -> bool {
        !self.script_url().trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::is_valid_script_url;

    #[test]
    fn accepts_deployment_urls() {
        assert!(is_valid_script_url(
            "https://script.google.com/macros/s/AKfycbwAbC123_-xyz/exec"
        ));
        assert!(is_valid_script_url(
            " https://script.google.com/macros/s/AKfycbwAbC123/exec/ "
        ));
    }

    #[test]
    fn rejects_non_deployment_urls() {
        assert!(!is_valid_script_url(""));
        assert!(!is_valid_script_url("https://example.com/exec"));
        assert!(!is_valid_script_url(
            "http://script.google.com/macros/s/AKfycbw/exec"
        ));
        assert!(!is_valid_script_url(
            "https://script.google.com/macros/s/AKfycbw/dev"
        ));
    }
}
