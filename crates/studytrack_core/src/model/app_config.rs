//! Application configuration singleton record.

use serde::{Deserialize, Serialize};

/// Well-known id of the single logical `AppConfig` row.
pub const APP_CONFIG_ID: &str = "app_config_singleton";

/// Singleton record holding the remote endpoint URL and audit timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Always `APP_CONFIG_ID`; kept as a field so the record round-trips
    /// through keyed storage like every other entity.
    pub id: String,
    pub google_sheets_url: String,
    /// Unix epoch milliseconds.
    pub created_at: Option<i64>,
    /// Unix epoch milliseconds.
    pub updated_at: Option<i64>,
}

impl AppConfig {
    /// Creates the singleton record with the given URL and both timestamps
    /// set to `now_ms`.
    pub fn new(google_sheets_url: impl Into<String>, now_ms: i64) -> Self {
        Self {
            id: APP_CONFIG_ID.to_string(),
            google_sheets_url: google_sheets_url.into(),
            created_at: Some(now_ms),
            updated_at: Some(now_ms),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            id: APP_CONFIG_ID.to_string(),
            google_sheets_url: String::new(),
            created_at: None,
            updated_at: None,
        }
    }
}
