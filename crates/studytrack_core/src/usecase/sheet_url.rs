//! Endpoint-URL configuration use cases.

use crate::model::app_config::AppConfig;
use crate::remote::client::SheetsClient;
use crate::remote::config::{is_valid_script_url, SheetsConfig};
use crate::repo::app_config_repo::AppConfigRepository;
use log::warn;

/// Updates the endpoint URL on the config singleton and mirrors it into the
/// settings-backed client configuration.
///
/// Rejects URLs that do not look like Apps Script deployments.
pub async fn update_google_sheet_url(
    repository: &AppConfigRepository,
    sheets: &SheetsConfig,
    url: &str,
) -> bool {
    if !is_valid_script_url(url) {
        return false;
    }
    if !repository.update_google_sheet_url(url).await {
        return false;
    }
    if let Err(err) = sheets.set_script_url(url.trim()) {
        warn!("event=sheet_url_mirror module=usecase status=error error={err}");
    }
    true
}

/// Tests connectivity to the configured endpoint.
pub async fn validate_sheet_url(client: &SheetsClient) -> bool {
    client.ping().await
}

/// Returns the current config singleton, if any.
pub async fn current_sheet_config(repository: &AppConfigRepository) -> Option<AppConfig> {
    repository.get_config().await
}
