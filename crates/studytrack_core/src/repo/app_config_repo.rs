//! AppConfig repository.
//!
//! Holds a single record rather than a collection; otherwise follows the
//! same observable-state and bracketing discipline as the entity
//! repositories.

use super::state::StateCell;
use crate::model::app_config::AppConfig;
use crate::model::now_epoch_ms;
use crate::remote::client::SheetsClient;
use crate::remote::rows::{app_config_to_row, APP_CONFIGS_SHEET};
use crate::store::app_config_store::AppConfigStore;
use log::{error, warn};
use std::sync::Arc;
use tokio::sync::watch;

/// Shared repository for the configuration singleton.
pub struct AppConfigRepository {
    store: Arc<dyn AppConfigStore>,
    remote: Arc<SheetsClient>,
    config: StateCell<Option<AppConfig>>,
    is_loading: StateCell<bool>,
    error: StateCell<Option<String>>,
}

impl AppConfigRepository {
    pub fn new(store: Arc<dyn AppConfigStore>, remote: Arc<SheetsClient>) -> Self {
        Self {
            store,
            remote,
            config: StateCell::new(None),
            is_loading: StateCell::new(false),
            error: StateCell::new(None),
        }
    }

    /// Attaches an observer to the singleton record.
    pub fn subscribe_config(&self) -> watch::Receiver<Option<AppConfig>> {
        self.config.subscribe()
    }

    pub fn current_config(&self) -> Option<AppConfig> {
        self.config.get()
    }

    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.is_loading.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading.get()
    }

    pub fn subscribe_error(&self) -> watch::Receiver<Option<String>> {
        self.error.subscribe()
    }

    pub fn current_error(&self) -> Option<String> {
        self.error.get()
    }

    pub fn clear_error(&self) {
        self.error.set(None);
    }

    /// Loads the singleton from durable storage and publishes it.
    ///
    /// Returns `None` both when the record is absent and on failure; the
    /// failure case additionally records `error`.
    pub async fn load_config(&self) -> Option<AppConfig> {
        self.begin_action();
        let config = match self.store.get().await {
            Ok(config) => {
                self.config.set(config.clone());
                config
            }
            Err(err) => {
                self.fail("load", err.to_string());
                None
            }
        };
        self.is_loading.set(false);
        config
    }

    /// Upserts the whole record.
    pub async fn save_config(&self, config: AppConfig) -> bool {
        self.begin_action();
        let saved = match self.store.upsert(&config).await {
            Ok(()) => {
                self.config.set(Some(config.clone()));
                self.push_config(&config).await;
                true
            }
            Err(err) => {
                self.fail("save", err.to_string());
                false
            }
        };
        self.is_loading.set(false);
        saved
    }

    /// Read-modify-write of the endpoint URL on the singleton.
    ///
    /// When the record is absent a new one is constructed with both
    /// timestamps set to now; when present only the URL is replaced and the
    /// update timestamp refreshed.
    pub async fn update_google_sheet_url(&self, url: &str) -> bool {
        self.begin_action();
        let updated = match self.store.get().await {
            Ok(existing) => {
                let now_ms = now_epoch_ms();
                let config = match existing {
                    Some(mut config) => {
                        config.google_sheets_url = url.to_string();
                        config.updated_at = Some(now_ms);
                        config
                    }
                    None => AppConfig::new(url, now_ms),
                };
                match self.store.upsert(&config).await {
                    Ok(()) => {
                        self.config.set(Some(config.clone()));
                        self.push_config(&config).await;
                        true
                    }
                    Err(err) => {
                        self.fail("update_url", err.to_string());
                        false
                    }
                }
            }
            Err(err) => {
                self.fail("update_url", err.to_string());
                false
            }
        };
        self.is_loading.set(false);
        updated
    }

    /// Fetches the singleton without mutating shared state.
    pub async fn get_config(&self) -> Option<AppConfig> {
        match self.store.get().await {
            Ok(config) => config,
            Err(err) => {
                warn!("event=config_get module=app_config_repo status=error error={err}");
                None
            }
        }
    }

    fn begin_action(&self) {
        self.is_loading.set(true);
        self.error.set(None);
    }

    fn fail(&self, action: &str, message: String) {
        error!("event=config_{action} module=app_config_repo status=error error={message}");
        self.error.set(Some(message));
    }

    async fn push_config(&self, config: &AppConfig) {
        if !self.remote.is_configured() {
            return;
        }
        if let Err(err) = self
            .remote
            .update(APP_CONFIGS_SHEET, &config.id, app_config_to_row(config))
            .await
        {
            warn!("event=remote_push module=app_config_repo status=error action=update error={err}");
        }
    }
}
