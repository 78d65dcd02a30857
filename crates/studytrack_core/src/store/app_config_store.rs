//! AppConfig singleton storage contract and SQLite implementation.
//!
//! The table holds exactly one logical row keyed by `APP_CONFIG_ID`.

use super::StoreResult;
use crate::model::app_config::{AppConfig, APP_CONFIG_ID};
use async_trait::async_trait;
use rusqlite::{params, Connection, Row};
use std::sync::Arc;
use tokio::sync::Mutex;

const APP_CONFIG_SELECT_SQL: &str = "SELECT
    id,
    google_sheets_url,
    created_at_millis,
    updated_at_millis
FROM app_configs";

/// Durable storage contract for the configuration singleton.
#[async_trait]
pub trait AppConfigStore: Send + Sync {
    async fn get(&self) -> StoreResult<Option<AppConfig>>;
    async fn upsert(&self, config: &AppConfig) -> StoreResult<()>;
    async fn delete(&self) -> StoreResult<()>;
}

/// SQLite-backed config store sharing one core connection.
pub struct SqliteAppConfigStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteAppConfigStore {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl AppConfigStore for SqliteAppConfigStore {
    async fn get(&self) -> StoreResult<Option<AppConfig>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&format!(
            "{APP_CONFIG_SELECT_SQL} WHERE id = ?1 LIMIT 1"
        ))?;
        let mut rows = stmt.query(params![APP_CONFIG_ID])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_app_config_row(row)?));
        }
        Ok(None)
    }

    async fn upsert(&self, config: &AppConfig) -> StoreResult<()> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO app_configs (
                id,
                google_sheets_url,
                created_at_millis,
                updated_at_millis
            ) VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(id) DO UPDATE SET
                google_sheets_url = excluded.google_sheets_url,
                created_at_millis = excluded.created_at_millis,
                updated_at_millis = excluded.updated_at_millis;",
            params![
                APP_CONFIG_ID,
                config.google_sheets_url.as_str(),
                config.created_at,
                config.updated_at,
            ],
        )?;
        Ok(())
    }

    async fn delete(&self) -> StoreResult<()> {
        let conn = self.conn.lock().await;
        conn.execute("DELETE FROM app_configs WHERE id = ?1;", params![APP_CONFIG_ID])?;
        Ok(())
    }
}

fn parse_app_config_row(row: &Row<'_>) -> StoreResult<AppConfig> {
    Ok(AppConfig {
        id: row.get("id")?,
        google_sheets_url: row.get("google_sheets_url")?,
        created_at: row.get("created_at_millis")?,
        updated_at: row.get("updated_at_millis")?,
    })
}
