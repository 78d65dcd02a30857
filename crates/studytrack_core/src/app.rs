//! Process-start composition root.
//!
//! # Responsibility
//! - Build the store set, remote client, and the four repositories exactly
//!   once, sharing them as `Arc` handles for process lifetime.
//! - Run the initial load on every repository so observers start from
//!   persisted state.
//!
//! Teardown is drop-based; abandoning in-flight work on shutdown is
//! accepted.

use crate::db::{open_db, open_db_in_memory, DbError};
use crate::remote::client::SheetsClient;
use crate::remote::config::SheetsConfig;
use crate::remote::RemoteError;
use crate::repo::app_config_repo::AppConfigRepository;
use crate::repo::assignment_repo::AssignmentRepository;
use crate::repo::exam_repo::ExamRepository;
use crate::repo::project_repo::ProjectRepository;
use crate::settings::{AppSettings, MemorySettings, SettingsError};
use crate::store::app_config_store::SqliteAppConfigStore;
use crate::store::assignment_store::SqliteAssignmentStore;
use crate::store::exam_store::SqliteExamStore;
use crate::store::project_store::SqliteProjectStore;
use log::info;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

pub type AppResult<T> = Result<T, AppError>;

/// Startup failure for the composition root.
#[derive(Debug)]
pub enum AppError {
    Db(DbError),
    Settings(SettingsError),
    Remote(RemoteError),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Settings(err) => write!(f, "{err}"),
            Self::Remote(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Settings(err) => Some(err),
            Self::Remote(err) => Some(err),
        }
    }
}

impl From<DbError> for AppError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<SettingsError> for AppError {
    fn from(value: SettingsError) -> Self {
        Self::Settings(value)
    }
}

impl From<RemoteError> for AppError {
    fn from(value: RemoteError) -> Self {
        Self::Remote(value)
    }
}

/// Shared-ownership handle bundle built once at process start.
pub struct App {
    pub assignments: Arc<AssignmentRepository>,
    pub exams: Arc<ExamRepository>,
    pub projects: Arc<ProjectRepository>,
    pub app_config: Arc<AppConfigRepository>,
    pub sheets: Arc<SheetsClient>,
    pub settings: Arc<dyn AppSettings>,
}

impl App {
    /// Opens the database file and assembles all repositories.
    pub async fn open(
        db_path: impl AsRef<Path>,
        settings: Arc<dyn AppSettings>,
    ) -> AppResult<Self> {
        let conn = open_db(db_path)?;
        Self::assemble(conn, settings).await
    }

    /// In-memory variant for tests and ephemeral runs.
    pub async fn open_in_memory() -> AppResult<Self> {
        let conn = open_db_in_memory()?;
        Self::assemble(conn, Arc::new(MemorySettings::new())).await
    }

    async fn assemble(conn: Connection, settings: Arc<dyn AppSettings>) -> AppResult<Self> {
        let conn = Arc::new(Mutex::new(conn));
        let sheets_config = SheetsConfig::new(settings.clone());
        let sheets = Arc::new(SheetsClient::new(sheets_config)?);

        let assignments = Arc::new(AssignmentRepository::new(
            Arc::new(SqliteAssignmentStore::new(conn.clone())),
            sheets.clone(),
        ));
        let exams = Arc::new(ExamRepository::new(
            Arc::new(SqliteExamStore::new(conn.clone())),
            sheets.clone(),
        ));
        let projects = Arc::new(ProjectRepository::new(
            Arc::new(SqliteProjectStore::new(conn.clone())),
            sheets.clone(),
        ));
        let app_config = Arc::new(AppConfigRepository::new(
            Arc::new(SqliteAppConfigStore::new(conn)),
            sheets.clone(),
        ));

        assignments.load().await;
        exams.load().await;
        projects.load().await;
        app_config.load_config().await;

        info!("event=app_assemble module=app status=ok");

        Ok(Self {
            assignments,
            exams,
            projects,
            app_config,
            sheets,
            settings,
        })
    }
}
