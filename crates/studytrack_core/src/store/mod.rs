//! Persistent store contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define per-entity durable storage contracts (list, get, upsert, delete).
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Upsert is insert-or-replace by id; delete is idempotent.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod app_config_store;
pub mod assignment_store;
pub mod exam_store;
pub mod project_store;

pub use app_config_store::{AppConfigStore, SqliteAppConfigStore};
pub use assignment_store::{AssignmentListQuery, AssignmentStore, SqliteAssignmentStore};
pub use exam_store::{ExamStore, SqliteExamStore};
pub use project_store::{ProjectStore, SqliteProjectStore};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-access failure for durable entity storage.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

pub(crate) fn parse_bool_column(value: i64, table: &str, column: &str) -> StoreResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(StoreError::InvalidData(format!(
            "invalid {column} value `{other}` in {table}.{column}"
        ))),
    }
}
