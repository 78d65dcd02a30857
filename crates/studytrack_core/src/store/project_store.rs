//! Project storage contract and SQLite implementation.

use super::{bool_to_int, parse_bool_column, StoreError, StoreResult};
use crate::model::now_epoch_ms;
use crate::model::project::{Project, MAX_PROGRESS};
use async_trait::async_trait;
use rusqlite::{params, Connection, Row};
use std::sync::Arc;
use tokio::sync::Mutex;

const PROJECT_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    start_date_millis,
    due_date_millis,
    subject,
    progress,
    completed
FROM projects";

/// Durable storage contract for projects.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn list(&self) -> StoreResult<Vec<Project>>;
    async fn get(&self, id: &str) -> StoreResult<Option<Project>>;
    async fn upsert(&self, project: &Project) -> StoreResult<()>;
    async fn delete(&self, id: &str) -> StoreResult<()>;
}

/// SQLite-backed project store sharing one core connection.
pub struct SqliteProjectStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteProjectStore {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl ProjectStore for SqliteProjectStore {
    async fn list(&self) -> StoreResult<Vec<Project>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&format!(
            "{PROJECT_SELECT_SQL} ORDER BY due_date_millis ASC, id ASC"
        ))?;
        let mut rows = stmt.query([])?;

        let mut projects = Vec::new();
        while let Some(row) = rows.next()? {
            projects.push(parse_project_row(row)?);
        }
        Ok(projects)
    }

    async fn get(&self, id: &str) -> StoreResult<Option<Project>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&format!("{PROJECT_SELECT_SQL} WHERE id = ?1"))?;
        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_project_row(row)?));
        }
        Ok(None)
    }

    async fn upsert(&self, project: &Project) -> StoreResult<()> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO projects (
                id,
                title,
                description,
                start_date_millis,
                due_date_millis,
                subject,
                progress,
                completed,
                updated_at_millis
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                description = excluded.description,
                start_date_millis = excluded.start_date_millis,
                due_date_millis = excluded.due_date_millis,
                subject = excluded.subject,
                progress = excluded.progress,
                completed = excluded.completed,
                updated_at_millis = excluded.updated_at_millis;",
            params![
                project.id.as_str(),
                project.title.as_str(),
                project.description.as_str(),
                project.start_date,
                project.due_date,
                project.subject.as_str(),
                i64::from(project.progress),
                bool_to_int(project.completed),
                now_epoch_ms(),
            ],
        )?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let conn = self.conn.lock().await;
        conn.execute("DELETE FROM projects WHERE id = ?1;", params![id])?;
        Ok(())
    }
}

fn parse_project_row(row: &Row<'_>) -> StoreResult<Project> {
    let progress_raw: i64 = row.get("progress")?;
    if progress_raw < 0 || progress_raw > i64::from(MAX_PROGRESS) {
        return Err(StoreError::InvalidData(format!(
            "invalid progress value `{progress_raw}` in projects.progress"
        )));
    }

    let completed = parse_bool_column(row.get("completed")?, "projects", "completed")?;

    Ok(Project {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        start_date: row.get("start_date_millis")?,
        due_date: row.get("due_date_millis")?,
        subject: row.get("subject")?,
        progress: progress_raw as u8,
        completed,
    })
}
