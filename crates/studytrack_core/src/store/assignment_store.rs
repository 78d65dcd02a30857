//! Assignment storage contract and SQLite implementation.

use super::{bool_to_int, parse_bool_column, StoreError, StoreResult};
use crate::model::assignment::{Assignment, Priority};
use crate::model::now_epoch_ms;
use async_trait::async_trait;
use rusqlite::{params, Connection, Row};
use std::sync::Arc;
use tokio::sync::Mutex;

const ASSIGNMENT_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    due_date_millis,
    subject,
    completed,
    priority
FROM assignments";

/// Query options for listing assignments.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssignmentListQuery {
    /// When set, restricts the listing to the matching completion state.
    pub completed: Option<bool>,
}

/// Durable storage contract for assignments.
#[async_trait]
pub trait AssignmentStore: Send + Sync {
    async fn list(&self, query: &AssignmentListQuery) -> StoreResult<Vec<Assignment>>;
    async fn get(&self, id: &str) -> StoreResult<Option<Assignment>>;
    async fn upsert(&self, assignment: &Assignment) -> StoreResult<()>;
    async fn delete(&self, id: &str) -> StoreResult<()>;
}

/// SQLite-backed assignment store sharing one core connection.
pub struct SqliteAssignmentStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteAssignmentStore {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl AssignmentStore for SqliteAssignmentStore {
    async fn list(&self, query: &AssignmentListQuery) -> StoreResult<Vec<Assignment>> {
        let conn = self.conn.lock().await;
        let mut sql = format!("{ASSIGNMENT_SELECT_SQL} WHERE 1 = 1");
        if query.completed.is_some() {
            sql.push_str(" AND completed = ?1");
        }
        sql.push_str(" ORDER BY due_date_millis ASC, id ASC");

        let mut stmt = conn.prepare(&sql)?;
        let mut rows = match query.completed {
            Some(completed) => stmt.query(params![bool_to_int(completed)])?,
            None => stmt.query([])?,
        };

        let mut assignments = Vec::new();
        while let Some(row) = rows.next()? {
            assignments.push(parse_assignment_row(row)?);
        }
        Ok(assignments)
    }

    async fn get(&self, id: &str) -> StoreResult<Option<Assignment>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&format!("{ASSIGNMENT_SELECT_SQL} WHERE id = ?1"))?;
        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_assignment_row(row)?));
        }
        Ok(None)
    }

    async fn upsert(&self, assignment: &Assignment) -> StoreResult<()> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO assignments (
                id,
                title,
                description,
                due_date_millis,
                subject,
                completed,
                priority,
                updated_at_millis
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                description = excluded.description,
                due_date_millis = excluded.due_date_millis,
                subject = excluded.subject,
                completed = excluded.completed,
                priority = excluded.priority,
                updated_at_millis = excluded.updated_at_millis;",
            params![
                assignment.id.as_str(),
                assignment.title.as_str(),
                assignment.description.as_str(),
                assignment.due_date,
                assignment.subject.as_str(),
                bool_to_int(assignment.completed),
                assignment.priority.as_str(),
                now_epoch_ms(),
            ],
        )?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let conn = self.conn.lock().await;
        conn.execute("DELETE FROM assignments WHERE id = ?1;", params![id])?;
        Ok(())
    }
}

fn parse_assignment_row(row: &Row<'_>) -> StoreResult<Assignment> {
    let priority_text: String = row.get("priority")?;
    let priority = Priority::parse(&priority_text).ok_or_else(|| {
        StoreError::InvalidData(format!(
            "invalid priority `{priority_text}` in assignments.priority"
        ))
    })?;

    let completed = parse_bool_column(row.get("completed")?, "assignments", "completed")?;

    Ok(Assignment {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        due_date: row.get("due_date_millis")?,
        subject: row.get("subject")?,
        completed,
        priority,
    })
}
