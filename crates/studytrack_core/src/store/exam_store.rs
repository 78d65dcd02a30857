//! Exam storage contract and SQLite implementation.

use super::{bool_to_int, parse_bool_column, StoreResult};
use crate::model::exam::Exam;
use crate::model::now_epoch_ms;
use async_trait::async_trait;
use rusqlite::{params, Connection, Row};
use std::sync::Arc;
use tokio::sync::Mutex;

const EXAM_SELECT_SQL: &str = "SELECT
    id,
    title,
    subject,
    exam_date_millis,
    description,
    preparation_done
FROM exams";

/// Durable storage contract for exams.
#[async_trait]
pub trait ExamStore: Send + Sync {
    async fn list(&self) -> StoreResult<Vec<Exam>>;
    async fn get(&self, id: &str) -> StoreResult<Option<Exam>>;
    async fn upsert(&self, exam: &Exam) -> StoreResult<()>;
    async fn delete(&self, id: &str) -> StoreResult<()>;
}

/// SQLite-backed exam store sharing one core connection.
pub struct SqliteExamStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteExamStore {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl ExamStore for SqliteExamStore {
    async fn list(&self) -> StoreResult<Vec<Exam>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&format!(
            "{EXAM_SELECT_SQL} ORDER BY exam_date_millis ASC, id ASC"
        ))?;
        let mut rows = stmt.query([])?;

        let mut exams = Vec::new();
        while let Some(row) = rows.next()? {
            exams.push(parse_exam_row(row)?);
        }
        Ok(exams)
    }

    async fn get(&self, id: &str) -> StoreResult<Option<Exam>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&format!("{EXAM_SELECT_SQL} WHERE id = ?1"))?;
        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_exam_row(row)?));
        }
        Ok(None)
    }

    async fn upsert(&self, exam: &Exam) -> StoreResult<()> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO exams (
                id,
                title,
                subject,
                exam_date_millis,
                description,
                preparation_done,
                updated_at_millis
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                subject = excluded.subject,
                exam_date_millis = excluded.exam_date_millis,
                description = excluded.description,
                preparation_done = excluded.preparation_done,
                updated_at_millis = excluded.updated_at_millis;",
            params![
                exam.id.as_str(),
                exam.title.as_str(),
                exam.subject.as_str(),
                exam.exam_date,
                exam.description.as_str(),
                bool_to_int(exam.preparation_done),
                now_epoch_ms(),
            ],
        )?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let conn = self.conn.lock().await;
        conn.execute("DELETE FROM exams WHERE id = ?1;", params![id])?;
        Ok(())
    }
}

fn parse_exam_row(row: &Row<'_>) -> StoreResult<Exam> {
    let preparation_done = parse_bool_column(
        row.get("preparation_done")?,
        "exams",
        "preparation_done",
    )?;

    Ok(Exam {
        id: row.get("id")?,
        title: row.get("title")?,
        subject: row.get("subject")?,
        exam_date: row.get("exam_date_millis")?,
        description: row.get("description")?,
        preparation_done,
    })
}
