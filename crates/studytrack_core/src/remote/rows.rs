//! Entity to sheet-row mapping.
//!
//! The spreadsheet backend stores every cell as a string, so each entity maps
//! to a flat string map. Empty cells stand for absent optional values.

use super::{RemoteError, RemoteResult};
use crate::model::app_config::AppConfig;
use crate::model::assignment::{Assignment, Priority};
use crate::model::exam::Exam;
use crate::model::project::{Project, MAX_PROGRESS};
use std::collections::BTreeMap;

pub const ASSIGNMENTS_SHEET: &str = "assignments";
pub const EXAMS_SHEET: &str = "exams";
pub const PROJECTS_SHEET: &str = "projects";
pub const APP_CONFIGS_SHEET: &str = "app_configs";

pub fn assignment_to_row(assignment: &Assignment) -> BTreeMap<String, String> {
    let mut row = BTreeMap::new();
    row.insert("id".to_string(), assignment.id.clone());
    row.insert("title".to_string(), assignment.title.clone());
    row.insert("description".to_string(), assignment.description.clone());
    row.insert("due_date".to_string(), millis_cell(assignment.due_date));
    row.insert("subject".to_string(), assignment.subject.clone());
    row.insert("completed".to_string(), assignment.completed.to_string());
    row.insert(
        "priority".to_string(),
        assignment.priority.as_str().to_string(),
    );
    row
}

pub fn assignment_from_row(row: &BTreeMap<String, String>) -> RemoteResult<Assignment> {
    let priority_text = cell(row, "priority");
    let priority = if priority_text.is_empty() {
        Priority::default()
    } else {
        Priority::parse(&priority_text).ok_or_else(|| {
            RemoteError::Decode(format!("invalid priority cell `{priority_text}`"))
        })?
    };

    Ok(Assignment {
        id: required_cell(row, "id")?,
        title: cell(row, "title"),
        description: cell(row, "description"),
        due_date: parse_millis_cell(row, "due_date")?,
        subject: cell(row, "subject"),
        completed: parse_bool_cell(row, "completed")?,
        priority,
    })
}

pub fn exam_to_row(exam: &Exam) -> BTreeMap<String, String> {
    let mut row = BTreeMap::new();
    row.insert("id".to_string(), exam.id.clone());
    row.insert("title".to_string(), exam.title.clone());
    row.insert("subject".to_string(), exam.subject.clone());
    row.insert("exam_date".to_string(), millis_cell(exam.exam_date));
    row.insert("description".to_string(), exam.description.clone());
    row.insert(
        "preparation_done".to_string(),
        exam.preparation_done.to_string(),
    );
    row
}

pub fn exam_from_row(row: &BTreeMap<String, String>) -> RemoteResult<Exam> {
    Ok(Exam {
        id: required_cell(row, "id")?,
        title: cell(row, "title"),
        subject: cell(row, "subject"),
        exam_date: parse_millis_cell(row, "exam_date")?,
        description: cell(row, "description"),
        preparation_done: parse_bool_cell(row, "preparation_done")?,
    })
}

pub fn project_to_row(project: &Project) -> BTreeMap<String, String> {
    let mut row = BTreeMap::new();
    row.insert("id".to_string(), project.id.clone());
    row.insert("title".to_string(), project.title.clone());
    row.insert("description".to_string(), project.description.clone());
    row.insert("start_date".to_string(), millis_cell(project.start_date));
    row.insert("due_date".to_string(), millis_cell(project.due_date));
    row.insert("subject".to_string(), project.subject.clone());
    row.insert("progress".to_string(), project.progress.to_string());
    row.insert("completed".to_string(), project.completed.to_string());
    row
}

pub fn project_from_row(row: &BTreeMap<String, String>) -> RemoteResult<Project> {
    let progress_text = cell(row, "progress");
    let progress: i64 = if progress_text.is_empty() {
        0
    } else {
        progress_text.parse().map_err(|_| {
            RemoteError::Decode(format!("invalid progress cell `{progress_text}`"))
        })?
    };
    if progress < 0 || progress > i64::from(MAX_PROGRESS) {
        return Err(RemoteError::Decode(format!(
            "progress cell `{progress}` outside 0..=100"
        )));
    }

    Ok(Project {
        id: required_cell(row, "id")?,
        title: cell(row, "title"),
        description: cell(row, "description"),
        start_date: parse_millis_cell(row, "start_date")?,
        due_date: parse_millis_cell(row, "due_date")?,
        subject: cell(row, "subject"),
        progress: progress as u8,
        completed: parse_bool_cell(row, "completed")?,
    })
}

pub fn app_config_to_row(config: &AppConfig) -> BTreeMap<String, String> {
    let mut row = BTreeMap::new();
    row.insert("id".to_string(), config.id.clone());
    row.insert(
        "google_sheets_url".to_string(),
        config.google_sheets_url.clone(),
    );
    row.insert("created_at".to_string(), millis_cell(config.created_at));
    row.insert("updated_at".to_string(), millis_cell(config.updated_at));
    row
}

fn cell(row: &BTreeMap<String, String>, name: &str) -> String {
    row.get(name).cloned().unwrap_or_default()
}

fn required_cell(row: &BTreeMap<String, String>, name: &str) -> RemoteResult<String> {
    let value = cell(row, name);
    if value.trim().is_empty() {
        return Err(RemoteError::Decode(format!("missing `{name}` cell")));
    }
    Ok(value)
}

fn millis_cell(value: Option<i64>) -> String {
    value.map(|millis| millis.to_string()).unwrap_or_default()
}

fn parse_millis_cell(row: &BTreeMap<String, String>, name: &str) -> RemoteResult<Option<i64>> {
    let text = cell(row, name);
    if text.trim().is_empty() {
        return Ok(None);
    }
    text.trim()
        .parse()
        .map(Some)
        .map_err(|_| RemoteError::Decode(format!("invalid `{name}` cell `{text}`")))
}

fn parse_bool_cell(row: &BTreeMap<String, String>, name: &str) -> RemoteResult<bool> {
    match cell(row, name).trim().to_ascii_lowercase().as_str() {
        "" | "false" | "0" => Ok(false),
        "true" | "1" => Ok(true),
        other => Err(RemoteError::Decode(format!(
            "invalid `{name}` cell `{other}`"
        ))),
    }
}
