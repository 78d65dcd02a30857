//! Project domain model.
//!
//! # Invariants
//! - `progress` stays within 0..=100.
//! - `completed == true` implying `progress == 100` is enforced by the
//!   completion toggle, not by this type; the two may diverge between updates.

use super::{generate_id, now_epoch_ms, DUE_SOON_WINDOW_MS};
use serde::{Deserialize, Serialize};

/// Maximum value for `Project::progress`.
pub const MAX_PROGRESS: u8 = 100;

/// A longer-running piece of work with start/due dates and percent progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Stable kind-prefixed id, assigned at creation.
    pub id: String,
    pub title: String,
    pub description: String,
    /// Unix epoch milliseconds.
    pub start_date: Option<i64>,
    /// Unix epoch milliseconds.
    pub due_date: Option<i64>,
    pub subject: String,
    /// Completion percentage, 0..=100.
    pub progress: u8,
    pub completed: bool,
}

impl Project {
    /// Creates a new project with a generated stable id.
    pub fn new(title: impl Into<String>, subject: impl Into<String>) -> Self {
        Self::with_id(generate_id("project"), title, subject)
    }

    /// Creates a project with a caller-provided stable id.
    pub fn with_id(
        id: impl Into<String>,
        title: impl Into<String>,
        subject: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            start_date: None,
            due_date: None,
            subject: subject.into(),
            progress: 0,
            completed: false,
        }
    }

    /// Generates a fresh kind-prefixed id for this entity kind.
    pub fn generate_id() -> String {
        generate_id("project")
    }

    /// Clamps an arbitrary progress value into 0..=100.
    pub fn clamp_progress(progress: i32) -> u8 {
        progress.clamp(0, i32::from(MAX_PROGRESS)) as u8
    }

    /// Whether the project is open and past its due date at `now_ms`.
    pub fn is_overdue_at(&self, now_ms: i64) -> bool {
        !self.completed && self.due_date.is_some_and(|due| due < now_ms)
    }

    /// Whether the due date falls inside the two-day warning window at `now_ms`.
    pub fn is_due_soon_at(&self, now_ms: i64) -> bool {
        self.due_date
            .is_some_and(|due| due >= now_ms && due <= now_ms + DUE_SOON_WINDOW_MS)
    }

    /// Whether the project is finished or past its due date at `now_ms`.
    pub fn is_closed_at(&self, now_ms: i64) -> bool {
        self.completed || self.due_date.is_some_and(|due| due < now_ms)
    }

    /// `is_overdue_at` evaluated against the system clock.
    pub fn is_overdue(&self) -> bool {
        self.is_overdue_at(now_epoch_ms())
    }

    /// `is_due_soon_at` evaluated against the system clock.
    pub fn is_due_soon(&self) -> bool {
        self.is_due_soon_at(now_epoch_ms())
    }

    /// `is_closed_at` evaluated against the system clock.
    pub fn is_closed(&self) -> bool {
        self.is_closed_at(now_epoch_ms())
    }
}
