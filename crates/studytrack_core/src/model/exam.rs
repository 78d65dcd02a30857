//! Exam domain model.

use super::{generate_id, now_epoch_ms, DAY_MS};
use serde::{Deserialize, Serialize};

/// A scheduled exam with a preparation flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exam {
    /// Stable kind-prefixed id, assigned at creation.
    pub id: String,
    pub title: String,
    pub subject: String,
    /// Unix epoch milliseconds.
    pub exam_date: Option<i64>,
    pub description: String,
    pub preparation_done: bool,
}

impl Exam {
    /// Creates a new exam with a generated stable id.
    pub fn new(title: impl Into<String>, subject: impl Into<String>) -> Self {
        Self::with_id(generate_id("exam"), title, subject)
    }

    /// Creates an exam with a caller-provided stable id.
    pub fn with_id(
        id: impl Into<String>,
        title: impl Into<String>,
        subject: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            subject: subject.into(),
            exam_date: None,
            description: String::new(),
            preparation_done: false,
        }
    }

    /// Generates a fresh kind-prefixed id for this entity kind.
    pub fn generate_id() -> String {
        generate_id("exam")
    }

    /// Whether the exam date has already passed at `now_ms`.
    pub fn is_past_at(&self, now_ms: i64) -> bool {
        self.exam_date.is_some_and(|date| date < now_ms)
    }

    /// Whether the exam date is at or after `now_ms`.
    pub fn is_upcoming_at(&self, now_ms: i64) -> bool {
        self.exam_date.is_some_and(|date| date >= now_ms)
    }

    /// Whole days between `now_ms` and the exam date, truncated toward zero.
    ///
    /// Returns -1 when no exam date is set.
    pub fn days_until_at(&self, now_ms: i64) -> i64 {
        match self.exam_date {
            Some(date) => (date - now_ms) / DAY_MS,
            None => -1,
        }
    }

    /// `is_past_at` evaluated against the system clock.
    pub fn is_past(&self) -> bool {
        self.is_past_at(now_epoch_ms())
    }

    /// `is_upcoming_at` evaluated against the system clock.
    pub fn is_upcoming(&self) -> bool {
        self.is_upcoming_at(now_epoch_ms())
    }

    /// `days_until_at` evaluated against the system clock.
    pub fn days_until(&self) -> i64 {
        self.days_until_at(now_epoch_ms())
    }
}
