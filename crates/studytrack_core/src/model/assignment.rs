//! Assignment domain model.
//!
//! # Invariants
//! - `id` is stable and never reused for another assignment.
//! - Derived date state is computed against a caller-supplied clock so it can
//!   be evaluated deterministically.

use super::{generate_id, now_epoch_ms, DUE_SOON_WINDOW_MS};
use serde::{Deserialize, Serialize};

/// Urgency bucket for an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Returns the lowercase wire/storage form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parses the lowercase wire/storage form.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// A graded piece of coursework with an optional due date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Stable kind-prefixed id, assigned at creation.
    pub id: String,
    pub title: String,
    pub description: String,
    /// Unix epoch milliseconds.
    pub due_date: Option<i64>,
    pub subject: String,
    pub completed: bool,
    pub priority: Priority,
}

impl Assignment {
    /// Creates a new assignment with a generated stable id.
    pub fn new(title: impl Into<String>, subject: impl Into<String>) -> Self {
        Self::with_id(generate_id("assignment"), title, subject)
    }

    /// Creates an assignment with a caller-provided stable id.
    ///
    /// Used by sync/import paths where identity already exists externally.
    pub fn with_id(
        id: impl Into<String>,
        title: impl Into<String>,
        subject: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            due_date: None,
            subject: subject.into(),
            completed: false,
            priority: Priority::default(),
        }
    }

    /// Generates a fresh kind-prefixed id for this entity kind.
    pub fn generate_id() -> String {
        generate_id("assignment")
    }

    /// Whether the due date has already passed at `now_ms`.
    pub fn is_overdue_at(&self, now_ms: i64) -> bool {
        self.due_date.is_some_and(|due| due < now_ms)
    }

    /// Whether the due date falls inside the two-day warning window at `now_ms`.
    pub fn is_due_soon_at(&self, now_ms: i64) -> bool {
        self.due_date
            .is_some_and(|due| due >= now_ms && due <= now_ms + DUE_SOON_WINDOW_MS)
    }

    /// `is_overdue_at` evaluated against the system clock.
    pub fn is_overdue(&self) -> bool {
        self.is_overdue_at(now_epoch_ms())
    }

    /// `is_due_soon_at` evaluated against the system clock.
    pub fn is_due_soon(&self) -> bool {
        self.is_due_soon_at(now_epoch_ms())
    }
}
