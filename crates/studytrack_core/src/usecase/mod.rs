//! Thin use-case layer.
//!
//! # Responsibility
//! - Compose repository calls into screen-facing entry points.
//! - Keep UI layers decoupled from repository wiring.
//!
//! Each function forwards to one repository method or combines the current
//! state of several repositories; no business rules live here.

pub mod overview;
pub mod sheet_url;

pub use overview::{
    dashboard_overview, upcoming_items, upcoming_items_at, DashboardOverview, UpcomingItems,
};
pub use sheet_url::{current_sheet_config, update_google_sheet_url, validate_sheet_url};

use crate::model::assignment::Assignment;
use crate::repo::assignment_repo::AssignmentRepository;

/// Marks one assignment as completed via a full-record update.
pub async fn mark_assignment_complete(
    repository: &AssignmentRepository,
    mut assignment: Assignment,
) -> Option<Assignment> {
    assignment.completed = true;
    repository.update(assignment).await
}
