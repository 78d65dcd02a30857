//! Cross-repository aggregation for dashboard-style screens.

use crate::model::assignment::Assignment;
use crate::model::exam::Exam;
use crate::model::project::Project;
use crate::model::{now_epoch_ms, UPCOMING_WINDOW_MS};
use crate::repo::assignment_repo::AssignmentRepository;
use crate::repo::exam_repo::ExamRepository;
use crate::repo::project_repo::ProjectRepository;

/// Snapshot of all three collections as currently published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardOverview {
    pub assignments: Vec<Assignment>,
    pub exams: Vec<Exam>,
    pub projects: Vec<Project>,
}

/// Items due within the next week, excluding already-completed work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingItems {
    pub assignments: Vec<Assignment>,
    pub exams: Vec<Exam>,
    pub projects: Vec<Project>,
}

/// Combines the current state of all three entity repositories.
pub fn dashboard_overview(
    assignments: &AssignmentRepository,
    exams: &ExamRepository,
    projects: &ProjectRepository,
) -> DashboardOverview {
    DashboardOverview {
        assignments: assignments.current_items(),
        exams: exams.current_items(),
        projects: projects.current_items(),
    }
}

/// Filters the current collections down to the one-week upcoming window.
pub fn upcoming_items(
    assignments: &AssignmentRepository,
    exams: &ExamRepository,
    projects: &ProjectRepository,
) -> UpcomingItems {
    upcoming_items_at(now_epoch_ms(), assignments, exams, projects)
}

/// `upcoming_items` evaluated against an explicit clock.
pub fn upcoming_items_at(
    now_ms: i64,
    assignments: &AssignmentRepository,
    exams: &ExamRepository,
    projects: &ProjectRepository,
) -> UpcomingItems {
    let horizon = now_ms + UPCOMING_WINDOW_MS;

    let assignments = assignments
        .current_items()
        .into_iter()
        .filter(|item| {
            !item.completed
                && item
                    .due_date
                    .is_some_and(|due| due >= now_ms && due <= horizon)
        })
        .collect();

    let exams = exams
        .current_items()
        .into_iter()
        .filter(|item| {
            item.exam_date
                .is_some_and(|date| date >= now_ms && date <= horizon)
        })
        .collect();

    let projects = projects
        .current_items()
        .into_iter()
        .filter(|item| {
            !item.completed
                && item
                    .due_date
                    .is_some_and(|due| due >= now_ms && due <= horizon)
        })
        .collect();

    UpcomingItems {
        assignments,
        exams,
        projects,
    }
}
