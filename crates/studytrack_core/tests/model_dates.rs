use studytrack_core::model::DAY_MS;
use studytrack_core::{Assignment, Exam, Priority, Project};

const NOW: i64 = 1_750_000_000_000;

#[test]
fn assignment_due_in_three_days_is_due_later_not_soon() {
    let mut assignment = Assignment::new("Essay", "English");
    assignment.due_date = Some(NOW + 3 * DAY_MS);
    assignment.priority = Priority::High;

    assert!(!assignment.is_overdue_at(NOW));
    assert!(!assignment.is_due_soon_at(NOW));
}

#[test]
fn assignment_due_within_two_days_is_due_soon() {
    let mut assignment = Assignment::new("Essay", "English");
    assignment.due_date = Some(NOW + DAY_MS);

    assert!(!assignment.is_overdue_at(NOW));
    assert!(assignment.is_due_soon_at(NOW));
}

#[test]
fn assignment_becomes_overdue_after_due_date_passes() {
    let mut assignment = Assignment::new("Essay", "English");
    assignment.due_date = Some(NOW + 3 * DAY_MS);

    assert!(!assignment.is_overdue_at(NOW));
    assert!(assignment.is_overdue_at(NOW + 4 * DAY_MS));
}

#[test]
fn assignment_without_due_date_is_never_flagged() {
    let assignment = Assignment::new("Reading", "History");

    assert!(!assignment.is_overdue_at(NOW));
    assert!(!assignment.is_due_soon_at(NOW));
}

#[test]
fn priority_round_trips_through_lowercase_form() {
    for priority in [Priority::Low, Priority::Medium, Priority::High] {
        assert_eq!(Priority::parse(priority.as_str()), Some(priority));
    }
    assert_eq!(Priority::parse("urgent"), None);
    assert_eq!(Priority::default(), Priority::Medium);
}

#[test]
fn exam_date_partitions_past_and_upcoming() {
    let mut exam = Exam::new("Midterm", "Math");
    exam.exam_date = Some(NOW + 5 * DAY_MS);

    assert!(!exam.is_past_at(NOW));
    assert!(exam.is_upcoming_at(NOW));
    assert_eq!(exam.days_until_at(NOW), 5);

    assert!(exam.is_past_at(NOW + 6 * DAY_MS));
    assert!(!exam.is_upcoming_at(NOW + 6 * DAY_MS));
}

#[test]
fn exam_without_date_reports_minus_one_days() {
    let exam = Exam::new("Quiz", "Math");
    assert_eq!(exam.days_until_at(NOW), -1);
    assert!(!exam.is_past_at(NOW));
    assert!(!exam.is_upcoming_at(NOW));
}

#[test]
fn completed_project_is_closed_but_not_overdue() {
    let mut project = Project::new("Robot", "Physics");
    project.due_date = Some(NOW - DAY_MS);
    project.completed = true;

    assert!(!project.is_overdue_at(NOW));
    assert!(project.is_closed_at(NOW));
}

#[test]
fn open_project_past_due_is_overdue_and_closed() {
    let mut project = Project::new("Robot", "Physics");
    project.due_date = Some(NOW - DAY_MS);

    assert!(project.is_overdue_at(NOW));
    assert!(project.is_closed_at(NOW));
    assert!(!project.is_due_soon_at(NOW));
}

#[test]
fn project_clamp_progress_bounds_input() {
    assert_eq!(Project::clamp_progress(150), 100);
    assert_eq!(Project::clamp_progress(-5), 0);
    assert_eq!(Project::clamp_progress(42), 42);
}

#[test]
fn entity_constructors_assign_kind_prefixed_ids() {
    assert!(Assignment::new("a", "s").id.starts_with("assignment_"));
    assert!(Exam::new("e", "s").id.starts_with("exam_"));
    assert!(Project::new("p", "s").id.starts_with("project_"));
}
