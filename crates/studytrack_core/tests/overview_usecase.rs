use studytrack_core::model::{now_epoch_ms, DAY_MS};
use studytrack_core::usecase::{
    dashboard_overview, mark_assignment_complete, upcoming_items_at,
};
use studytrack_core::{App, Assignment, Exam, Project};

#[tokio::test]
async fn dashboard_combines_all_three_collections() {
    let app = App::open_in_memory().await.unwrap();

    app.assignments
        .create(Assignment::with_id("", "Essay", "English"))
        .await
        .unwrap();
    app.exams
        .create(Exam::with_id("", "Final", "Math"))
        .await
        .unwrap();
    app.projects
        .create(Project::with_id("", "Robot", "Physics"))
        .await
        .unwrap();

    let overview = dashboard_overview(&app.assignments, &app.exams, &app.projects);
    assert_eq!(overview.assignments.len(), 1);
    assert_eq!(overview.exams.len(), 1);
    assert_eq!(overview.projects.len(), 1);
}

#[tokio::test]
async fn upcoming_window_excludes_done_far_and_past_items() {
    let app = App::open_in_memory().await.unwrap();
    let now = now_epoch_ms();

    let mut due_soon = Assignment::with_id("", "due soon", "English");
    due_soon.due_date = Some(now + 2 * DAY_MS);
    let mut far_out = Assignment::with_id("", "far out", "English");
    far_out.due_date = Some(now + 10 * DAY_MS);
    let mut already_done = Assignment::with_id("", "already done", "English");
    already_done.due_date = Some(now + 2 * DAY_MS);
    already_done.completed = true;
    let mut past_due = Assignment::with_id("", "past due", "English");
    past_due.due_date = Some(now - DAY_MS);
    for assignment in [due_soon, far_out, already_done, past_due] {
        app.assignments.create(assignment).await.unwrap();
    }

    let mut exam_this_week = Exam::with_id("", "this week", "Math");
    exam_this_week.exam_date = Some(now + 5 * DAY_MS);
    let mut exam_next_month = Exam::with_id("", "next month", "Math");
    exam_next_month.exam_date = Some(now + 30 * DAY_MS);
    app.exams.create(exam_this_week).await.unwrap();
    app.exams.create(exam_next_month).await.unwrap();

    let mut project_due = Project::with_id("", "due", "Physics");
    project_due.due_date = Some(now + 6 * DAY_MS);
    let mut project_done = Project::with_id("", "done", "Physics");
    project_done.due_date = Some(now + 6 * DAY_MS);
    project_done.completed = true;
    app.projects.create(project_due).await.unwrap();
    app.projects.create(project_done).await.unwrap();

    let upcoming = upcoming_items_at(now, &app.assignments, &app.exams, &app.projects);
    assert_eq!(upcoming.assignments.len(), 1);
    assert_eq!(upcoming.assignments[0].title, "due soon");
    assert_eq!(upcoming.exams.len(), 1);
    assert_eq!(upcoming.exams[0].title, "this week");
    assert_eq!(upcoming.projects.len(), 1);
    assert_eq!(upcoming.projects[0].title, "due");
}

#[tokio::test]
async fn mark_assignment_complete_persists_the_flag() {
    let app = App::open_in_memory().await.unwrap();
    let created = app
        .assignments
        .create(Assignment::with_id("", "Essay", "English"))
        .await
        .unwrap();

    let updated = mark_assignment_complete(&app.assignments, created.clone())
        .await
        .unwrap();
    assert!(updated.completed);

    let loaded = app.assignments.get_by_id(&created.id).await.unwrap();
    assert!(loaded.completed);
}
