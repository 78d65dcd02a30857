use studytrack_core::{App, Project};

fn draft(title: &str) -> Project {
    Project::with_id("", title, "Physics")
}

#[tokio::test]
async fn create_assigns_fresh_id_and_persists() {
    let app = App::open_in_memory().await.unwrap();

    let created = app.projects.create(draft("Robot")).await.unwrap();
    assert!(created.id.starts_with("project_"));
    assert_eq!(created.progress, 0);
    assert!(!created.completed);
}

#[tokio::test]
async fn update_progress_clamps_high_values_and_completes() {
    let app = App::open_in_memory().await.unwrap();
    let created = app.projects.create(draft("Robot")).await.unwrap();

    assert!(app.projects.update_progress(&created.id, 150).await);

    let loaded = app.projects.get_by_id(&created.id).await.unwrap();
    assert_eq!(loaded.progress, 100);
    assert!(loaded.completed);
}

#[tokio::test]
async fn update_progress_clamps_negative_values_to_zero() {
    let app = App::open_in_memory().await.unwrap();
    let created = app.projects.create(draft("Robot")).await.unwrap();

    assert!(app.projects.update_progress(&created.id, -5).await);

    let loaded = app.projects.get_by_id(&created.id).await.unwrap();
    assert_eq!(loaded.progress, 0);
    assert!(!loaded.completed);
}

#[tokio::test]
async fn partial_progress_does_not_uncomplete_a_project() {
    let app = App::open_in_memory().await.unwrap();
    let mut created = app.projects.create(draft("Robot")).await.unwrap();

    created.completed = true;
    created.progress = 40;
    app.projects.update(created.clone()).await.unwrap();

    assert!(app.projects.update_progress(&created.id, 60).await);
    let loaded = app.projects.get_by_id(&created.id).await.unwrap();
    assert_eq!(loaded.progress, 60);
    assert!(loaded.completed);
}

#[tokio::test]
async fn toggle_completion_forces_full_progress() {
    let app = App::open_in_memory().await.unwrap();
    let created = app.projects.create(draft("Robot")).await.unwrap();
    app.projects.update_progress(&created.id, 30).await;

    assert!(app.projects.toggle_completion(&created.id).await);
    let loaded = app.projects.get_by_id(&created.id).await.unwrap();
    assert!(loaded.completed);
    assert_eq!(loaded.progress, 100);

    // Toggling back reopens the project but keeps the recorded progress.
    assert!(app.projects.toggle_completion(&created.id).await);
    let loaded = app.projects.get_by_id(&created.id).await.unwrap();
    assert!(!loaded.completed);
    assert_eq!(loaded.progress, 100);
}

#[tokio::test]
async fn progress_actions_on_missing_id_record_errors() {
    let app = App::open_in_memory().await.unwrap();

    assert!(!app.projects.update_progress("project_missing", 50).await);
    let error = app.projects.current_error().expect("error should be set");
    assert!(error.contains("project_missing"));
    assert!(!app.projects.is_loading());

    assert!(!app.projects.toggle_completion("project_missing").await);
    assert!(app.projects.current_error().is_some());
}

#[tokio::test]
async fn delete_is_idempotent() {
    let app = App::open_in_memory().await.unwrap();
    let created = app.projects.create(draft("Robot")).await.unwrap();

    assert!(app.projects.delete(&created.id).await);
    assert!(app.projects.delete(&created.id).await);
    assert!(app.projects.get_by_id(&created.id).await.is_none());
}

#[tokio::test]
async fn update_is_upsert_for_unknown_ids() {
    let app = App::open_in_memory().await.unwrap();

    let mut project = Project::with_id("project_preexisting", "Imported", "Physics");
    project.progress = 75;
    app.projects.update(project).await.unwrap();

    let loaded = app.projects.get_by_id("project_preexisting").await.unwrap();
    assert_eq!(loaded.progress, 75);
}
