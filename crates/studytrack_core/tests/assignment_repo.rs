use std::collections::HashSet;
use studytrack_core::model::DAY_MS;
use studytrack_core::store::assignment_store::{AssignmentListQuery, AssignmentStore};
use studytrack_core::{App, Assignment, Priority};

fn draft(title: &str) -> Assignment {
    let mut assignment = Assignment::with_id("", title, "Math");
    assignment.priority = Priority::High;
    assignment
}

#[tokio::test]
async fn create_assigns_fresh_id_when_blank_and_persists() {
    let app = App::open_in_memory().await.unwrap();

    let created = app.assignments.create(draft("Essay")).await.unwrap();
    assert!(!created.id.trim().is_empty());
    assert!(created.id.starts_with("assignment_"));

    let loaded = app.assignments.get_by_id(&created.id).await.unwrap();
    assert_eq!(loaded.title, "Essay");
    assert_eq!(loaded.priority, Priority::High);
    assert!(app.assignments.current_error().is_none());
    assert!(!app.assignments.is_loading());
}

#[tokio::test]
async fn create_keeps_caller_provided_id() {
    let app = App::open_in_memory().await.unwrap();

    let assignment = Assignment::with_id("assignment_fixed", "Essay", "Math");
    let created = app.assignments.create(assignment).await.unwrap();
    assert_eq!(created.id, "assignment_fixed");
}

#[tokio::test]
async fn generated_ids_are_unique_across_creates() {
    let app = App::open_in_memory().await.unwrap();

    let mut ids = HashSet::new();
    for index in 0..20 {
        let created = app
            .assignments
            .create(draft(&format!("task {index}")))
            .await
            .unwrap();
        assert!(ids.insert(created.id));
    }
}

#[tokio::test]
async fn concurrent_creates_receive_distinct_ids() {
    let app = App::open_in_memory().await.unwrap();

    let (first, second) = tokio::join!(
        app.assignments.create(draft("first")),
        app.assignments.create(draft("second")),
    );

    let first = first.unwrap();
    let second = second.unwrap();
    assert_ne!(first.id, second.id);
    assert_eq!(app.assignments.load().await.len(), 2);
}

#[tokio::test]
async fn update_is_upsert_for_unknown_ids() {
    let app = App::open_in_memory().await.unwrap();

    let mut assignment = Assignment::with_id("assignment_never_created", "Draft", "Math");
    assignment.description = "inserted via update".to_string();
    app.assignments.update(assignment).await.unwrap();

    let loaded = app
        .assignments
        .get_by_id("assignment_never_created")
        .await
        .unwrap();
    assert_eq!(loaded.description, "inserted via update");
}

#[tokio::test]
async fn update_replaces_all_fields() {
    let app = App::open_in_memory().await.unwrap();
    let mut created = app.assignments.create(draft("Essay")).await.unwrap();

    created.title = "Essay v2".to_string();
    created.completed = true;
    created.due_date = Some(1_750_000_000_000 + DAY_MS);
    app.assignments.update(created.clone()).await.unwrap();

    let loaded = app.assignments.get_by_id(&created.id).await.unwrap();
    assert_eq!(loaded, created);
}

#[tokio::test]
async fn delete_is_idempotent() {
    let app = App::open_in_memory().await.unwrap();
    let created = app.assignments.create(draft("Essay")).await.unwrap();

    assert!(app.assignments.delete(&created.id).await);
    assert!(app.assignments.delete(&created.id).await);
    assert!(app.assignments.get_by_id(&created.id).await.is_none());
    assert!(app.assignments.current_error().is_none());
}

#[tokio::test]
async fn toggle_completion_flips_the_flag() {
    let app = App::open_in_memory().await.unwrap();
    let created = app.assignments.create(draft("Essay")).await.unwrap();
    assert!(!created.completed);

    assert!(app.assignments.toggle_completion(&created.id).await);
    assert!(app.assignments.get_by_id(&created.id).await.unwrap().completed);

    assert!(app.assignments.toggle_completion(&created.id).await);
    assert!(!app.assignments.get_by_id(&created.id).await.unwrap().completed);
}

#[tokio::test]
async fn toggle_completion_on_missing_id_records_error() {
    let app = App::open_in_memory().await.unwrap();

    let toggled = app.assignments.toggle_completion("assignment_missing").await;
    assert!(!toggled);

    let error = app.assignments.current_error().expect("error should be set");
    assert!(!error.is_empty());
    assert!(error.contains("assignment_missing"));
    assert!(!app.assignments.is_loading());
}

#[tokio::test]
async fn fresh_action_clears_previous_error() {
    let app = App::open_in_memory().await.unwrap();

    app.assignments.toggle_completion("assignment_missing").await;
    assert!(app.assignments.current_error().is_some());

    app.assignments.load().await;
    assert!(app.assignments.current_error().is_none());
}

#[tokio::test]
async fn select_publishes_item_and_absent_id_clears_selection() {
    let app = App::open_in_memory().await.unwrap();
    let created = app.assignments.create(draft("Essay")).await.unwrap();

    app.assignments.select(&created.id).await;
    assert_eq!(
        app.assignments.current_selected().map(|item| item.id),
        Some(created.id)
    );
    assert!(app.assignments.current_error().is_none());

    app.assignments.select("assignment_unknown").await;
    assert!(app.assignments.current_selected().is_none());
    assert!(app.assignments.current_error().is_none());

    app.assignments.clear_selection();
    assert!(app.assignments.current_selected().is_none());
}

#[tokio::test]
async fn observers_receive_collection_updates_after_mutations() {
    let app = App::open_in_memory().await.unwrap();
    let mut observer = app.assignments.subscribe_items();
    assert!(observer.borrow().is_empty());

    let created = app.assignments.create(draft("Essay")).await.unwrap();

    let seen = observer
        .wait_for(|items| items.iter().any(|item| item.id == created.id))
        .await
        .expect("repository should outlive the observer");
    assert_eq!(seen.len(), 1);
    drop(seen);

    app.assignments.delete(&created.id).await;
    let seen = observer
        .wait_for(|items| items.is_empty())
        .await
        .expect("repository should outlive the observer");
    assert!(seen.is_empty());
}

#[tokio::test]
async fn load_publishes_persisted_rows_sorted_by_due_date() {
    let app = App::open_in_memory().await.unwrap();

    let mut late = draft("late");
    late.due_date = Some(2_000_000_000_000);
    let mut early = draft("early");
    early.due_date = Some(1_000_000_000_000);
    app.assignments.create(late).await.unwrap();
    app.assignments.create(early).await.unwrap();

    let items = app.assignments.load().await;
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].title, "early");
    assert_eq!(items[1].title, "late");
    assert_eq!(app.assignments.refresh().await.len(), 2);
}

#[tokio::test]
async fn store_list_query_filters_by_completion() {
    use rusqlite::Connection;
    use std::sync::Arc;
    use studytrack_core::db::open_db_in_memory;
    use studytrack_core::store::assignment_store::SqliteAssignmentStore;
    use tokio::sync::Mutex;

    let conn: Arc<Mutex<Connection>> = Arc::new(Mutex::new(open_db_in_memory().unwrap()));
    let store = SqliteAssignmentStore::new(conn);

    let open_item = Assignment::new("open", "Math");
    let mut done_item = Assignment::new("done", "Math");
    done_item.completed = true;
    store.upsert(&open_item).await.unwrap();
    store.upsert(&done_item).await.unwrap();

    let incomplete = store
        .list(&AssignmentListQuery {
            completed: Some(false),
        })
        .await
        .unwrap();
    assert_eq!(incomplete.len(), 1);
    assert_eq!(incomplete[0].id, open_item.id);

    let completed = store
        .list(&AssignmentListQuery {
            completed: Some(true),
        })
        .await
        .unwrap();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].id, done_item.id);

    let all = store.list(&AssignmentListQuery::default()).await.unwrap();
    assert_eq!(all.len(), 2);
}
