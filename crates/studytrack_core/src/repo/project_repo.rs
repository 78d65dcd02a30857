//! Project repository.
//!
//! # Invariants
//! - Toggling a project to completed forces `progress = 100`.
//! - `update_progress` clamps into 0..=100 and marks the project completed
//!   only when progress reaches 100; it never un-completes on lower values.

use super::state::StateCell;
use crate::model::project::Project;
use crate::remote::client::SheetsClient;
use crate::remote::rows::{project_to_row, PROJECTS_SHEET};
use crate::store::project_store::ProjectStore;
use log::{error, warn};
use std::sync::Arc;
use tokio::sync::watch;

/// Shared repository for the project entity kind.
pub struct ProjectRepository {
    store: Arc<dyn ProjectStore>,
    remote: Arc<SheetsClient>,
    items: StateCell<Vec<Project>>,
    selected: StateCell<Option<Project>>,
    is_loading: StateCell<bool>,
    error: StateCell<Option<String>>,
}

impl ProjectRepository {
    pub fn new(store: Arc<dyn ProjectStore>, remote: Arc<SheetsClient>) -> Self {
        Self {
            store,
            remote,
            items: StateCell::new(Vec::new()),
            selected: StateCell::new(None),
            is_loading: StateCell::new(false),
            error: StateCell::new(None),
        }
    }

    pub fn subscribe_items(&self) -> watch::Receiver<Vec<Project>> {
        self.items.subscribe()
    }

    pub fn current_items(&self) -> Vec<Project> {
        self.items.get()
    }

    pub fn subscribe_selected(&self) -> watch::Receiver<Option<Project>> {
        self.selected.subscribe()
    }

    pub fn current_selected(&self) -> Option<Project> {
        self.selected.get()
    }

    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.is_loading.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading.get()
    }

    pub fn subscribe_error(&self) -> watch::Receiver<Option<String>> {
        self.error.subscribe()
    }

    pub fn current_error(&self) -> Option<String> {
        self.error.get()
    }

    pub fn clear_error(&self) {
        self.error.set(None);
    }

    /// Loads the collection from the store and publishes it.
    pub async fn load(&self) -> Vec<Project> {
        self.begin_action();
        let items = match self.store.list().await {
            Ok(items) => {
                self.items.set(items.clone());
                items
            }
            Err(err) => {
                self.fail("load", err.to_string());
                Vec::new()
            }
        };
        self.is_loading.set(false);
        items
    }

    /// Alias of [`load`](Self::load).
    pub async fn refresh(&self) -> Vec<Project> {
        self.load().await
    }

    /// Publishes the item with the given id as the current selection.
    pub async fn select(&self, id: &str) {
        self.begin_action();
        match self.store.get(id).await {
            Ok(item) => self.selected.set(item),
            Err(err) => self.fail("select", err.to_string()),
        }
        self.is_loading.set(false);
    }

    /// Clears the selection. No I/O.
    pub fn clear_selection(&self) {
        self.selected.set(None);
    }

    /// Single lookup by id. Does not mutate shared state.
    pub async fn get_by_id(&self, id: &str) -> Option<Project> {
        match self.store.get(id).await {
            Ok(item) => item,
            Err(err) => {
                warn!("event=project_get module=project_repo status=error error={err}");
                None
            }
        }
    }

    /// Persists a new project, assigning a fresh id when the caller left it
    /// blank.
    pub async fn create(&self, mut project: Project) -> Option<Project> {
        self.begin_action();
        if project.id.trim().is_empty() {
            project.id = Project::generate_id();
        }
        let created = match self.store.upsert(&project).await {
            Ok(()) => {
                self.republish().await;
                self.push_insert(&project).await;
                Some(project)
            }
            Err(err) => {
                self.fail("create", err.to_string());
                None
            }
        };
        self.is_loading.set(false);
        created
    }

    /// Persists the project keyed by its existing id (full replace).
    pub async fn update(&self, project: Project) -> Option<Project> {
        self.begin_action();
        let updated = match self.store.upsert(&project).await {
            Ok(()) => {
                self.republish().await;
                self.push_update(&project).await;
                Some(project)
            }
            Err(err) => {
                self.fail("update", err.to_string());
                None
            }
        };
        self.is_loading.set(false);
        updated
    }

    /// Removes the record. Deleting a non-existent id succeeds.
    pub async fn delete(&self, id: &str) -> bool {
        self.begin_action();
        let deleted = match self.store.delete(id).await {
            Ok(()) => {
                self.republish().await;
                self.push_delete(id).await;
                true
            }
            Err(err) => {
                self.fail("delete", err.to_string());
                false
            }
        };
        self.is_loading.set(false);
        deleted
    }

    /// Read-modify-write flip of the completion flag.
    ///
    /// Toggling to completed forces `progress = 100`; toggling back leaves
    /// progress untouched.
    pub async fn toggle_completion(&self, id: &str) -> bool {
        self.begin_action();
        let toggled = match self.store.get(id).await {
            Ok(Some(mut project)) => {
                project.completed = !project.completed;
                if project.completed {
                    project.progress = 100;
                }
                match self.store.upsert(&project).await {
                    Ok(()) => {
                        self.republish().await;
                        self.push_update(&project).await;
                        true
                    }
                    Err(err) => {
                        self.fail("toggle_completion", err.to_string());
                        false
                    }
                }
            }
            Ok(None) => {
                self.fail("toggle_completion", format!("project not found: {id}"));
                false
            }
            Err(err) => {
                self.fail("toggle_completion", err.to_string());
                false
            }
        };
        self.is_loading.set(false);
        toggled
    }

    /// Clamps `progress` into 0..=100 and persists it.
    ///
    /// Reaching 100 marks the project completed.
    pub async fn update_progress(&self, id: &str, progress: i32) -> bool {
        self.begin_action();
        let clamped = Project::clamp_progress(progress);
        let updated = match self.store.get(id).await {
            Ok(Some(mut project)) => {
                project.progress = clamped;
                if clamped == 100 {
                    project.completed = true;
                }
                match self.store.upsert(&project).await {
                    Ok(()) => {
                        self.republish().await;
                        self.push_update(&project).await;
                        true
                    }
                    Err(err) => {
                        self.fail("update_progress", err.to_string());
                        false
                    }
                }
            }
            Ok(None) => {
                self.fail("update_progress", format!("project not found: {id}"));
                false
            }
            Err(err) => {
                self.fail("update_progress", err.to_string());
                false
            }
        };
        self.is_loading.set(false);
        updated
    }

    fn begin_action(&self) {
        self.is_loading.set(true);
        self.error.set(None);
    }

    fn fail(&self, action: &str, message: String) {
        error!("event=project_{action} module=project_repo status=error error={message}");
        self.error.set(Some(message));
    }

    async fn republish(&self) {
        match self.store.list().await {
            Ok(items) => self.items.set(items),
            Err(err) => {
                warn!("event=project_republish module=project_repo status=error error={err}")
            }
        }
    }

    async fn push_insert(&self, project: &Project) {
        if !self.remote.is_configured() {
            return;
        }
        if let Err(err) = self
            .remote
            .insert(PROJECTS_SHEET, project_to_row(project))
            .await
        {
            warn!("event=remote_push module=project_repo status=error action=insert error={err}");
        }
    }

    async fn push_update(&self, project: &Project) {
        if !self.remote.is_configured() {
            return;
        }
        if let Err(err) = self
            .remote
            .update(PROJECTS_SHEET, &project.id, project_to_row(project))
            .await
        {
            warn!("event=remote_push module=project_repo status=error action=update error={err}");
        }
    }

    async fn push_delete(&self, id: &str) {
        if !self.remote.is_configured() {
            return;
        }
        if let Err(err) = self.remote.delete(PROJECTS_SHEET, id).await {
            warn!("event=remote_push module=project_repo status=error action=delete error={err}");
        }
    }
}
