//! Assignment repository.
//!
//! # Responsibility
//! - Single source of truth for assignment state observed by all screens.
//! - Apply optimistic local writes, then push to the remote best-effort.

use super::state::StateCell;
use crate::model::assignment::Assignment;
use crate::remote::client::SheetsClient;
use crate::remote::rows::{assignment_to_row, ASSIGNMENTS_SHEET};
use crate::store::assignment_store::{AssignmentListQuery, AssignmentStore};
use log::{error, warn};
use std::sync::Arc;
use tokio::sync::watch;

/// Shared repository for the assignment entity kind.
///
/// Constructed once at process start and handed out as an `Arc`; every
/// observer shares the same state cells.
pub struct AssignmentRepository {
    store: Arc<dyn AssignmentStore>,
    remote: Arc<SheetsClient>,
    items: StateCell<Vec<Assignment>>,
    selected: StateCell<Option<Assignment>>,
    is_loading: StateCell<bool>,
    error: StateCell<Option<String>>,
}

impl AssignmentRepository {
    pub fn new(store: Arc<dyn AssignmentStore>, remote: Arc<SheetsClient>) -> Self {
        Self {
            store,
            remote,
            items: StateCell::new(Vec::new()),
            selected: StateCell::new(None),
            is_loading: StateCell::new(false),
            error: StateCell::new(None),
        }
    }

    /// Attaches an observer to the full assignment collection.
    pub fn subscribe_items(&self) -> watch::Receiver<Vec<Assignment>> {
        self.items.subscribe()
    }

    /// Returns the currently published collection.
    pub fn current_items(&self) -> Vec<Assignment> {
        self.items.get()
    }

    /// Attaches an observer to the current selection.
    pub fn subscribe_selected(&self) -> watch::Receiver<Option<Assignment>> {
        self.selected.subscribe()
    }

    pub fn current_selected(&self) -> Option<Assignment> {
        self.selected.get()
    }

    /// Attaches an observer to the loading flag.
    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.is_loading.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading.get()
    }

    /// Attaches an observer to the error message.
    pub fn subscribe_error(&self) -> watch::Receiver<Option<String>> {
        self.error.subscribe()
    }

    pub fn current_error(&self) -> Option<String> {
        self.error.get()
    }

    /// Clears the error state without touching anything else.
    pub fn clear_error(&self) {
        self.error.set(None);
    }

    /// Loads the collection from the store and publishes it.
    ///
    /// Returns the loaded collection; on failure records `error` and returns
    /// an empty collection.
    pub async fn load(&self) -> Vec<Assignment> {
        self.begin_action();
        let items = match self.store.list(&AssignmentListQuery::default()).await {
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

    /// Alias of [`load`](Self::load); remote reconciliation is a documented
    /// integration gap.
    pub async fn refresh(&self) -> Vec<Assignment> {
        self.load().await
    }

    /// Publishes the item with the given id as the current selection.
    ///
    /// An unknown id yields an empty selection, not an error.
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
    pub async fn get_by_id(&self, id: &str) -> Option<Assignment> {
        match self.store.get(id).await {
            Ok(item) => item,
            Err(err) => {
                warn!("event=assignment_get module=assignment_repo status=error error={err}");
                None
            }
        }
    }

    /// Persists a new assignment, assigning a fresh id when the caller left
    /// it blank. Returns the persisted record.
    pub async fn create(&self, mut assignment: Assignment) -> Option<Assignment> {
        self.begin_action();
        if assignment.id.trim().is_empty() {
            assignment.id = Assignment::generate_id();
        }
        let created = match self.store.upsert(&assignment).await {
            Ok(()) => {
                self.republish().await;
                self.push_insert(&assignment).await;
                Some(assignment)
            }
            Err(err) => {
                self.fail("create", err.to_string());
                None
            }
        };
        self.is_loading.set(false);
        created
    }

    /// Persists the assignment keyed by its existing id (full replace).
    pub async fn update(&self, assignment: Assignment) -> Option<Assignment> {
        self.begin_action();
        let updated = match self.store.upsert(&assignment).await {
            Ok(()) => {
                self.republish().await;
                self.push_update(&assignment).await;
                Some(assignment)
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
    /// Fails with a not-found error when the id does not resolve.
    pub async fn toggle_completion(&self, id: &str) -> bool {
        self.begin_action();
        let toggled = match self.store.get(id).await {
            Ok(Some(mut assignment)) => {
                assignment.completed = !assignment.completed;
                match self.store.upsert(&assignment).await {
                    Ok(()) => {
                        self.republish().await;
                        self.push_update(&assignment).await;
                        true
                    }
                    Err(err) => {
                        self.fail("toggle_completion", err.to_string());
                        false
                    }
                }
            }
            Ok(None) => {
                self.fail("toggle_completion", format!("assignment not found: {id}"));
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

    fn begin_action(&self) {
        self.is_loading.set(true);
        self.error.set(None);
    }

    fn fail(&self, action: &str, message: String) {
        error!("event=assignment_{action} module=assignment_repo status=error error={message}");
        self.error.set(Some(message));
    }

    /// Re-reads the collection from the store and pushes it to observers.
    ///
    /// The mutation already succeeded when this runs, so a failed re-read is
    /// logged and the previous published collection stays in place.
    async fn republish(&self) {
        match self.store.list(&AssignmentListQuery::default()).await {
            Ok(items) => self.items.set(items),
            Err(err) => {
                warn!("event=assignment_republish module=assignment_repo status=error error={err}")
            }
        }
    }

    async fn push_insert(&self, assignment: &Assignment) {
        if !self.remote.is_configured() {
            return;
        }
        if let Err(err) = self
            .remote
            .insert(ASSIGNMENTS_SHEET, assignment_to_row(assignment))
            .await
        {
            warn!("event=remote_push module=assignment_repo status=error action=insert error={err}");
        }
    }

    async fn push_update(&self, assignment: &Assignment) {
        if !self.remote.is_configured() {
            return;
        }
        if let Err(err) = self
            .remote
            .update(
                ASSIGNMENTS_SHEET,
                &assignment.id,
                assignment_to_row(assignment),
            )
            .await
        {
            warn!("event=remote_push module=assignment_repo status=error action=update error={err}");
        }
    }

    async fn push_delete(&self, id: &str) {
        if !self.remote.is_configured() {
            return;
        }
        if let Err(err) = self.remote.delete(ASSIGNMENTS_SHEET, id).await {
            warn!("event=remote_push module=assignment_repo status=error action=delete error={err}");
        }
    }
}
