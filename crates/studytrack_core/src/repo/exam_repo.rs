//! Exam repository.

use super::state::StateCell;
use crate::model::exam::Exam;
use crate::remote::client::SheetsClient;
use crate::remote::rows::{exam_to_row, EXAMS_SHEET};
use crate::store::exam_store::ExamStore;
use log::{error, warn};
use std::sync::Arc;
use tokio::sync::watch;

/// Shared repository for the exam entity kind.
pub struct ExamRepository {
    store: Arc<dyn ExamStore>,
    remote: Arc<SheetsClient>,
    items: StateCell<Vec<Exam>>,
    selected: StateCell<Option<Exam>>,
    is_loading: StateCell<bool>,
    error: StateCell<Option<String>>,
}

impl ExamRepository {
    pub fn new(store: Arc<dyn ExamStore>, remote: Arc<SheetsClient>) -> Self {
        Self {
            store,
            remote,
            items: StateCell::new(Vec::new()),
            selected: StateCell::new(None),
            is_loading: StateCell::new(false),
            error: StateCell::new(None),
        }
    }

    pub fn subscribe_items(&self) -> watch::Receiver<Vec<Exam>> {
        self.items.subscribe()
    }

    pub fn current_items(&self) -> Vec<Exam> {
        self.items.get()
    }

    pub fn subscribe_selected(&self) -> watch::Receiver<Option<Exam>> {
        self.selected.subscribe()
    }

    pub fn current_selected(&self) -> Option<Exam> {
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
    pub async fn load(&self) -> Vec<Exam> {
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
    pub async fn refresh(&self) -> Vec<Exam> {
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
    pub async fn get_by_id(&self, id: &str) -> Option<Exam> {
        match self.store.get(id).await {
            Ok(item) => item,
            Err(err) => {
                warn!("event=exam_get module=exam_repo status=error error={err}");
                None
            }
        }
    }

    /// Persists a new exam, assigning a fresh id when the caller left it
    /// blank.
    pub async fn create(&self, mut exam: Exam) -> Option<Exam> {
        self.begin_action();
        if exam.id.trim().is_empty() {
            exam.id = Exam::generate_id();
        }
        let created = match self.store.upsert(&exam).await {
            Ok(()) => {
                self.republish().await;
                self.push_insert(&exam).await;
                Some(exam)
            }
            Err(err) => {
                self.fail("create", err.to_string());
                None
            }
        };
        self.is_loading.set(false);
        created
    }

    /// Persists the exam keyed by its existing id (full replace).
    pub async fn update(&self, exam: Exam) -> Option<Exam> {
        self.begin_action();
        let updated = match self.store.upsert(&exam).await {
            Ok(()) => {
                self.republish().await;
                self.push_update(&exam).await;
                Some(exam)
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

    /// Read-modify-write flip of the preparation flag.
    ///
    /// Fails with a not-found error when the id does not resolve.
    pub async fn toggle_preparation(&self, id: &str) -> bool {
        self.begin_action();
        let toggled = match self.store.get(id).await {
            Ok(Some(mut exam)) => {
                exam.preparation_done = !exam.preparation_done;
                match self.store.upsert(&exam).await {
                    Ok(()) => {
                        self.republish().await;
                        self.push_update(&exam).await;
                        true
                    }
                    Err(err) => {
                        self.fail("toggle_preparation", err.to_string());
                        false
                    }
                }
            }
            Ok(None) => {
                self.fail("toggle_preparation", format!("exam not found: {id}"));
                false
            }
            Err(err) => {
                self.fail("toggle_preparation", err.to_string());
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
        error!("event=exam_{action} module=exam_repo status=error error={message}");
        self.error.set(Some(message));
    }

    async fn republish(&self) {
        match self.store.list().await {
            Ok(items) => self.items.set(items),
            Err(err) => warn!("event=exam_republish module=exam_repo status=error error={err}"),
        }
    }

    async fn push_insert(&self, exam: &Exam) {
        if !self.remote.is_configured() {
            return;
        }
        if let Err(err) = self.remote.insert(EXAMS_SHEET, exam_to_row(exam)).await {
            warn!("event=remote_push module=exam_repo status=error action=insert error={err}");
        }
    }

    async fn push_update(&self, exam: &Exam) {
        if !self.remote.is_configured() {
            return;
        }
        if let Err(err) = self
            .remote
            .update(EXAMS_SHEET, &exam.id, exam_to_row(exam))
            .await
        {
            warn!("event=remote_push module=exam_repo status=error action=update error={err}");
        }
    }

    async fn push_delete(&self, id: &str) {
        if !self.remote.is_configured() {
            return;
        }
        if let Err(err) = self.remote.delete(EXAMS_SHEET, id).await {
            warn!("event=remote_push module=exam_repo status=error action=delete error={err}");
        }
    }
}
