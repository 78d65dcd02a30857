//! Observable state cell shared by repositories and their observers.

use tokio::sync::watch;

/// Push-based observable value over `tokio::sync::watch`.
///
/// The owning repository holds the sender side for its whole lifetime, so
/// observers can attach and detach freely without affecting the underlying
/// channel. Every `set` is pushed to all attached receivers; a receiver that
/// attaches later starts from the current value.
pub struct StateCell<T> {
    tx: watch::Sender<T>,
}

impl<T: Clone> StateCell<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Publishes a new value to all observers.
    ///
    /// Works even while no observer is attached.
    pub fn set(&self, value: T) {
        let _ = self.tx.send_replace(value);
    }

    /// Returns a clone of the current value.
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Attaches a new observer starting from the current value.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::StateCell;

    #[tokio::test]
    async fn observers_see_updates_pushed_after_attach() {
        let cell = StateCell::new(0);
        let mut observer = cell.subscribe();
        assert_eq!(*observer.borrow(), 0);

        cell.set(7);
        observer.changed().await.expect("sender should be alive");
        assert_eq!(*observer.borrow(), 7);
    }

    #[test]
    fn set_without_observers_still_updates_current_value() {
        let cell = StateCell::new("initial".to_string());
        cell.set("updated".to_string());
        assert_eq!(cell.get(), "updated");
    }
}
