//! Domain entities tracked by StudyTrack.
//!
//! # Responsibility
//! - Define the canonical records for each tracked entity kind.
//! - Provide the shared clock and due-window helpers used by derived state.
//!
//! # Invariants
//! - Every entity is identified by a stable string id, unique within its kind.
//! - Ids are immutable once created.

use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

pub mod app_config;
pub mod assignment;
pub mod exam;
pub mod project;

/// Milliseconds in one day.
pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Window for "due soon" derived state: two days.
pub const DUE_SOON_WINDOW_MS: i64 = 2 * DAY_MS;

/// Window for upcoming-item aggregation: one week.
pub const UPCOMING_WINDOW_MS: i64 = 7 * DAY_MS;

/// Returns the current wall-clock time as Unix epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as i64)
}

/// Generates a kind-prefixed, collision-resistant entity id.
///
/// The random 128-bit suffix replaces the epoch-millisecond tags used by
/// earlier builds, which could collide when two records were created within
/// the same millisecond.
pub(crate) fn generate_id(kind_prefix: &str) -> String {
    format!("{kind_prefix}_{}", Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::generate_id;
    use std::collections::HashSet;

    #[test]
    fn generated_ids_carry_prefix_and_are_unique() {
        let mut seen = HashSet::new();
        for _ in 0..100 {
            let id = generate_id("assignment");
            assert!(id.starts_with("assignment_"));
            assert!(seen.insert(id));
        }
    }
}
