//! Core domain logic for StudyTrack.
//! This crate is the single source of truth for business invariants.

pub mod app;
pub mod db;
pub mod logging;
pub mod model;
pub mod remote;
pub mod repo;
pub mod settings;
pub mod store;
pub mod usecase;

pub use app::{App, AppError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::app_config::{AppConfig, APP_CONFIG_ID};
pub use model::assignment::{Assignment, Priority};
pub use model::exam::Exam;
pub use model::project::Project;
pub use remote::client::SheetsClient;
pub use remote::config::SheetsConfig;
pub use remote::{RemoteError, RemoteResult};
pub use repo::app_config_repo::AppConfigRepository;
pub use repo::assignment_repo::AssignmentRepository;
pub use repo::exam_repo::ExamRepository;
pub use repo::project_repo::ProjectRepository;
pub use settings::{AppSettings, JsonFileSettings, MemorySettings, SettingsError};
pub use store::{AssignmentListQuery, StoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
