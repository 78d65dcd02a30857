use studytrack_core::usecase::{current_sheet_config, update_google_sheet_url, validate_sheet_url};
use studytrack_core::{App, SheetsConfig};

const VALID_URL: &str = "https://script.google.com/macros/s/AKfycbwDeployment123/exec";

#[tokio::test]
async fn valid_url_updates_singleton_and_mirrors_into_settings() {
    let app = App::open_in_memory().await.unwrap();
    let sheets_config = SheetsConfig::new(app.settings.clone());
    assert!(!sheets_config.is_configured());

    assert!(update_google_sheet_url(&app.app_config, &sheets_config, VALID_URL).await);

    let config = current_sheet_config(&app.app_config)
        .await
        .expect("config should exist");
    assert_eq!(config.google_sheets_url, VALID_URL);
    assert_eq!(sheets_config.script_url(), VALID_URL);
    assert!(app.sheets.is_configured());
}

#[tokio::test]
async fn malformed_urls_are_rejected_without_touching_state() {
    let app = App::open_in_memory().await.unwrap();
    let sheets_config = SheetsConfig::new(app.settings.clone());

    assert!(!update_google_sheet_url(&app.app_config, &sheets_config, "not a url").await);
    assert!(
        !update_google_sheet_url(&app.app_config, &sheets_config, "https://example.com/exec")
            .await
    );

    assert!(current_sheet_config(&app.app_config).await.is_none());
    assert!(!sheets_config.is_configured());
}

#[tokio::test]
async fn ping_without_a_configured_endpoint_reports_unreachable() {
    let app = App::open_in_memory().await.unwrap();
    assert!(!validate_sheet_url(&app.sheets).await);
}
