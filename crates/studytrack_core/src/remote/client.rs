//! Reqwest-backed Apps Script client.
//!
//! This adapter owns transport details only: request serialization, timeout
//! and HTTP error mapping, and JSON decoding into wire shapes. The endpoint
//! URL is re-read from configuration on every call so settings changes take
//! effect without rebuilding the client.

use super::config::SheetsConfig;
use super::protocol::{
    AckResponse, ApiAction, InsertResponse, SchemaResponse, SheetsRequest,
};
use super::{RemoteError, RemoteResult};
use log::debug;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const BODY_PREVIEW_CHAR_LIMIT: usize = 160;

/// Stateless request client over the single configured endpoint.
pub struct SheetsClient {
    http: reqwest::Client,
    config: SheetsConfig,
}

impl SheetsClient {
    /// Builds a client with an explicit request timeout.
    ///
    /// # Errors
    /// - Returns an error when the underlying HTTP client cannot be built.
    pub fn new(config: SheetsConfig) -> RemoteResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| RemoteError::Transport(err.to_string()))?;
        Ok(Self { http, config })
    }

    /// Whether a non-blank endpoint URL is configured.
    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    /// Tests connectivity to the endpoint. Never errors.
    pub async fn ping(&self) -> bool {
        let request = SheetsRequest::for_action(ApiAction::Ping);
        match self.post_json::<AckResponse>(&request).await {
            Ok(response) => response.success,
            Err(err) => {
                debug!("event=remote_ping module=remote status=error error={err}");
                false
            }
        }
    }

    /// Fetches all rows of one sheet, optionally filtered.
    pub async fn get_all(
        &self,
        sheet: &str,
        filters: Option<BTreeMap<String, String>>,
    ) -> RemoteResult<Vec<BTreeMap<String, String>>> {
        let mut request = SheetsRequest::for_action(ApiAction::Get);
        request.sheet = Some(sheet.to_string());
        request.filters = filters;
        self.post_json(&request).await
    }

    /// Fetches one row by id; `None` when the id does not exist remotely.
    pub async fn get_by_id(
        &self,
        sheet: &str,
        id: &str,
    ) -> RemoteResult<Option<BTreeMap<String, String>>> {
        let mut request = SheetsRequest::for_action(ApiAction::GetById);
        request.sheet = Some(sheet.to_string());
        request.id = Some(id.to_string());
        self.post_json(&request).await
    }

    /// Inserts one row and returns the server-assigned id.
    pub async fn insert(
        &self,
        sheet: &str,
        data: BTreeMap<String, String>,
    ) -> RemoteResult<String> {
        let mut request = SheetsRequest::for_action(ApiAction::Insert);
        request.sheet = Some(sheet.to_string());
        request.data = Some(data);
        let response: InsertResponse = self.post_json(&request).await?;

        match (response.success, response.id) {
            (true, Some(id)) => Ok(id),
            _ => Err(RemoteError::Rejected(
                response.error.unwrap_or_else(|| "insert failed".to_string()),
            )),
        }
    }

    /// Replaces one row by id.
    pub async fn update(
        &self,
        sheet: &str,
        id: &str,
        data: BTreeMap<String, String>,
    ) -> RemoteResult<()> {
        let mut request = SheetsRequest::for_action(ApiAction::Update);
        request.sheet = Some(sheet.to_string());
        request.id = Some(id.to_string());
        request.data = Some(data);
        let response: AckResponse = self.post_json(&request).await?;
        ack_to_result(response, "update failed")
    }

    /// Deletes one row by id.
    pub async fn delete(&self, sheet: &str, id: &str) -> RemoteResult<()> {
        let mut request = SheetsRequest::for_action(ApiAction::Delete);
        request.sheet = Some(sheet.to_string());
        request.id = Some(id.to_string());
        let response: AckResponse = self.post_json(&request).await?;
        ack_to_result(response, "delete failed")
    }

    /// Fetches the sheet/column layout for validation.
    pub async fn get_schema(&self) -> RemoteResult<SchemaResponse> {
        let request = SheetsRequest::for_action(ApiAction::GetSchema);
        self.post_json(&request).await
    }

    fn endpoint(&self) -> RemoteResult<String> {
        let url = self.config.script_url();
        if url.trim().is_empty() {
            return Err(RemoteError::NotConfigured);
        }
        Ok(url)
    }

    async fn post_json<T: DeserializeOwned>(&self, request: &SheetsRequest) -> RemoteResult<T> {
        let endpoint = self.endpoint()?;
        let response = self
            .http
            .post(&endpoint)
            .json(request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        serde_json::from_slice(body.as_ref())
            .map_err(|err| RemoteError::Decode(err.to_string()))
    }
}

fn ack_to_result(response: AckResponse, fallback: &str) -> RemoteResult<()> {
    if response.success {
        return Ok(());
    }
    Err(RemoteError::Rejected(
        response.error.unwrap_or_else(|| fallback.to_string()),
    ))
}

fn map_transport_error(error: reqwest::Error) -> RemoteError {
    if error.is_timeout() {
        RemoteError::Timeout(error.to_string())
    } else {
        RemoteError::Transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> RemoteError {
    RemoteError::Status {
        code: status.as_u16(),
        message: body_preview(body),
    }
}

fn body_preview(body: &[u8]) -> String {
    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact
        .chars()
        .take(BODY_PREVIEW_CHAR_LIMIT)
        .collect::<String>();
    if compact.chars().count() > BODY_PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    use super::{body_preview, map_status_error};
    use crate::remote::RemoteError;
    use reqwest::StatusCode;

    #[test]
    fn status_errors_carry_code_and_body_preview() {
        let error = map_status_error(StatusCode::BAD_GATEWAY, b"upstream\nunavailable");
        match error {
            RemoteError::Status { code, message } => {
                assert_eq!(code, 502);
                assert_eq!(message, "upstream unavailable");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn body_preview_truncates_long_bodies() {
        let body = "x".repeat(500);
        let preview = body_preview(body.as_bytes());
        assert!(preview.ends_with("..."));
        assert!(preview.chars().count() <= 163);
    }
}
