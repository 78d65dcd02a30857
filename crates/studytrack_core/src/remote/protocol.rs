//! Wire shapes for the Apps Script single-endpoint protocol.
//!
//! Every call is an HTTP POST with a JSON body carrying an `action` tag plus
//! optional payload fields. Responses are shaped per action: reads return the
//! entity data directly, mutations return `{success, ...}` envelopes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fixed action vocabulary understood by the endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiAction {
    Ping,
    Get,
    GetById,
    Insert,
    Update,
    Delete,
    GetSchema,
}

/// Request body sent on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetsRequest {
    pub action: ApiAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub models: Option<Vec<ModelDefinition>>,
}

impl SheetsRequest {
    /// Builds a request carrying only the action tag.
    pub fn for_action(action: ApiAction) -> Self {
        Self {
            action,
            sheet: None,
            data: None,
            filters: None,
            id: None,
            models: None,
        }
    }
}

/// Sheet/model description used by schema-management actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub fields: Vec<FieldDefinition>,
}

/// Column description inside a `ModelDefinition`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default)]
    pub hidden: bool,
}

/// Success/failure envelope returned by `UPDATE` and `DELETE` (and `PING`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AckResponse {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Envelope returned by `INSERT`, carrying the server-assigned row id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response to `GET_SCHEMA`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaResponse {
    pub sheets: Vec<SheetSchema>,
}

/// One sheet's name and column list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetSchema {
    pub name: String,
    pub columns: Vec<String>,
}

fn default_success() -> bool {
    true
}
