//! Remote spreadsheet backend client.
//!
//! # Responsibility
//! - Speak the Apps Script single-endpoint JSON protocol.
//! - Convert transport, status, and decode faults into `RemoteError`.
//!
//! Remote sync is best-effort: the local store stays the source of truth and
//! repository results never depend on the outcome of a remote call.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod client;
pub mod config;
pub mod protocol;
pub mod rows;

pub use client::SheetsClient;
pub use config::SheetsConfig;
pub use protocol::{
    AckResponse, ApiAction, FieldDefinition, InsertResponse, ModelDefinition, SchemaResponse,
    SheetSchema, SheetsRequest,
};

pub type RemoteResult<T> = Result<T, RemoteError>;

/// Failure taxonomy for remote calls.
#[derive(Debug)]
pub enum RemoteError {
    /// No endpoint URL is configured.
    NotConfigured,
    /// Connection-level failure before a response arrived.
    Transport(String),
    /// The request exceeded its deadline.
    Timeout(String),
    /// The endpoint answered with a non-success HTTP status.
    Status { code: u16, message: String },
    /// The response body could not be decoded.
    Decode(String),
    /// The endpoint answered `success = false`.
    Rejected(String),
}

impl Display for RemoteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotConfigured => write!(f, "no remote endpoint URL is configured"),
            Self::Transport(message) => write!(f, "remote transport failure: {message}"),
            Self::Timeout(message) => write!(f, "remote request timed out: {message}"),
            Self::Status { code, message } => {
                write!(f, "remote endpoint returned status {code}: {message}")
            }
            Self::Decode(message) => write!(f, "remote response decode failure: {message}"),
            Self::Rejected(message) => write!(f, "remote endpoint rejected the request: {message}"),
        }
    }
}

impl Error for RemoteError {}
