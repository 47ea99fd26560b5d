//! Result types returned by the client operations

use crate::error::Error;
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;

/// Default output file for [`crate::DanfeClient::fetch_by_key`]
pub const DEFAULT_KEY_OUTPUT: &str = "danfe_por_chave.pdf";

/// Default output file for [`crate::DanfeClient::convert_xml`]
pub const DEFAULT_XML_OUTPUT: &str = "danfe_por_xml.pdf";

/// Outcome of an operation that is expected to produce a document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GenerateOutcome {
    /// The document was decoded and written
    Saved {
        /// Destination file
        path: PathBuf,
        /// Number of bytes written
        bytes: u64,
    },
    /// The service answered successfully but no payload was found.
    /// No file is written.
    PayloadMissing {
        /// Full response body, for diagnostics
        envelope: Value,
    },
}

impl GenerateOutcome {
    /// True if a file was written
    pub fn is_saved(&self) -> bool {
        matches!(self, GenerateOutcome::Saved { .. })
    }
}

/// Body of a register acknowledgment
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RegisterBody {
    /// Body parsed as JSON
    Json(Value),
    /// Body that is not JSON, as raw text
    Text(String),
}

impl RegisterBody {
    /// Interpret a response body, falling back to raw text when it is not JSON
    pub fn from_text(text: String) -> Self {
        match serde_json::from_str(&text) {
            Ok(value) => RegisterBody::Json(value),
            Err(_) => RegisterBody::Text(text),
        }
    }
}

impl std::fmt::Display for RegisterBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegisterBody::Json(value) => write!(f, "{value}"),
            RegisterBody::Text(text) => f.write_str(text),
        }
    }
}

/// Report for [`crate::DanfeClient::register_xml`]
///
/// The status is informational; a non-2xx status is not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisterReport {
    /// HTTP status code returned by the service
    pub status: u16,
    /// Response body
    pub body: RegisterBody,
}

impl RegisterReport {
    /// True for a 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Result for one key of a batch fetch
#[derive(Debug)]
pub struct BatchItem {
    /// Document key as supplied
    pub key: String,
    /// Output path that was targeted
    pub path: PathBuf,
    /// Outcome for this key alone
    pub result: Result<GenerateOutcome, Error>,
}
