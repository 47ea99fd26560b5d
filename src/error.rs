//! Error types for danfe-fetch
//!
//! This module provides the error taxonomy for the client:
//! - Remote failures (HTTP status, timeout, transport)
//! - Local file failures (unreadable input XML, unwritable output PDF)
//! - Payload failures (invalid base64, non-JSON response body)
//! - Machine-readable error codes and process exit codes for the CLI
//!
//! A response envelope without a document payload is not an error; see
//! [`crate::types::GenerateOutcome::PayloadMissing`].

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for danfe-fetch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for danfe-fetch
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "MEU_DANFE_API_BASE")
        key: Option<String>,
    },

    /// The remote service answered with a non-success status
    #[error("HTTP {status} from {url}")]
    HttpStatus {
        /// Status code returned by the service
        status: u16,
        /// Request URL
        url: String,
        /// Response body text, kept for diagnostics (may be empty)
        body: String,
    },

    /// The request did not complete within the configured timeout
    #[error("request to {url} timed out after {}s", .timeout.as_secs())]
    Timeout {
        /// Request URL
        url: String,
        /// Timeout that was exceeded
        timeout: Duration,
    },

    /// Document key is empty, or collides with another key in a batch
    #[error("invalid document key: {0}")]
    InvalidKey(String),

    /// Input XML file missing or unreadable
    #[error("cannot read input file {}: {source}", .path.display())]
    InputFile {
        /// Path that was requested
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Input XML file is empty or whitespace only
    #[error("input file {} is empty", .path.display())]
    EmptyXml {
        /// Path of the blank file
        path: PathBuf,
    },

    /// Output file could not be created or written
    #[error("cannot write output file {}: {source}", .path.display())]
    Output {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Extracted payload is not valid base64
    #[error("invalid base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization error (e.g. a success response that is not JSON)
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Build a configuration error for a specific setting
    pub fn config(message: impl Into<String>, key: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }

    /// Map a transport error, turning timeouts into [`Error::Timeout`]
    pub(crate) fn from_transport(error: reqwest::Error, url: &str, timeout: Duration) -> Self {
        if error.is_timeout() {
            Error::Timeout {
                url: url.to_string(),
                timeout,
            }
        } else {
            Error::Network(error)
        }
    }

    /// Get the machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Config { .. } => "config_error",
            Error::HttpStatus { .. } => "http_status",
            Error::InvalidKey(_) => "invalid_key",
            Error::Timeout { .. } => "timeout",
            Error::InputFile { .. } => "input_file",
            Error::EmptyXml { .. } => "empty_xml",
            Error::Output { .. } => "output_file",
            Error::Decode(_) => "decode_error",
            Error::Network(_) => "network_error",
            Error::Serialization(_) => "serialization_error",
            Error::Other(_) => "internal_error",
        }
    }

    /// Process exit code used by the command line front end
    ///
    /// Values follow the BSD `sysexits.h` conventions.
    pub fn exit_code(&self) -> i32 {
        match self {
            // EX_DATAERR
            Error::Decode(_) | Error::Serialization(_) | Error::EmptyXml { .. } => 65,
            // EX_USAGE
            Error::InvalidKey(_) => 64,
            // EX_NOINPUT
            Error::InputFile { .. } => 66,
            // EX_UNAVAILABLE
            Error::HttpStatus { .. } | Error::Network(_) => 69,
            // EX_CANTCREAT
            Error::Output { .. } => 73,
            // EX_TEMPFAIL
            Error::Timeout { .. } => 75,
            // EX_CONFIG
            Error::Config { .. } => 78,
            Error::Other(_) => 1,
        }
    }
}
