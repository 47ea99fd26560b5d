//! MeuDanfe API client split into focused submodules.
//!
//! The `DanfeClient` struct and its methods are organized by operation:
//! - [`fetch`] - Render a document by key or by converting an XML file
//! - [`register`] - Register an XML file with the service
//! - [`batch`] - Fetch many keys concurrently

mod batch;
mod fetch;
mod register;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

pub use batch::{DEFAULT_BATCH_CONCURRENCY, batch_file_name};

use crate::config::Config;
use crate::error::{Error, Result};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response};
use std::path::Path;

/// Header carrying the static API credential
pub const API_KEY_HEADER: &str = "Api-Key";

const JSON_MEDIA_TYPE: &str = "application/json";
const XML_MEDIA_TYPE: &str = "application/xml";

/// Endpoint paths, relative to the configured base URL
pub(crate) mod paths {
    /// Render a registered document by key (`GET`, key appended as a segment)
    pub const FETCH_BY_KEY: &str = "fd/get/da";
    /// Convert an XML payload into a rendered document (`POST`)
    pub const CONVERT_XML: &str = "fd/convert/xml-to-da";
    /// Register an XML payload (`PUT`)
    pub const REGISTER_XML: &str = "fd/add/xml";
}

/// Client for the MeuDanfe document API
///
/// Holds the configuration and an HTTP client. Each operation builds a fresh
/// request; nothing is cached between calls, so one client can serve any
/// number of sequential or concurrent operations.
///
/// # Examples
///
/// ```no_run
/// use danfe_fetch::{Config, DanfeClient};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = DanfeClient::new(Config::from_env()?)?;
///     let outcome = client
///         .fetch_by_key("35240112345678000190550010000012341000012345", "danfe.pdf")
///         .await?;
///     println!("{outcome:?}");
///     Ok(())
/// }
/// ```
#[derive(Clone, Debug)]
pub struct DanfeClient {
    config: Config,
    http: reqwest::Client,
}

impl DanfeClient {
    /// Create a client, validating the configuration first
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, http })
    }

    /// The configuration this client was built with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Base request with the credential and JSON `Accept` header
    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .header(ACCEPT, JSON_MEDIA_TYPE)
    }

    /// Request carrying a raw XML body
    fn xml_request(&self, method: Method, url: &str, xml: Vec<u8>) -> RequestBuilder {
        self.request(method, url)
            .header(CONTENT_TYPE, XML_MEDIA_TYPE)
            .body(xml)
    }

    /// Execute a request, mapping timeouts to [`Error::Timeout`]
    async fn send(&self, request: RequestBuilder, url: &str) -> Result<Response> {
        tracing::debug!(url = %url, "dispatching request");
        let response = request
            .send()
            .await
            .map_err(|e| Error::from_transport(e, url, self.config.timeout))?;
        tracing::debug!(url = %url, status = response.status().as_u16(), "response received");
        Ok(response)
    }

    /// Read the whole response body as text
    async fn body_text(&self, response: Response, url: &str) -> Result<String> {
        response
            .text()
            .await
            .map_err(|e| Error::from_transport(e, url, self.config.timeout))
    }
}

/// Read an XML input file completely
///
/// Fails with [`Error::InputFile`] if the file is missing or unreadable and
/// with [`Error::EmptyXml`] if it holds only whitespace.
pub(crate) async fn read_xml(path: &Path) -> Result<Vec<u8>> {
    let xml = tokio::fs::read(path)
        .await
        .map_err(|source| Error::InputFile {
            path: path.to_path_buf(),
            source,
        })?;

    if xml.iter().all(u8::is_ascii_whitespace) {
        return Err(Error::EmptyXml {
            path: path.to_path_buf(),
        });
    }

    Ok(xml)
}
