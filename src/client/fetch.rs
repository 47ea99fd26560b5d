//! Document rendering: by key and by XML conversion.

use crate::envelope::Envelope;
use crate::error::{Error, Result};
use crate::output::write_document;
use crate::types::GenerateOutcome;
use reqwest::{Method, Response};
use serde_json::Value;
use std::path::Path;

use super::{DanfeClient, paths, read_xml};

impl DanfeClient {
    /// Render a previously registered document by its key and save the PDF
    ///
    /// Issues `GET {base}/fd/get/da/{key}`. The key is sent verbatim; only an
    /// empty key is rejected locally. Format checking is left to the service.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidKey`] if the key is empty
    /// - [`Error::HttpStatus`] on a non-2xx response; the output path is not touched
    /// - [`Error::Timeout`] / [`Error::Network`] on transport failure
    /// - [`Error::Serialization`] if the success body is not JSON
    /// - [`Error::Decode`] / [`Error::Output`] while saving
    ///
    /// A response without a payload is returned as
    /// [`GenerateOutcome::PayloadMissing`], not as an error.
    pub async fn fetch_by_key(
        &self,
        document_key: &str,
        output_path: impl AsRef<Path>,
    ) -> Result<GenerateOutcome> {
        let url = self.document_url(document_key)?;
        let response = self.send(self.request(Method::GET, &url), &url).await?;
        let envelope = self.read_envelope(response, &url).await?;
        save_envelope(envelope, output_path.as_ref()).await
    }

    /// Convert an XML file into a rendered document and save the PDF
    ///
    /// The file is read before any network call; a missing or unreadable file
    /// fails with [`Error::InputFile`] without contacting the service. The
    /// rest of the contract matches [`DanfeClient::fetch_by_key`].
    pub async fn convert_xml(
        &self,
        xml_path: impl AsRef<Path>,
        output_path: impl AsRef<Path>,
    ) -> Result<GenerateOutcome> {
        let xml = read_xml(xml_path.as_ref()).await?;
        let url = self.config.endpoint(paths::CONVERT_XML);
        let response = self
            .send(self.xml_request(Method::POST, &url, xml), &url)
            .await?;
        let envelope = self.read_envelope(response, &url).await?;
        save_envelope(envelope, output_path.as_ref()).await
    }

    /// URL for a key, with the key as one percent-encoded path segment
    pub(crate) fn document_url(&self, document_key: &str) -> Result<String> {
        if document_key.is_empty() {
            return Err(Error::InvalidKey("document key must not be empty".to_string()));
        }

        let mut url = url::Url::parse(&self.config.endpoint(paths::FETCH_BY_KEY))
            .map_err(|e| Error::Other(format!("Failed to build request URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| Error::Other("base URL cannot carry path segments".to_string()))?
            .push(document_key);

        Ok(url.into())
    }

    /// Check the status and parse the body of a document response
    async fn read_envelope(&self, response: Response, url: &str) -> Result<Value> {
        let status = response.status();
        if !status.is_success() {
            let body = self.body_text(response, url).await.unwrap_or_default();
            tracing::warn!(url = %url, status = status.as_u16(), "service returned an error status");
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
                body,
            });
        }

        let body = self.body_text(response, url).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Write the payload of `envelope` to `path`, or report that there is none
async fn save_envelope(envelope: Value, path: &Path) -> Result<GenerateOutcome> {
    match Envelope::parse(envelope) {
        Envelope::Document { payload, location } => {
            tracing::debug!(location = %location, "document payload located");
            let bytes = write_document(&payload, path).await?;
            Ok(GenerateOutcome::Saved {
                path: path.to_path_buf(),
                bytes,
            })
        }
        Envelope::Opaque(envelope) => {
            tracing::warn!("no document payload found in response");
            Ok(GenerateOutcome::PayloadMissing { envelope })
        }
    }
}
