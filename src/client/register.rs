//! Registering XML documents with the service.

use crate::error::Result;
use crate::types::{RegisterBody, RegisterReport};
use reqwest::Method;
use std::path::Path;

use super::{DanfeClient, paths, read_xml};

impl DanfeClient {
    /// Register an XML file with the service (`PUT {base}/fd/add/xml`)
    ///
    /// Unlike the rendering operations, the HTTP status is not treated as
    /// pass/fail: any status is returned in the [`RegisterReport`] together
    /// with the body, parsed as JSON when possible and as raw text otherwise.
    ///
    /// # Errors
    ///
    /// Only local input failures ([`crate::Error::InputFile`],
    /// [`crate::Error::EmptyXml`]) and transport failures
    /// ([`crate::Error::Timeout`], [`crate::Error::Network`]).
    pub async fn register_xml(&self, xml_path: impl AsRef<Path>) -> Result<RegisterReport> {
        let xml = read_xml(xml_path.as_ref()).await?;
        let url = self.config.endpoint(paths::REGISTER_XML);
        let response = self
            .send(self.xml_request(Method::PUT, &url, xml), &url)
            .await?;

        let status = response.status().as_u16();
        let body = RegisterBody::from_text(self.body_text(response, &url).await?);

        tracing::info!(url = %url, status, "XML registration acknowledged");
        Ok(RegisterReport { status, body })
    }
}
