//! Shared test helpers for creating DanfeClient instances against mock servers.

use crate::client::DanfeClient;
use crate::config::Config;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::path::{Path, PathBuf};
use std::time::Duration;
use wiremock::MockServer;

/// API key configured on every test client
pub(crate) const TEST_API_KEY: &str = "test-api-key";

/// A 44-digit access key shaped like a real one
pub(crate) const SAMPLE_KEY: &str = "35240112345678000190550010000012341000012345";

/// Minimal NF-e XML accepted by the mock service
pub(crate) const SAMPLE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<nfeProc xmlns="http://www.portalfiscal.inf.br/nfe" versao="4.00">
  <NFe><infNFe Id="NFe35240112345678000190550010000012341000012345" versao="4.00"/></NFe>
</nfeProc>"#;

/// Bytes standing in for a rendered PDF
pub(crate) fn sample_pdf() -> Vec<u8> {
    b"%PDF-1.4\n%\xe2\xe3\xcf\xd3\n1 0 obj\n<<>>\nendobj\n%%EOF\n".to_vec()
}

/// [`sample_pdf`] as the service would encode it
pub(crate) fn encoded_pdf() -> String {
    STANDARD.encode(sample_pdf())
}

/// Client pointed at a mock server
pub(crate) fn create_test_client(server: &MockServer) -> DanfeClient {
    DanfeClient::new(Config::new(server.uri(), TEST_API_KEY)).unwrap()
}

/// Client pointed at a mock server with a short timeout
pub(crate) fn create_test_client_with_timeout(
    server: &MockServer,
    timeout: Duration,
) -> DanfeClient {
    let config = Config {
        timeout,
        ..Config::new(server.uri(), TEST_API_KEY)
    };
    DanfeClient::new(config).unwrap()
}

/// Write an XML input file into `dir`
pub(crate) fn write_xml(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("nota.xml");
    std::fs::write(&path, contents).unwrap();
    path
}
