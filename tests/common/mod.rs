//! Common test utilities for danfe-fetch integration tests

#![allow(dead_code)]

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use danfe_fetch::{Config, DanfeClient};
use std::path::{Path, PathBuf};
use std::process::Output;
use wiremock::MockServer;

/// API key handed to clients and to the CLI under test
pub const TEST_API_KEY: &str = "integration-key";

/// A 44-digit access key
pub const ACCESS_KEY: &str = "35240112345678000190550010000012341000012345";

/// Minimal NF-e XML
pub const NFE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<nfeProc xmlns="http://www.portalfiscal.inf.br/nfe" versao="4.00">
  <NFe><infNFe Id="NFe35240112345678000190550010000012341000012345" versao="4.00"/></NFe>
</nfeProc>"#;

/// Bytes standing in for a rendered PDF
pub const PDF_BYTES: &[u8] = b"%PDF-1.7\n1 0 obj\n<< /Type /Catalog >>\nendobj\n%%EOF\n";

/// [`PDF_BYTES`] base64 encoded
pub fn pdf_base64() -> String {
    STANDARD.encode(PDF_BYTES)
}

/// Library client pointed at the mock server
pub fn client_for(server: &MockServer) -> DanfeClient {
    DanfeClient::new(Config::new(server.uri(), TEST_API_KEY)).expect("valid test config")
}

/// Write `contents` to `dir/name` and return the path
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write fixture");
    path
}

/// Run the `danfe-fetch` binary in `dir` against the mock server
pub async fn run_cli(server: &MockServer, dir: &Path, args: &[&str]) -> Output {
    tokio::process::Command::new(env!("CARGO_BIN_EXE_danfe-fetch"))
        .args(args)
        .current_dir(dir)
        .env("MEU_DANFE_API_BASE", server.uri())
        .env("MEU_DANFE_API_KEY", TEST_API_KEY)
        .env_remove("RUST_LOG")
        .output()
        .await
        .expect("spawn danfe-fetch")
}

/// Stdout of a finished command as text
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Stderr of a finished command as text
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
