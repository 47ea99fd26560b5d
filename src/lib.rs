//! # danfe-fetch
//!
//! Client for the MeuDanfe fiscal-document API. It renders a DANFE (the PDF
//! representation of a Brazilian electronic invoice) either from a document
//! key or from an NF-e XML file and saves it to disk, and it registers XML
//! files with the service.
//!
//! The service returns the PDF as a base64 string inside a JSON envelope
//! whose exact shape varies; [`envelope::extract`] finds it.
//!
//! ## Quick Start
//!
//! ```no_run
//! use danfe_fetch::{Config, DanfeClient, GenerateOutcome};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads MEU_DANFE_API_BASE and MEU_DANFE_API_KEY (and .env, if present)
//!     let client = DanfeClient::new(Config::from_env()?)?;
//!
//!     match client.convert_xml("nota.xml", "danfe_por_xml.pdf").await? {
//!         GenerateOutcome::Saved { path, .. } => println!("PDF saved to {}", path.display()),
//!         GenerateOutcome::PayloadMissing { envelope } => println!("no PDF in {envelope}"),
//!     }
//!
//!     let report = client.register_xml("nota.xml").await?;
//!     println!("Status: {}", report.status);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// MeuDanfe API client
pub mod client;
/// Configuration types
pub mod config;
/// Response envelope inspection
pub mod envelope;
/// Error types
pub mod error;
/// Payload decoding and file output
pub mod output;
/// Operation result types
pub mod types;

// Re-export commonly used types
pub use client::DanfeClient;
pub use config::Config;
pub use envelope::{Envelope, extract};
pub use error::{Error, Result};
pub use output::write_document;
pub use types::{BatchItem, GenerateOutcome, RegisterBody, RegisterReport};
