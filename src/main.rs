use std::error::Error as _;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use danfe_fetch::client::DEFAULT_BATCH_CONCURRENCY;
use danfe_fetch::types::{DEFAULT_KEY_OUTPUT, DEFAULT_XML_OUTPUT};
use danfe_fetch::{
    BatchItem, Config, DanfeClient, Error, GenerateOutcome, RegisterBody, RegisterReport, Result,
};
use tracing_subscriber::EnvFilter;

/// Log filter used when `RUST_LOG` is unset
const DEFAULT_LOG_FILTER: &str = "danfe_fetch=info";

/// Renders and registers DANFE documents through the MeuDanfe API.
///
/// The endpoint and credential come from `MEU_DANFE_API_BASE` and
/// `MEU_DANFE_API_KEY` (a `.env` file in the working directory is honored).
/// Set `RUST_LOG=danfe_fetch=debug` to trace requests.
#[derive(Parser)]
#[command(author, version, about = "Render and register DANFE documents via the MeuDanfe API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render documents by access key and save the PDF.
    ///
    /// With more than one key (or with --out-dir) each document is saved as
    /// `danfe_{key}.pdf` in the output directory.
    #[command(name = "fetch-by-key", aliases = ["fetch_by_key", "key"])]
    FetchByKey {
        /// Document access key(s)
        #[arg(required = true)]
        keys: Vec<String>,

        /// Output file (single key only)
        #[arg(short, long, conflicts_with = "out_dir")]
        output: Option<PathBuf>,

        /// Output directory for batch mode
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Keys fetched at once in batch mode
        #[arg(long, default_value_t = DEFAULT_BATCH_CONCURRENCY)]
        concurrency: usize,
    },

    /// Convert an NF-e XML file into a DANFE PDF.
    #[command(name = "convert-xml", aliases = ["convert_xml", "xml"])]
    ConvertXml {
        /// Path to the XML file
        xml_path: PathBuf,

        /// Output file
        #[arg(short, long, default_value = DEFAULT_XML_OUTPUT)]
        output: PathBuf,
    },

    /// Register an NF-e XML file with the service and print its answer.
    #[command(name = "register-xml", aliases = ["register_xml", "add"])]
    RegisterXml {
        /// Path to the XML file
        xml_path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            report_error(&err);
            exit_code(&err)
        }
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let client = DanfeClient::new(Config::from_env()?)?;

    match cli.command {
        Commands::FetchByKey {
            keys,
            output,
            out_dir,
            concurrency,
        } => {
            if keys.len() == 1 && out_dir.is_none() {
                let output = output.unwrap_or_else(|| PathBuf::from(DEFAULT_KEY_OUTPUT));
                let outcome = client.fetch_by_key(&keys[0], &output).await?;
                print_outcome(&outcome);
                return Ok(ExitCode::SUCCESS);
            }

            if output.is_some() {
                return Err(Error::config(
                    "--output accepts a single key; use --out-dir for several",
                    "output",
                ));
            }

            let out_dir = out_dir.unwrap_or_else(|| PathBuf::from("."));
            let items = client.fetch_many(keys, &out_dir, concurrency).await;
            Ok(print_batch(&items, &out_dir))
        }
        Commands::ConvertXml { xml_path, output } => {
            let outcome = client.convert_xml(&xml_path, &output).await?;
            print_outcome(&outcome);
            Ok(ExitCode::SUCCESS)
        }
        Commands::RegisterXml { xml_path } => {
            let report = client.register_xml(&xml_path).await?;
            print_report(&report);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print_outcome(outcome: &GenerateOutcome) {
    match outcome {
        GenerateOutcome::Saved { path, .. } => println!("PDF saved to {}", path.display()),
        GenerateOutcome::PayloadMissing { envelope } => {
            let pretty =
                serde_json::to_string_pretty(envelope).unwrap_or_else(|_| envelope.to_string());
            println!("Base64 payload not found in response: {}", pretty);
        }
    }
}

fn print_report(report: &RegisterReport) {
    println!("Status: {}", report.status);
    match &report.body {
        RegisterBody::Json(value) => println!("Response: {}", value),
        RegisterBody::Text(text) => println!("Response (raw): {}", text),
    }
}

/// Print one line per key; the exit code reflects the first failure
fn print_batch(items: &[BatchItem], out_dir: &Path) -> ExitCode {
    let mut first_failure: Option<ExitCode> = None;

    for item in items {
        match &item.result {
            Ok(GenerateOutcome::Saved { path, .. }) => {
                println!("{}: PDF saved to {}", item.key, path.display());
            }
            Ok(GenerateOutcome::PayloadMissing { envelope }) => {
                println!("{}: base64 payload not found in response: {}", item.key, envelope);
            }
            Err(err) => {
                eprintln!("{}: {}", item.key, err);
                first_failure.get_or_insert_with(|| exit_code(err));
            }
        }
    }

    tracing::debug!(out_dir = %out_dir.display(), count = items.len(), "batch complete");
    first_failure.unwrap_or(ExitCode::SUCCESS)
}

fn exit_code(err: &Error) -> ExitCode {
    u8::try_from(err.exit_code())
        .map(ExitCode::from)
        .unwrap_or(ExitCode::FAILURE)
}

fn report_error(err: &Error) {
    eprintln!("Error: {}", err);
    if let Error::HttpStatus { body, .. } = err
        && !body.is_empty()
    {
        eprintln!("  response: {}", body);
    }

    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {}", cause);
        source = cause.source();
    }
}
