//! Convert a local file without running the server
//!
//! Usage:
//!   cargo run --bin convert -- <source-lang> <target-lang> <file>
//!
//! Prints the same JSON envelope the HTTP endpoint returns. Exits non-zero
//! when the conversion fails.
//!
//! Optional:
//! - STORAGE_DIR (defaults to <system temp>/xliff-converter)

use anyhow::{bail, Context, Result};
use std::path::Path;
use std::sync::Arc;
use xliff_converter::config::Config;
use xliff_converter::handler::{ConversionHandler, ConversionRequest};
use xliff_converter::xliff::XliffGenerator;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("xliff_converter=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [source, target, file] = args.as_slice() else {
        bail!("Usage: convert <source-lang> <target-lang> <file>");
    };

    let config = Config::from_env()?;
    let path = Path::new(file);
    let input = tokio::fs::File::open(path)
        .await
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let handler = ConversionHandler::new(Arc::new(XliffGenerator::new()), &config.storage_dir);
    let envelope = handler
        .handle(ConversionRequest::new(
            file.as_str(),
            source.as_str(),
            target.as_str(),
            Some(input),
        ))
        .await;

    println!("{}", serde_json::to_string_pretty(envelope.body())?);

    if !envelope.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
