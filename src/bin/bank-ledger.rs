use std::fs::File;

use anyhow::{Context, Result};
use bank_ledger::bin_utils::{CommandError, Service};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let filename = std::env::args()
        .nth(1)
        .context("Expected a file name as the first argument")?;
    let file = File::open(&filename).with_context(|| format!("Failed to open `{filename}`"))?;

    let service = Service {
        input: file,
        output: &mut std::io::stdout(),
        error_printer: Box::new(|line, err| match err {
            CommandError::Parse(err) => eprintln!("Error at line {line}: {err}"),
            CommandError::Ledger(err) => eprintln!("Rejected at line {line}: {err}"),
        }),
    };
    service.run()
}
