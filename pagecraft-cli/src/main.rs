//! # Pagecraft CLI
//!
//! Command-line host for Pagecraft projects.

use std::io::Write;

use clap::Parser;
use pagecraft_cli::{run, CliArgs, CliConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize structured tracing with optional JSON format.
///
/// Set `RUST_LOG` to control log levels (default: info,pagecraft_core=debug,pagecraft_cli=debug).
/// Set `RUST_LOG_FORMAT=json` for JSON output. Logs go to stderr.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,pagecraft_core=debug,pagecraft_cli=debug"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false);

    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = CliConfig::from(CliArgs::parse());
    tracing::debug!(data_dir = %config.data_dir.display(), command = ?config.command, "Starting pagecraft");

    let output = run(&config)?;
    std::io::stdout().write_all(output.as_bytes())?;
    Ok(())
}
