use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use typeset::Config;

/// Installs stderr logging so stdout carries only rendered output.
///
/// `--verbose` enables debug level, otherwise `RUST_LOG` applies with a
/// fallback to warnings.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let config = Config::parse();
    init_tracing(config.verbose);
    config.validate().context("Invalid configuration")?;

    let source = config.read_input()?;
    debug!(filter = ?config.filter, bytes = source.len(), "Applying filter");

    let html = config.apply(&source);

    match &config.output {
        Some(path) => fs::write(path, &html)
            .with_context(|| format!("Failed to write output: {}", path.display()))?,
        None => std::io::stdout()
            .lock()
            .write_all(html.as_bytes())
            .context("Failed to write to stdout")?,
    }

    debug!(bytes = html.len(), "Wrote output");
    Ok(())
}
