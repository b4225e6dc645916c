use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use txkv::cli::Repl;
use txkv::{StoreConfig, ValueMode};

/// Interactive transactional key-value store.
#[derive(Parser)]
#[command(name = "txkv")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON file with store settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Accept text values as well as integers
    #[arg(long)]
    typed_values: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never interleave with the prompts
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => StoreConfig::from_json_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => StoreConfig::default(),
    };
    if cli.typed_values {
        config = config.value_mode(ValueMode::Typed);
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut repl = Repl::new(stdin.lock(), stdout.lock(), &config);
    repl.run().context("interactive session failed")?;

    Ok(())
}
