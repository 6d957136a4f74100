//! CLI entry point for the OpenAlex research tools.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use openalex_tools::OpenAlexClient;
use tracing::{debug, info};

mod app_config;
mod cli;

use app_config::{ConfigOverrides, load_config};
use cli::{Args, Command};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    // Results go to stdout, so logs stay on stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    let overrides = ConfigOverrides {
        base_url: args.base_url.clone(),
        contact_email: args.email.clone(),
        institution_id: args.institution_id.clone(),
    };
    let config = load_config(args.config.as_deref(), overrides)?;

    if !config.enabled {
        eprintln!("OpenAlex tools are disabled in the configuration (enabled = false).");
        return Ok(ExitCode::FAILURE);
    }

    let client = OpenAlexClient::new(&config)?;
    info!(base_url = client.base_url(), "OpenAlex client ready");

    let output = match args.command {
        Command::Works(works) => client.search_works(&works.into_request(None)).await,
        Command::Work(work) => client.get_work_details(&work.work_id, None).await,
        Command::Authors(authors) => client.search_authors(&authors.into_request(None)).await,
    };

    println!("{output}");

    // Operations render failures as text; scripts still get a non-zero status.
    if output.starts_with("Error") {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
