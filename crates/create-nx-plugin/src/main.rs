//! create-nx-plugin - Create an Nx workspace for building an Nx plugin
//!
//! This is the main entry point for the create-nx-plugin command-line interface.

mod cli;
mod commands;
mod output;
mod prompts;
mod resolve;
pub mod utils;
mod version;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use nx_plugin_core::HierarchicalConfigLoader;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::Cli;
use prompts::TerminalPrompter;
use resolve::Resolution;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let config = HierarchicalConfigLoader::new()
        .and_then(|loader| loader.load())
        .context("Failed to load configuration")?;
    let args = cli.to_args()?;
    let cwd = utils::current_dir()?;

    let mut prompter = TerminalPrompter::new();
    let options = match resolve::normalize_args(args, &mut prompter, &config, &cwd) {
        Resolution::Ready(options) => options,
        Resolution::InvalidName(invalid) => {
            output::error_block(&invalid.title, &invalid.body);
            return Ok(ExitCode::FAILURE);
        }
        Resolution::DeterminationFailed(e) => {
            output::error(&format!("{:#}", e));
            return Ok(ExitCode::FAILURE);
        }
    };

    if let Err(e) = commands::create::run(&options, &config, &cwd).await {
        output::error(&format!(
            "Something went wrong! v{}",
            env!("CARGO_PKG_VERSION")
        ));
        return Err(e);
    }

    Ok(ExitCode::SUCCESS)
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            // Progress is reported through the spinner; logs stay quiet
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
