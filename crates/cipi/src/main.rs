mod cli;
mod config;
mod error;
mod output;

use std::error::Error as _;

use clap::Parser;
use miette::Diagnostic;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::error::{CliError, exit_code};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Usage errors share the general failure code; help and version do not fail.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() {
                exit_code::GENERAL
            } else {
                exit_code::SUCCESS
            };
            // A failed write means stderr is gone; the exit code still reports.
            let _ = err.print();
            std::process::exit(code);
        }
    };

    init_tracing(cli.verbose);

    if let Err(err) = run(&cli).await {
        report(&err);
        std::process::exit(exit_code::GENERAL);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // Logs go to stderr; stdout carries only the rendered output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: &Cli) -> Result<(), CliError> {
    let resolved = config::resolve(cli)?;
    tracing::debug!(mode = ?resolved.invocation.mode, "running");

    let text = cipi_core::run(&resolved.invocation)
        .await
        .map_err(|e| CliError::from_core(e, &resolved.config_path))?;

    output::print_output(&text)?;
    Ok(())
}

/// Print an error as `[ERROR] <message>`, then its causes and help text.
fn report(err: &CliError) {
    eprintln!("[ERROR] {err}");

    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("        caused by: {cause}");
        source = cause.source();
    }

    if let Some(help) = err.help() {
        eprintln!();
        for line in help.to_string().lines() {
            eprintln!("        {line}");
        }
    }
}
