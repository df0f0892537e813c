//! henrys: Eastern-Time conversion and session-token tooling.
//!
//! Entry point for the application. Parses CLI arguments and delegates
//! to the appropriate command handler.

#![forbid(unsafe_code)]

mod cli;
mod commands;
mod config;
mod display;
mod telemetry;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Parse CLI arguments and dispatch to the appropriate command handler.
///
/// Returns `ExitCode` so the caller can exit without `process::exit`,
/// allowing all destructors (including `Zeroizing`) to run.
fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    telemetry::init_tracing()?;
    cli.config.log();

    match &cli.command {
        Commands::ToUtc(args) => {
            commands::to_utc::execute(args, &cli.config)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Format(args) => {
            commands::format::execute(args);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Decode(args) => {
            commands::decode::execute(args)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Expiry(args) => {
            let expired = commands::expiry::execute(args)?;
            Ok(exit_code(!expired))
        }
        Commands::Session(command) => {
            let active = commands::session::execute(command, &cli.config)?;
            let wants_active = !matches!(command, cli::SessionCommand::Logout);
            Ok(exit_code(active || !wants_active))
        }
    }
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
