//! CLI argument definitions for henrys.
//!
//! Uses `clap` derive macros to define the command-line interface.
//! Each subcommand has its own argument struct for type-safe parsing.
//!
//! # Security
//!
//! Token arguments are held in `Zeroizing` buffers, and the argument
//! structs that carry them implement custom `Debug` to redact them.

use std::fmt;

use clap::{Parser, Subcommand};
use zeroize::Zeroizing;

use henrys_core::DisplayFormat;
use henrys_core::error::TimeError;

use crate::config::Config;

/// Eastern-Time conversion and session-token tooling for the Henry's
/// inventory front-end.
#[derive(Debug, Parser)]
#[command(name = "henrys")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub config: Config,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Convert an Eastern wall-clock value (YYYY-MM-DDTHH:mm) to a UTC instant.
    ToUtc(ToUtcArgs),

    /// Render a UTC instant in Eastern Time.
    Format(FormatArgs),

    /// Decode a session token without verifying its signature.
    Decode(DecodeArgs),

    /// Check whether a session token is expired.
    Expiry(ExpiryArgs),

    /// Manage the persisted session.
    #[command(subcommand)]
    Session(SessionCommand),
}

/// Arguments for the `to-utc` subcommand.
#[derive(Debug, clap::Args)]
pub struct ToUtcArgs {
    /// Wall-clock value as entered in a datetime-local picker.
    pub local: Option<String>,
}

/// Arguments for the `format` subcommand.
#[derive(Debug, clap::Args)]
pub struct FormatArgs {
    /// UTC instant (ISO 8601). Omit to see the placeholder for a missing value.
    pub instant: Option<String>,

    /// Display style: datetime, date, time, short, or withZone.
    #[arg(long, short, default_value = "datetime", value_parser = parse_display_format)]
    pub style: DisplayFormat,
}

/// Where a token comes from: argument, environment variable, or stdin.
#[derive(clap::Args)]
pub struct TokenInput {
    /// The session token. If omitted, reads from stdin.
    #[arg(value_parser = parse_zeroizing_string)]
    pub token: Option<Zeroizing<String>>,

    /// Read the token from the specified environment variable.
    #[arg(long, value_name = "VAR_NAME")]
    pub token_env: Option<String>,
}

/// Custom `Debug` that redacts the token field to prevent accidental leakage.
impl fmt::Debug for TokenInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenInput")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("token_env", &self.token_env)
            .finish()
    }
}

/// Arguments for the `decode` subcommand.
#[derive(Debug, clap::Args)]
pub struct DecodeArgs {
    #[command(flatten)]
    pub input: TokenInput,

    /// Output raw JSON (machine-readable).
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `expiry` subcommand.
#[derive(Debug, clap::Args)]
pub struct ExpiryArgs {
    #[command(flatten)]
    pub input: TokenInput,

    /// Evaluate expiry at a different time instead of now.
    ///
    /// Accepts relative expressions like "+7d", "-1h", "+30m" or
    /// absolute timestamps in ISO 8601 or Unix epoch format.
    #[arg(long, value_name = "EXPR", allow_hyphen_values = true)]
    pub at: Option<String>,
}

/// `session` subcommands.
#[derive(Debug, Subcommand)]
pub enum SessionCommand {
    /// Store a freshly issued token as the current session.
    Login(TokenInput),

    /// Show the current session, dropping it if expired.
    Status(StatusArgs),

    /// Clear the stored session.
    Logout,
}

/// Arguments for `session status`.
#[derive(Debug, clap::Args)]
pub struct StatusArgs {
    /// Output raw JSON (machine-readable).
    #[arg(long)]
    pub json: bool,
}

/// Parse a string into a `Zeroizing<String>` for secure CLI arguments.
fn parse_zeroizing_string(s: &str) -> Result<Zeroizing<String>, std::convert::Infallible> {
    Ok(Zeroizing::new(s.to_string()))
}

fn parse_display_format(s: &str) -> Result<DisplayFormat, TimeError> {
    s.parse()
}
