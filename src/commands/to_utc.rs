//! Handler for the `to-utc` subcommand.
//!
//! Resolves an Eastern wall-clock value to the canonical UTC instant
//! string sent to the API. Malformed input follows the configured
//! input policy.

use anyhow::Result;

use henrys_core::core::eastern::to_iso_string;

use crate::cli::ToUtcArgs;
use crate::config::Config;

/// Execute the `to-utc` subcommand with the given arguments.
pub fn execute(args: &ToUtcArgs, config: &Config) -> Result<()> {
    let local = args.local.as_deref().unwrap_or_default();
    let instant = config.converter().to_utc(local)?;
    println!("{}", to_iso_string(instant));
    Ok(())
}
