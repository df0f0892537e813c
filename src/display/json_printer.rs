//! JSON output for machine consumption.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

/// Print a value as pretty JSON with 2-space indentation.
///
/// # Errors
///
/// Returns an error if serialization or the write to stdout fails.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{rendered}").context("failed to write to stdout")?;
    Ok(())
}
