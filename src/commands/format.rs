//! Handler for the `format` subcommand.

use henrys_core::format;

use crate::cli::FormatArgs;

/// Execute the `format` subcommand. Never fails: unusable input renders
/// as `-` or `Invalid Date`.
pub fn execute(args: &FormatArgs) {
    println!("{}", format(args.instant.as_deref(), args.style));
}
