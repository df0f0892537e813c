//! Handler for the `decode` subcommand.
//!
//! Decodes a session token's claims without verifying its signature
//! and prints them either as labelled lines or as JSON. Supports
//! reading the token from a CLI argument, environment variable, or stdin.

use anyhow::Result;
use chrono::Utc;

use crate::cli::DecodeArgs;
use crate::commands::input::resolve_token;
use crate::display::json_printer::print_json;
use crate::display::session_status::{SessionReport, render_session};

/// Execute the `decode` subcommand with the given arguments.
pub fn execute(args: &DecodeArgs) -> Result<()> {
    let token = resolve_token(&args.input)?;
    let session = henrys_core::decode(&token)?;
    let now = Utc::now();

    if args.json {
        print_json(&SessionReport::new(&session, now))?;
    } else {
        println!("{}", render_session(&session, now));
    }
    Ok(())
}
