//! Handler for the `expiry` subcommand.
//!
//! Reports whether a token is expired, failing closed: a token that
//! cannot be decoded is reported as expired. Supports time-travel via
//! `--at` for evaluating expiry at another instant.

use anyhow::Result;
use chrono::Utc;

use henrys_core::core::time_travel::parse_time_expression;
use henrys_core::decode;

use crate::cli::ExpiryArgs;
use crate::commands::input::resolve_token;
use crate::display::session_status::expiry_verdict;

/// Execute the `expiry` subcommand.
///
/// Returns `true` when the token is expired at the evaluation time.
pub fn execute(args: &ExpiryArgs) -> Result<bool> {
    let token = resolve_token(&args.input)?;
    let now = match &args.at {
        Some(expression) => parse_time_expression(expression)?.timestamp,
        None => Utc::now(),
    };

    let expired = match decode(&token) {
        Ok(session) => {
            println!("{}", expiry_verdict(session.expires_at, now));
            session.is_expired_at(now)
        }
        Err(e) => {
            tracing::warn!(error = %e, "treating undecodable token as expired");
            println!("EXPIRED (token could not be decoded)");
            true
        }
    };
    Ok(expired)
}
