//! Handlers for the `session` subcommands.
//!
//! The session is persisted in the configured store directory. `status`
//! restores it, dropping a stored token that has expired or no longer
//! decodes. Use `expiry --at` to evaluate a token at another instant
//! without touching the store.

use anyhow::Result;
use chrono::Utc;

use henrys_core::{SessionContext, TokenStore};

use crate::cli::{SessionCommand, StatusArgs, TokenInput};
use crate::commands::input::resolve_token;
use crate::config::Config;
use crate::display::json_printer::print_json;
use crate::display::session_status::{SessionReport, render_session};

/// Execute a `session` subcommand.
///
/// Returns `true` when a session is active once the command completes.
pub fn execute(command: &SessionCommand, config: &Config) -> Result<bool> {
    let mut ctx = SessionContext::new(config.token_store());

    match command {
        SessionCommand::Login(input) => login(&mut ctx, input),
        SessionCommand::Status(args) => status(&mut ctx, args),
        SessionCommand::Logout => {
            ctx.logout()?;
            println!("Signed out");
            Ok(false)
        }
    }
}

fn login<S: TokenStore>(ctx: &mut SessionContext<S>, input: &TokenInput) -> Result<bool> {
    let token = resolve_token(input)?;
    let now = Utc::now();
    let session = ctx.login(&token, now)?;
    println!("Signed in as {} ({})", session.subject_name, session.role);
    Ok(true)
}

fn status<S: TokenStore>(ctx: &mut SessionContext<S>, args: &StatusArgs) -> Result<bool> {
    let now = Utc::now();
    ctx.restore(now)?;

    match ctx.current() {
        Some(session) if args.json => print_json(&SessionReport::new(session, now))?,
        Some(session) => println!("{}", render_session(session, now)),
        None if args.json => print_json(&serde_json::json!({ "session": null }))?,
        None => println!("No active session"),
    }
    Ok(ctx.is_active())
}
