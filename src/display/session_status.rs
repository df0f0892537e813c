//! Session status display.
//!
//! Renders identity, branch, and temporal claims of a decoded session
//! in Eastern Time, with an expiry verdict:
//! - Expired sessions: "EXPIRED (X ago)"
//! - Live sessions: "VALID (expires in X)"

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

use henrys_core::DecodedSession;
use henrys_core::core::eastern::{DisplayFormat, format_instant, to_iso_string};

/// Machine-readable session view for `--json` output.
#[derive(Debug, Serialize)]
pub struct SessionReport<'a> {
    pub session: &'a DecodedSession,
    pub expired: bool,
    pub checked_at: String,
}

impl<'a> SessionReport<'a> {
    pub fn new(session: &'a DecodedSession, now: DateTime<Utc>) -> Self {
        Self {
            session,
            expired: session.is_expired_at(now),
            checked_at: to_iso_string(now),
        }
    }
}

/// Render a session as labelled lines.
pub fn render_session(session: &DecodedSession, now: DateTime<Utc>) -> String {
    let mut lines = vec![
        format!("User:       {}", session.subject_name),
        format!("Role:       {}", session.role),
    ];

    let branch = match (&session.branch_code, &session.branch_name) {
        (Some(code), Some(name)) => Some(format!("{code} ({name})")),
        (Some(code), None) => Some(code.clone()),
        (None, Some(name)) => Some(name.clone()),
        (None, None) => session.branch_id.clone(),
    };
    if let Some(branch) = branch {
        lines.push(format!("Branch:     {branch}"));
    }

    if let Some(issued_at) = session.issued_at {
        lines.push(format!(
            "Issued at:  {}",
            format_instant(issued_at, DisplayFormat::WithZone)
        ));
    }
    lines.push(format!(
        "Expires at: {}",
        format_instant(session.expires_at, DisplayFormat::WithZone)
    ));
    lines.push(format!("Status:     {}", expiry_verdict(session.expires_at, now)));

    lines.join("\n")
}

/// "EXPIRED (X ago)" or "VALID (expires in X)".
pub fn expiry_verdict(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    if expires_at <= now {
        format!("EXPIRED ({} ago)", humanize(now - expires_at))
    } else {
        format!("VALID (expires in {})", humanize(expires_at - now))
    }
}

/// Two most significant units, e.g. "3d 4h" or "12m 5s".
fn humanize(delta: TimeDelta) -> String {
    let total = delta.num_seconds().max(0);
    let units = [
        ("d", total / 86_400),
        ("h", (total % 86_400) / 3_600),
        ("m", (total % 3_600) / 60),
        ("s", total % 60),
    ];

    let parts: Vec<String> = units
        .iter()
        .skip_while(|(_, value)| *value == 0)
        .take(2)
        .filter(|(_, value)| *value > 0)
        .map(|(unit, value)| format!("{value}{unit}"))
        .collect();

    if parts.is_empty() {
        "0s".to_string()
    } else {
        parts.join(" ")
    }
}
