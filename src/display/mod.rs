//! Terminal display and formatting utilities.
//!
//! Handles JSON output and session status rendering for human-readable
//! terminal output.

pub mod json_printer;
pub mod session_status;
