//! Core logic for Eastern-Time conversion and bearer sessions.
//!
//! This module contains the domain logic separated from CLI concerns.
//! All types and functions here are testable without the CLI layer.

pub mod claims;
pub mod decoder;
pub mod eastern;
pub mod guard;
pub mod session;
pub mod session_token;
pub mod time_travel;
pub mod token_store;
