//! henrys-core: Eastern-Time conversion and bearer-session handling for
//! the Henry's inventory and sales front-end.
//!
//! Two stateless pieces form the core: [`core::eastern`] maps Eastern
//! wall-clock input to UTC and renders UTC instants for display, and
//! [`core::session_token`] decodes bearer tokens into a
//! [`DecodedSession`] and checks expiry fail-closed. [`SessionContext`]
//! threads the signed-in user through the application explicitly.

#![forbid(unsafe_code)]

pub mod core;
pub mod error;

pub use crate::core::claims::Role;
pub use crate::core::eastern::{DisplayFormat, EasternConverter, InputPolicy, format, to_utc};
pub use crate::core::session::{SessionContext, SessionState};
pub use crate::core::session_token::{DecodedSession, decode, decode_session, is_expired};
pub use crate::core::token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use crate::error::{InputError, SessionError, StoreError, TimeError};
