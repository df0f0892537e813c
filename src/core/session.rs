//! The signed-in user, as an explicit context object.
//!
//! A [`SessionContext`] is created once and handed to whatever needs
//! identity. It moves between exactly two states: [`SessionState::NoSession`]
//! and [`SessionState::Active`]. Expiry or a server rejection always drops
//! back to `NoSession`; there is no renewal.

use chrono::{DateTime, Utc};
use zeroize::Zeroizing;

use crate::core::claims::Role;
use crate::core::eastern::to_iso_string;
use crate::core::session_token::{DecodedSession, decode};
use crate::core::token_store::TokenStore;
use crate::error::SessionError;

/// Where the session lifecycle currently is.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    NoSession,
    Active(DecodedSession),
}

/// Identity and role context backed by a [`TokenStore`].
pub struct SessionContext<S> {
    store: S,
    state: SessionState,
}

impl<S: TokenStore> SessionContext<S> {
    /// A context in [`SessionState::NoSession`]; call [`restore`](Self::restore)
    /// to pick up a persisted token.
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: SessionState::NoSession,
        }
    }

    /// Re-establish the session from the stored token.
    ///
    /// A stored token that fails to decode or is expired at `now` is
    /// cleared from the store.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store itself fails.
    pub fn restore(&mut self, now: DateTime<Utc>) -> Result<&SessionState, SessionError> {
        let Some(token) = self.store.load()? else {
            self.state = SessionState::NoSession;
            return Ok(&self.state);
        };

        match decode(&token) {
            Ok(session) if !session.is_expired_at(now) => {
                tracing::debug!(user = %session.subject_name, role = %session.role, "restored session");
                self.state = SessionState::Active(session);
            }
            Ok(session) => {
                tracing::info!(
                    user = %session.subject_name,
                    expired_at = %to_iso_string(session.expires_at),
                    "stored session expired"
                );
                self.logout()?;
            }
            Err(e) => {
                tracing::warn!(error = %e, "discarding undecodable stored token");
                self.logout()?;
            }
        }
        Ok(&self.state)
    }

    /// Adopt a freshly issued token.
    ///
    /// # Errors
    ///
    /// Returns the decode failure, [`SessionError::Expired`] for a token
    /// already expired at `now`, or a store failure. The current state is
    /// left untouched on error.
    pub fn login(&mut self, token: &str, now: DateTime<Utc>) -> Result<DecodedSession, SessionError> {
        let token = token.trim();
        let session = decode(token)?;
        if session.is_expired_at(now) {
            return Err(SessionError::Expired {
                expired_at: to_iso_string(session.expires_at),
            });
        }

        self.store.save(token)?;
        tracing::info!(user = %session.subject_name, role = %session.role, "signed in");
        self.state = SessionState::Active(session.clone());
        Ok(session)
    }

    /// Clear the stored token and drop the session. Safe to repeat.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be cleared; the in-memory
    /// session is dropped regardless.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        if let SessionState::Active(session) = &self.state {
            tracing::info!(user = %session.subject_name, "signed out");
        }
        self.state = SessionState::NoSession;
        self.store.clear()?;
        Ok(())
    }

    /// Drop the session if its token has expired by `now`.
    ///
    /// Returns whether the session is still active.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be cleared.
    pub fn ensure_fresh(&mut self, now: DateTime<Utc>) -> Result<bool, SessionError> {
        let expired = matches!(&self.state, SessionState::Active(session) if session.is_expired_at(now));
        if expired {
            self.logout()?;
        }
        Ok(self.is_active())
    }

    /// The server rejected the bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be cleared.
    pub fn handle_unauthorized(&mut self) -> Result<(), SessionError> {
        tracing::warn!("bearer token rejected by server, ending session");
        self.logout()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, SessionState::Active(_))
    }

    pub fn current(&self) -> Option<&DecodedSession> {
        match &self.state {
            SessionState::Active(session) => Some(session),
            SessionState::NoSession => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.current().map(|session| session.role)
    }

    /// Whether the signed-in user holds any of `roles`.
    pub fn has_role(&self, roles: &[Role]) -> bool {
        self.role().is_some_and(|role| roles.contains(&role))
    }

    /// Admins and supervisors may override item prices on a sale.
    pub fn can_override_prices(&self) -> bool {
        self.has_role(&[Role::Admin, Role::Supervisor])
    }

    /// `Authorization` header value for the active session.
    pub fn bearer_header(&self) -> Option<Zeroizing<String>> {
        self.current().map(DecodedSession::bearer_header)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
