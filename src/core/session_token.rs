//! Session token decoding and expiry checks.
//!
//! Turns a raw bearer token into a [`DecodedSession`] without verifying
//! its signature. The result is for display, routing and role gating
//! only and must never be treated as a security control.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use zeroize::Zeroizing;

use crate::core::claims::{Claims, Role};
use crate::core::decoder::decode_payload;
use crate::core::eastern::to_iso_string;
use crate::error::SessionError;

/// Read-only view of a token's claims.
///
/// Never constructed from a malformed token. `raw_token` is kept for
/// forwarding as a bearer credential and is skipped by both `Debug`
/// and serialization.
#[derive(Clone, PartialEq, Serialize)]
pub struct DecodedSession {
    pub subject_name: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_name: Option<String>,
    #[serde(serialize_with = "serialize_instant")]
    pub expires_at: DateTime<Utc>,
    #[serde(
        serialize_with = "serialize_optional_instant",
        skip_serializing_if = "Option::is_none"
    )]
    pub issued_at: Option<DateTime<Utc>>,
    #[serde(skip)]
    pub raw_token: Zeroizing<String>,
}

impl DecodedSession {
    /// Whether the session's expiry is at or before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// The `Authorization` header value for outbound API calls.
    pub fn bearer_header(&self) -> Zeroizing<String> {
        Zeroizing::new(format!("Bearer {}", self.raw_token.as_str()))
    }
}

/// Custom `Debug` that redacts the raw token.
impl fmt::Debug for DecodedSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodedSession")
            .field("subject_name", &self.subject_name)
            .field("role", &self.role)
            .field("branch_id", &self.branch_id)
            .field("branch_code", &self.branch_code)
            .field("branch_name", &self.branch_name)
            .field("expires_at", &self.expires_at)
            .field("issued_at", &self.issued_at)
            .field("raw_token", &"[REDACTED]")
            .finish()
    }
}

fn serialize_instant<S: serde::Serializer>(
    instant: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&to_iso_string(*instant))
}

fn serialize_optional_instant<S: serde::Serializer>(
    instant: &Option<DateTime<Utc>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match instant {
        Some(instant) => serialize_instant(instant, serializer),
        None => serializer.serialize_none(),
    }
}

/// Decode a bearer token into a [`DecodedSession`].
///
/// Only the payload segment is inspected. `nameid`, `role` and `exp` are
/// required; an unrecognised role value falls back to [`Role::Seller`].
///
/// # Errors
///
/// Returns an error if the token is not three segments, the payload is
/// not base64url JSON, a required claim is missing, or a date claim is
/// out of range.
pub fn decode(token: &str) -> Result<DecodedSession, SessionError> {
    let claims = Claims::from_payload(decode_payload(token)?)?;

    let subject_name = claims
        .nameid
        .ok_or(SessionError::MissingClaim { claim: "nameid" })?;
    let role = claims
        .role
        .as_deref()
        .map(Role::from_claim)
        .ok_or(SessionError::MissingClaim { claim: "role" })?;
    let exp = claims
        .exp
        .ok_or(SessionError::MissingClaim { claim: "exp" })?;

    let expires_at = instant_from_unix_seconds(exp, "exp")?;
    let issued_at = claims
        .iat
        .map(|iat| instant_from_unix_seconds(iat, "iat"))
        .transpose()?;

    Ok(DecodedSession {
        subject_name,
        role,
        branch_id: claims.branch_id,
        branch_code: claims.branch_code,
        branch_name: claims.branch_name,
        expires_at,
        issued_at,
        raw_token: Zeroizing::new(token.to_string()),
    })
}

/// Decode a token, logging and discarding any failure.
///
/// `None` is the "no session" outcome callers act on; the reason is only
/// reported through `tracing`.
pub fn decode_session(token: &str) -> Option<DecodedSession> {
    match decode(token) {
        Ok(session) => Some(session),
        Err(e) => {
            tracing::warn!(error = %e, "failed to decode session token");
            None
        }
    }
}

/// Check whether a token is expired at `now`, failing closed.
///
/// The token is re-decoded with the same rules as [`decode`], so any
/// token `decode` rejects is reported as expired. A token whose expiry
/// equals `now` is expired.
pub fn is_expired(token: &str, now: DateTime<Utc>) -> bool {
    match decode(token) {
        Ok(session) => session.is_expired_at(now),
        Err(e) => {
            tracing::warn!(error = %e, "treating undecodable token as expired");
            true
        }
    }
}

/// Convert a JWT NumericDate into an instant at millisecond precision.
fn instant_from_unix_seconds(
    seconds: f64,
    claim: &'static str,
) -> Result<DateTime<Utc>, SessionError> {
    let millis = (seconds * 1000.0).floor();
    if !millis.is_finite() || millis.abs() > i64::MAX as f64 {
        return Err(SessionError::InvalidTimestamp {
            claim,
            value: seconds,
        });
    }
    DateTime::from_timestamp_millis(millis as i64).ok_or(SessionError::InvalidTimestamp {
        claim,
        value: seconds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use chrono::TimeZone;
    use serde_json::json;

    const SCENARIO_TOKEN: &str = "header.eyJuYW1laWQiOiJqZG9lIiwicm9sZSI6IkFkbWluIiwiZXhwIjoxNzAwMDAwMDAwfQ.signature";

    fn token_with(claims: serde_json::Value) -> String {
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
        format!("eyJhbGciOiJIUzI1NiJ9.{payload}.sig")
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_decode_scenario_token() {
        let session = decode(SCENARIO_TOKEN).unwrap();
        assert_eq!(session.subject_name, "jdoe");
        assert_eq!(session.role, Role::Admin);
        assert_eq!(session.expires_at, at(1_700_000_000));
        assert!(session.branch_id.is_none());
        assert!(session.issued_at.is_none());
        assert_eq!(session.raw_token.as_str(), SCENARIO_TOKEN);
    }

    #[test]
    fn test_decode_single_segment_is_absent() {
        assert!(matches!(
            decode("onlyonepart"),
            Err(SessionError::InvalidTokenFormat)
        ));
        assert!(decode_session("onlyonepart").is_none());
    }

    #[test]
    fn test_decode_carries_branch_and_issued_at() {
        let token = token_with(json!({
            "nameid": "mlopez",
            "role": "Supervisor",
            "branchId": "3",
            "branchCode": "HMP",
            "branchName": "Hampton",
            "exp": 1_700_000_000,
            "iat": 1_699_996_400
        }));
        let session = decode(&token).unwrap();
        assert_eq!(session.role, Role::Supervisor);
        assert_eq!(session.branch_code.as_deref(), Some("HMP"));
        assert_eq!(session.branch_name.as_deref(), Some("Hampton"));
        assert_eq!(session.issued_at, Some(at(1_699_996_400)));
    }

    #[test]
    fn test_decode_unrecognised_roles_default_to_seller() {
        for role in ["Seller", "Manager", "StoreSeller"] {
            let token = token_with(json!({"nameid": "a", "role": role, "exp": 1}));
            assert_eq!(decode(&token).unwrap().role, Role::Seller, "role {role}");
        }
    }

    #[test]
    fn test_decode_missing_role_is_absent() {
        let token = token_with(json!({"nameid": "a", "exp": 1_700_000_000}));
        assert!(matches!(
            decode(&token),
            Err(SessionError::MissingClaim { claim: "role" })
        ));
    }

    #[test]
    fn test_decode_missing_nameid_is_absent() {
        let token = token_with(json!({"role": "Admin", "exp": 1_700_000_000}));
        assert!(matches!(
            decode(&token),
            Err(SessionError::MissingClaim { claim: "nameid" })
        ));
    }

    #[test]
    fn test_decode_missing_exp_is_absent() {
        let token = token_with(json!({"nameid": "a", "role": "Admin"}));
        assert!(matches!(
            decode(&token),
            Err(SessionError::MissingClaim { claim: "exp" })
        ));
    }

    #[test]
    fn test_decode_fractional_exp_keeps_milliseconds() {
        let token = token_with(json!({"nameid": "a", "role": "Admin", "exp": 1_700_000_000.5}));
        let session = decode(&token).unwrap();
        assert_eq!(
            session.expires_at,
            DateTime::from_timestamp_millis(1_700_000_000_500).unwrap()
        );
    }

    #[test]
    fn test_decode_rejects_out_of_range_exp() {
        let token = token_with(json!({"nameid": "a", "role": "Admin", "exp": 1e300}));
        assert!(matches!(
            decode(&token),
            Err(SessionError::InvalidTimestamp { claim: "exp", .. })
        ));
    }

    #[test]
    fn test_is_expired_scenario_before_and_after() {
        assert!(is_expired(SCENARIO_TOKEN, at(1_700_000_001)));
        assert!(!is_expired(SCENARIO_TOKEN, at(1_699_999_999)));
    }

    #[test]
    fn test_is_expired_at_exact_expiry() {
        assert!(is_expired(SCENARIO_TOKEN, at(1_700_000_000)));
    }

    #[test]
    fn test_is_expired_fails_closed_for_malformed_tokens() {
        let far_past = at(0);
        for token in ["", "onlyonepart", "a.b", "a.b.c.d", "a.!!!.c", "a.bm90IGpzb24.c"] {
            assert!(is_expired(token, far_past), "token {token:?}");
        }
    }

    #[test]
    fn test_is_expired_fails_closed_when_decode_rejects() {
        // exp is in the future, but the missing nameid makes decode reject it.
        let token = token_with(json!({"role": "Admin", "exp": 4_000_000_000_i64}));
        assert!(is_expired(&token, at(0)));
    }

    #[test]
    fn test_debug_redacts_raw_token() {
        let session = decode(SCENARIO_TOKEN).unwrap();
        let debug_output = format!("{session:?}");
        assert!(debug_output.contains("jdoe"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("signature"));
    }

    #[test]
    fn test_serialize_omits_raw_token() {
        let session = decode(SCENARIO_TOKEN).unwrap();
        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(value["subject_name"], "jdoe");
        assert_eq!(value["role"], "Admin");
        assert_eq!(value["expires_at"], "2023-11-14T22:13:20.000Z");
        assert!(value.get("raw_token").is_none());
        assert!(value.get("issued_at").is_none());
    }

    #[test]
    fn test_bearer_header() {
        let session = decode(SCENARIO_TOKEN).unwrap();
        assert_eq!(
            session.bearer_header().as_str(),
            format!("Bearer {SCENARIO_TOKEN}")
        );
    }
}
