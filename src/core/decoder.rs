//! Bearer token segment decoding.
//!
//! Splits a raw token into its three parts (header, payload, signature)
//! and base64url-decodes the payload into a JSON value. The header and
//! signature are carried through untouched: signature verification is
//! the issuing server's job, so nothing here inspects them.

use std::fmt;

use base64::Engine;
use base64::alphabet::URL_SAFE;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde_json::Value;

use crate::error::SessionError;

/// base64url with optional padding; some issuers pad their segments.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// The three raw segments of a bearer token.
pub struct TokenParts<'a> {
    /// The base64url header segment, undecoded.
    pub header: &'a str,
    /// The base64url payload segment, undecoded.
    pub payload: &'a str,
    /// The base64url signature segment, undecoded.
    pub signature: &'a str,
}

/// Custom `Debug` that redacts payload and signature to prevent
/// accidental leakage through debug formatting or error chains.
impl fmt::Debug for TokenParts<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenParts")
            .field("header", &self.header)
            .field("payload", &"[REDACTED]")
            .field("signature", &"[REDACTED]")
            .finish()
    }
}

/// Split a raw token on `.` separators.
///
/// # Errors
///
/// Returns [`SessionError::InvalidTokenFormat`] unless there are exactly
/// three segments.
pub fn split_token(token: &str) -> Result<TokenParts<'_>, SessionError> {
    let mut segments = token.split('.');
    match (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) {
        (Some(header), Some(payload), Some(signature), None) => Ok(TokenParts {
            header,
            payload,
            signature,
        }),
        _ => Err(SessionError::InvalidTokenFormat),
    }
}

/// Split a token and decode its payload segment into a JSON value.
///
/// # Errors
///
/// Returns an error if the token doesn't have exactly three parts,
/// if base64url decoding fails, or if JSON parsing fails.
pub fn decode_payload(token: &str) -> Result<Value, SessionError> {
    let parts = split_token(token)?;
    decode_segment(parts.payload, "payload")
}

/// Base64url-decode a segment and parse it as JSON.
fn decode_segment(encoded: &str, segment_name: &str) -> Result<Value, SessionError> {
    let bytes = PAYLOAD_ENGINE
        .decode(encoded)
        .map_err(|_| SessionError::Base64DecodeError {
            segment: segment_name.to_string(),
        })?;

    serde_json::from_slice(&bytes).map_err(|e| SessionError::JsonParseError {
        segment: segment_name.to_string(),
        reason: e.to_string(),
    })
}
