//! Shared test fixtures and helper utilities.
//!
//! Provides pre-built session tokens with known claims for use in
//! integration tests.
#![allow(dead_code)]

/// The token from the decoding walkthrough: an unsigned-looking token
/// whose header and signature segments are plain words.
///
/// Payload: `{"nameid":"jdoe","role":"Admin","exp":1700000000}`
pub const SCENARIO_TOKEN: &str =
    "header.eyJuYW1laWQiOiJqZG9lIiwicm9sZSI6IkFkbWluIiwiZXhwIjoxNzAwMDAwMDAwfQ.signature";

/// Expiry of [`SCENARIO_TOKEN`], Unix seconds.
pub const SCENARIO_EXP: i64 = 1_700_000_000;

/// 2100-01-01T00:00:00Z, comfortably in the future.
pub const FAR_FUTURE_EXP: i64 = 4_102_444_800;

/// A malformed token with only two parts (missing signature).
pub const MALFORMED_TOKEN_TWO_PARTS: &str = "eyJhbGciOiJIUzI1NiJ9.eyJzdWIiOiIxMjM0NTY3ODkwIn0";

/// A completely invalid token string.
pub const INVALID_TOKEN: &str = "onlyonepart";

/// HMAC secret used to sign fixture tokens. Never checked by the client.
pub const HMAC_TEST_SECRET: &str = "henrys-test-secret";

/// Create an HS256-signed token with the given claims.
pub fn create_hs256_token(claims: &serde_json::Value) -> String {
    use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(HMAC_TEST_SECRET.as_bytes());
    encode(&header, claims, &key).unwrap()
}

/// A signed token for `role` that expires at `exp`.
pub fn session_token(role: &str, exp: i64) -> String {
    create_hs256_token(&serde_json::json!({
        "nameid": "mlopez",
        "role": role,
        "branchId": "2",
        "branchCode": "NN01",
        "branchName": "Newport News",
        "exp": exp,
        "iat": exp - 28_800
    }))
}
