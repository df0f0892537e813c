//! Domain error types for henrys-core.
//!
//! All business-logic errors are defined here using `thiserror`.
//! Most public operations convert these into sentinel values (`"-"`,
//! `"Invalid Date"`, `None`, `true`) before they reach a caller; the
//! typed errors remain available through the `Result`-returning variants.

use thiserror::Error;

/// Errors raised while decoding or using a bearer session token.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The token does not have the expected three-part structure.
    #[error("invalid token format: expected 'header.payload.signature' structure")]
    InvalidTokenFormat,

    /// Failed to decode the base64url-encoded payload segment.
    #[error("failed to decode {segment}: invalid base64url encoding")]
    Base64DecodeError {
        /// Which segment failed to decode.
        segment: String,
    },

    /// Failed to parse the decoded payload as JSON claims.
    #[error("failed to parse {segment} as JSON: {reason}")]
    JsonParseError {
        /// Which segment failed to parse.
        segment: String,
        /// Description of the parsing failure.
        reason: String,
    },

    /// A claim the session cannot exist without is absent.
    #[error("token is missing required claim '{claim}'")]
    MissingClaim {
        /// Name of the missing claim.
        claim: &'static str,
    },

    /// A numeric date claim is outside the representable range.
    #[error("claim '{claim}' is not a valid Unix timestamp: {value}")]
    InvalidTimestamp {
        /// Name of the claim.
        claim: &'static str,
        /// The raw claim value.
        value: f64,
    },

    /// The token decoded fine but its `exp` is at or before the check time.
    #[error("token expired at {expired_at}")]
    Expired {
        /// The expiry instant in canonical form.
        expired_at: String,
    },

    /// Failed to parse a time-travel expression.
    #[error("invalid time expression '{expression}': {reason}")]
    InvalidTimeExpression {
        /// The time expression that failed to parse.
        expression: String,
        /// Description of the parsing failure.
        reason: String,
    },

    /// The token store could not be read or written.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors raised by the Eastern-Time converter under the strict input policy.
#[derive(Debug, Error)]
pub enum TimeError {
    /// The wall-clock value is empty or not shaped like `YYYY-MM-DDTHH:mm`.
    #[error("invalid wall-clock value '{value}': expected YYYY-MM-DDTHH:mm")]
    MalformedWallClock {
        /// The rejected input.
        value: String,
    },

    /// The fields are well-shaped but do not name a real date or time.
    #[error("wall-clock value '{value}' is out of range: {reason}")]
    OutOfRange {
        /// The rejected input.
        value: String,
        /// Which field was out of range.
        reason: String,
    },

    /// The input policy name is not recognised.
    #[error("unknown input policy '{name}': expected 'fallback-now' or 'reject'")]
    UnknownPolicy {
        /// The unrecognised policy name.
        name: String,
    },

    /// The display format name is not recognised.
    #[error("unknown display format '{name}'")]
    UnknownFormat {
        /// The unrecognised format name.
        name: String,
    },
}

/// Errors raised while collecting command-line input.
#[derive(Debug, Error)]
pub enum InputError {
    /// No token was provided via any input method.
    #[error("no token provided: pass a token as an argument, via --token-env, or through stdin")]
    NoTokenProvided,

    /// The specified environment variable is not set.
    #[error("environment variable '{name}' is not set")]
    EnvVarNotFound {
        /// Name of the missing environment variable.
        name: String,
    },

    /// The environment variable name cannot be looked up.
    #[error("invalid environment variable name '{name}'")]
    InvalidEnvVarName {
        /// The rejected name.
        name: String,
    },

    /// Reading the token from stdin failed.
    #[error("failed to read token from stdin: {reason}")]
    Stdin {
        /// Description of the read failure.
        reason: String,
    },
}

/// Errors raised by a [`TokenStore`](crate::core::token_store::TokenStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading, writing or removing the persisted token failed.
    #[error("token store I/O failed for '{path}': {source}")]
    Io {
        /// Path of the key file.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_token_format_display() {
        let err = SessionError::InvalidTokenFormat;
        assert_eq!(
            err.to_string(),
            "invalid token format: expected 'header.payload.signature' structure"
        );
    }

    #[test]
    fn test_base64_decode_error_display_includes_segment() {
        let err = SessionError::Base64DecodeError {
            segment: "payload".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to decode payload: invalid base64url encoding"
        );
    }

    #[test]
    fn test_json_parse_error_display_includes_segment_and_reason() {
        let err = SessionError::JsonParseError {
            segment: "payload".to_string(),
            reason: "unexpected EOF".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to parse payload as JSON: unexpected EOF"
        );
    }

    #[test]
    fn test_missing_claim_display() {
        let err = SessionError::MissingClaim { claim: "nameid" };
        assert_eq!(err.to_string(), "token is missing required claim 'nameid'");
    }

    #[test]
    fn test_expired_display_includes_instant() {
        let err = SessionError::Expired {
            expired_at: "2023-11-14T22:13:20.000Z".to_string(),
        };
        assert!(err.to_string().contains("2023-11-14T22:13:20.000Z"));
    }

    #[test]
    fn test_invalid_time_expression_display() {
        let err = SessionError::InvalidTimeExpression {
            expression: "+7x".to_string(),
            reason: "unknown unit 'x'".to_string(),
        };
        assert!(err.to_string().contains("+7x"));
        assert!(err.to_string().contains("unknown unit 'x'"));
    }

    #[test]
    fn test_malformed_wall_clock_display() {
        let err = TimeError::MalformedWallClock {
            value: "tomorrow".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid wall-clock value 'tomorrow': expected YYYY-MM-DDTHH:mm"
        );
    }

    #[test]
    fn test_no_token_provided_display() {
        let err = InputError::NoTokenProvided;
        assert!(err.to_string().contains("no token provided"));
        assert!(err.to_string().contains("--token-env"));
        assert!(err.to_string().contains("stdin"));
    }

    #[test]
    fn test_env_var_not_found_display() {
        let err = InputError::EnvVarNotFound {
            name: "HENRYS_TOKEN".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "environment variable 'HENRYS_TOKEN' is not set"
        );
    }

    #[test]
    fn test_store_error_is_transparent_in_session_error() {
        let err: SessionError = StoreError::Io {
            path: "/tmp/henrys_auth_token".to_string(),
            source: std::io::Error::other("disk full"),
        }
        .into();
        assert!(err.to_string().contains("henrys_auth_token"));
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SessionError>();
        assert_send_sync::<TimeError>();
        assert_send_sync::<StoreError>();
        assert_send_sync::<InputError>();
    }
}
