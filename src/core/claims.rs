//! Claim shapes carried in a session token payload.
//!
//! The payload is parsed into [`Claims`] with every field optional so
//! that a missing claim can be reported by name instead of as a generic
//! JSON error. Type mismatches (e.g. a numeric `role`) still fail the
//! JSON parse.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SessionError;

/// Raw claims as issued by the authentication API.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Claims {
    /// Username of the subject.
    pub nameid: Option<String>,
    /// Role name, mapped through [`Role::from_claim`].
    pub role: Option<String>,
    #[serde(rename = "branchId")]
    pub branch_id: Option<String>,
    #[serde(rename = "branchCode")]
    pub branch_code: Option<String>,
    #[serde(rename = "branchName")]
    pub branch_name: Option<String>,
    /// Expiry, Unix seconds.
    pub exp: Option<f64>,
    /// Issued-at, Unix seconds.
    pub iat: Option<f64>,
}

impl Claims {
    /// Parse a decoded payload value into claims.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::JsonParseError`] if the payload is not an
    /// object or a known claim has the wrong JSON type.
    pub fn from_payload(payload: Value) -> Result<Self, SessionError> {
        serde_json::from_value(payload).map_err(|e| SessionError::JsonParseError {
            segment: "payload".to_string(),
            reason: e.to_string(),
        })
    }
}

/// Roles recognised by the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Role {
    Seller,
    Supervisor,
    Admin,
    StoreSeller,
}

impl Role {
    /// Map a `role` claim value onto a [`Role`].
    ///
    /// Only `"Admin"` and `"Supervisor"` are matched; every other value,
    /// including `"StoreSeller"` and unknown names, maps to [`Role::Seller`].
    pub fn from_claim(value: &str) -> Self {
        match value {
            "Admin" => Self::Admin,
            "Supervisor" => Self::Supervisor,
            _ => Self::Seller,
        }
    }

    /// The role's canonical name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Seller => "Seller",
            Self::Supervisor => "Supervisor",
            Self::Admin => "Admin",
            Self::StoreSeller => "StoreSeller",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
