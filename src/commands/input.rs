//! Token acquisition shared by the token-consuming subcommands.

use std::io::{IsTerminal, Read};

use zeroize::Zeroizing;

use henrys_core::error::InputError;

use crate::cli::TokenInput;

/// Maximum number of bytes read from stdin for a token.
const STDIN_MAX_BYTES: u64 = 64 * 1024;

/// Resolve the token from, in order: the positional argument, the named
/// environment variable, or stdin when it is not a terminal.
///
/// # Errors
///
/// Returns an error if no non-empty token can be found or the
/// environment variable name is unusable.
pub fn resolve_token(input: &TokenInput) -> Result<Zeroizing<String>, InputError> {
    if let Some(token) = &input.token {
        return non_empty(token);
    }

    if let Some(name) = &input.token_env {
        validate_env_var_name(name)?;
        let value = std::env::var(name).map_err(|_| InputError::EnvVarNotFound {
            name: name.clone(),
        })?;
        return non_empty(&Zeroizing::new(value));
    }

    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Err(InputError::NoTokenProvided);
    }
    let mut buffer = Zeroizing::new(String::new());
    stdin
        .lock()
        .take(STDIN_MAX_BYTES)
        .read_to_string(&mut buffer)
        .map_err(|e| InputError::Stdin {
            reason: e.to_string(),
        })?;
    non_empty(&buffer)
}

fn non_empty(raw: &Zeroizing<String>) -> Result<Zeroizing<String>, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(InputError::NoTokenProvided)
    } else {
        Ok(Zeroizing::new(trimmed.to_string()))
    }
}

/// Reject names `std::env::var` would panic on or can never match.
fn validate_env_var_name(name: &str) -> Result<(), InputError> {
    if name.is_empty() || name.contains('=') || name.contains('\0') {
        return Err(InputError::InvalidEnvVarName {
            name: name.to_string(),
        });
    }
    Ok(())
}
