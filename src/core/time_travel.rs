//! Simulated "now" for session expiry checks.
//!
//! Parses time expressions (relative like "+7d" or absolute like ISO 8601)
//! so a token's expiry can be evaluated at any instant.

use chrono::{DateTime, Duration, Utc};

use crate::core::eastern::parse_instant;
use crate::error::SessionError;

/// A parsed time target for time-travel evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeTarget {
    /// The resolved absolute timestamp.
    pub timestamp: DateTime<Utc>,
    /// The original expression provided by the user.
    pub expression: String,
}

/// Parse a time-travel expression relative to the current instant.
///
/// # Errors
///
/// See [`parse_time_expression_at`].
pub fn parse_time_expression(expression: &str) -> Result<TimeTarget, SessionError> {
    parse_time_expression_at(expression, Utc::now())
}

/// Parse a time-travel expression into an absolute timestamp.
///
/// Supports the following formats:
/// - Relative to `now`: `+7d`, `-1h`, `+30m`, `+2w`, `+1y`, `-5s`
/// - Absolute ISO 8601: `2024-01-15T14:30:00Z`
/// - Absolute Unix epoch seconds: `1705312200`
///
/// # Errors
///
/// Returns an error if the expression doesn't match any known format.
pub fn parse_time_expression_at(
    expression: &str,
    now: DateTime<Utc>,
) -> Result<TimeTarget, SessionError> {
    let trimmed = expression.trim();
    let invalid = |reason: String| SessionError::InvalidTimeExpression {
        expression: expression.to_string(),
        reason,
    };

    if trimmed.is_empty() {
        return Err(invalid("expression is empty".to_string()));
    }

    let out_of_range = || invalid("resulting time is out of range".to_string());
    let timestamp = if let Some(offset) = trimmed.strip_prefix('+') {
        now.checked_add_signed(parse_offset(offset).map_err(invalid)?)
            .ok_or_else(out_of_range)?
    } else if let Some(offset) = trimmed.strip_prefix('-') {
        now.checked_sub_signed(parse_offset(offset).map_err(invalid)?)
            .ok_or_else(out_of_range)?
    } else if trimmed.bytes().all(|b| b.is_ascii_digit()) {
        let seconds: i64 = trimmed
            .parse()
            .map_err(|_| invalid("epoch seconds out of range".to_string()))?;
        DateTime::from_timestamp(seconds, 0)
            .ok_or_else(|| invalid("epoch seconds out of range".to_string()))?
    } else {
        parse_instant(trimmed)
            .ok_or_else(|| invalid("expected +/-<n><unit>, ISO 8601, or epoch seconds".to_string()))?
    };

    Ok(TimeTarget {
        timestamp,
        expression: expression.to_string(),
    })
}

/// Parse `<n><unit>` into a duration.
fn parse_offset(offset: &str) -> Result<Duration, String> {
    let split = offset
        .find(|c: char| !c.is_ascii_digit())
        .ok_or_else(|| "missing unit (expected one of s, m, h, d, w, y)".to_string())?;
    let (amount, unit) = offset.split_at(split);

    let amount: i64 = amount
        .parse()
        .map_err(|_| format!("invalid amount '{amount}'"))?;
    let seconds_per_unit = match unit {
        "s" => 1,
        "m" => 60,
        "h" => 3_600,
        "d" => 86_400,
        "w" => 604_800,
        "y" => 31_536_000,
        other => return Err(format!("unknown unit '{other}'")),
    };

    amount
        .checked_mul(seconds_per_unit)
        .and_then(Duration::try_seconds)
        .ok_or_else(|| format!("offset '{offset}' is too large"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn test_relative_forward_days() {
        let target = parse_time_expression_at("+7d", now()).unwrap();
        assert_eq!(target.timestamp, now() + Duration::days(7));
        assert_eq!(target.expression, "+7d");
    }

    #[test]
    fn test_relative_backward_units() {
        assert_eq!(
            parse_time_expression_at("-1h", now()).unwrap().timestamp,
            now() - Duration::hours(1)
        );
        assert_eq!(
            parse_time_expression_at("-5s", now()).unwrap().timestamp,
            now() - Duration::seconds(5)
        );
        assert_eq!(
            parse_time_expression_at("+30m", now()).unwrap().timestamp,
            now() + Duration::minutes(30)
        );
        assert_eq!(
            parse_time_expression_at("+1y", now()).unwrap().timestamp,
            now() + Duration::days(365)
        );
    }

    #[test]
    fn test_absolute_iso() {
        let target = parse_time_expression_at("2024-01-15T14:30:00Z", now()).unwrap();
        assert_eq!(
            target.timestamp,
            DateTime::from_timestamp(1_705_329_000, 0).unwrap()
        );
    }

    #[test]
    fn test_absolute_epoch_seconds() {
        let target = parse_time_expression_at("1705312200", now()).unwrap();
        assert_eq!(
            target.timestamp,
            DateTime::from_timestamp(1_705_312_200, 0).unwrap()
        );
    }

    #[test]
    fn test_unknown_unit_fails() {
        let err = parse_time_expression_at("+7x", now()).unwrap_err();
        assert!(err.to_string().contains("unknown unit 'x'"));
    }

    #[test]
    fn test_missing_unit_fails() {
        let err = parse_time_expression_at("+7", now()).unwrap_err();
        assert!(matches!(err, SessionError::InvalidTimeExpression { .. }));
    }

    #[test]
    fn test_empty_and_garbage_fail() {
        assert!(parse_time_expression_at("", now()).is_err());
        assert!(parse_time_expression_at("next tuesday", now()).is_err());
        assert!(parse_time_expression_at("+d", now()).is_err());
    }

    #[test]
    fn test_overflowing_offset_fails() {
        let err = parse_time_expression_at("+9999999999999999y", now()).unwrap_err();
        assert!(err.to_string().contains("too large"));
    }
}
