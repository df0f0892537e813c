//! Eastern-Time conversion for form input and display.
//!
//! The front-end only ever works in America/New_York. Wall-clock values
//! from a `datetime-local` picker (`YYYY-MM-DDTHH:mm`) are resolved to
//! UTC instants for the API, and UTC instants from the API are rendered
//! back in Eastern Time in one of several [`DisplayFormat`]s.
//!
//! Nothing in this module panics or returns an error to display callers:
//! bad input degrades to `"-"`, `"Invalid Date"`, or the current instant.
//! The strict [`InputPolicy::Reject`] is the one opt-in exception.

use std::fmt::Write as _;
use std::str::FromStr;

use chrono::{
    DateTime, Local, LocalResult, NaiveDate, NaiveDateTime, SecondsFormat, TimeDelta, TimeZone,
    Utc,
};
use chrono_tz::Tz;

use crate::error::TimeError;

/// The only zone the front-end supports.
pub const EASTERN: Tz = chrono_tz::America::New_York;

/// Rendered for an absent instant.
pub const ABSENT: &str = "-";

/// Rendered for an instant that cannot be parsed or formatted.
pub const INVALID_DATE: &str = "Invalid Date";

/// Zone label used when no abbreviation can be derived.
const FALLBACK_ZONE_LABEL: &str = "ET";

/// `D` marks a digit; every other byte must match literally.
const WALL_CLOCK_SHAPE: &[u8; 16] = b"DDDD-DD-DDTDD:DD";

/// What [`EasternConverter::to_utc`] does with malformed or empty input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputPolicy {
    /// Substitute the current instant and log a warning.
    #[default]
    FallbackToNow,
    /// Return [`TimeError`] to the caller.
    Reject,
}

impl InputPolicy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FallbackToNow => "fallback-now",
            Self::Reject => "reject",
        }
    }
}

impl FromStr for InputPolicy {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fallback-now" | "fallback" | "now" => Ok(Self::FallbackToNow),
            "reject" | "strict" => Ok(Self::Reject),
            _ => Err(TimeError::UnknownPolicy {
                name: s.to_string(),
            }),
        }
    }
}

/// How an instant is rendered for a human.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayFormat {
    /// `12/21/2024, 03:45:30 PM`
    #[default]
    Datetime,
    /// `12/21/2024`
    Date,
    /// `03:45:30 PM`
    Time,
    /// `Dec 21, 2024, 3:45 PM`
    Short,
    /// `12/21/2024, 03:45:30 PM EST`
    WithZone,
}

impl DisplayFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Datetime => "datetime",
            Self::Date => "date",
            Self::Time => "time",
            Self::Short => "short",
            Self::WithZone => "withZone",
        }
    }

    const fn pattern(self) -> &'static str {
        match self {
            Self::Datetime | Self::WithZone => "%m/%d/%Y, %I:%M:%S %p",
            Self::Date => "%m/%d/%Y",
            Self::Time => "%I:%M:%S %p",
            Self::Short => "%b %-d, %Y, %-I:%M %p",
        }
    }
}

impl FromStr for DisplayFormat {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "datetime" => Ok(Self::Datetime),
            "date" => Ok(Self::Date),
            "time" => Ok(Self::Time),
            "short" => Ok(Self::Short),
            "withZone" | "with-zone" | "withzone" => Ok(Self::WithZone),
            _ => Err(TimeError::UnknownFormat {
                name: s.to_string(),
            }),
        }
    }
}

/// Converts Eastern wall-clock input into UTC instants.
#[derive(Debug, Clone, Copy, Default)]
pub struct EasternConverter {
    policy: InputPolicy,
}

impl EasternConverter {
    pub const fn new(policy: InputPolicy) -> Self {
        Self { policy }
    }

    pub const fn policy(&self) -> InputPolicy {
        self.policy
    }

    /// Resolve a `YYYY-MM-DDTHH:mm` Eastern wall-clock value to UTC.
    ///
    /// # Errors
    ///
    /// Only under [`InputPolicy::Reject`], when the value is empty,
    /// misshapen, or names no real date/time.
    pub fn to_utc(&self, local: &str) -> Result<DateTime<Utc>, TimeError> {
        self.to_utc_at(local, Utc::now())
    }

    /// As [`to_utc`](Self::to_utc), with `now` supplied for the fallback.
    ///
    /// # Errors
    ///
    /// Only under [`InputPolicy::Reject`].
    pub fn to_utc_at(&self, local: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, TimeError> {
        match parse_wall_clock(local) {
            Ok(naive) => Ok(resolve_eastern(naive, &Local)),
            Err(e) => match self.policy {
                InputPolicy::FallbackToNow => {
                    tracing::warn!(error = %e, "using current instant for unusable wall-clock input");
                    Ok(now)
                }
                InputPolicy::Reject => Err(e),
            },
        }
    }
}

/// Resolve an Eastern wall-clock value to UTC, falling back to now.
pub fn to_utc(local: &str) -> DateTime<Utc> {
    let now = Utc::now();
    EasternConverter::default()
        .to_utc_at(local, now)
        .unwrap_or(now)
}

/// Structural and range check for `YYYY-MM-DDTHH:mm`.
///
/// Anything after the first sixteen characters (seconds from a picker
/// with a finer step, for instance) is ignored.
pub fn parse_wall_clock(local: &str) -> Result<NaiveDateTime, TimeError> {
    let malformed = || TimeError::MalformedWallClock {
        value: local.to_string(),
    };
    let bytes = local.trim().as_bytes();
    let prefix = bytes.get(..WALL_CLOCK_SHAPE.len()).ok_or_else(malformed)?;

    let shaped = prefix
        .iter()
        .zip(WALL_CLOCK_SHAPE)
        .all(|(byte, expected)| match expected {
            b'D' => byte.is_ascii_digit(),
            literal => byte == literal,
        });
    if !shaped {
        return Err(malformed());
    }

    let field = |start: usize, end: usize| {
        prefix
            .get(start..end)
            .map(|digits| {
                digits
                    .iter()
                    .fold(0_u32, |acc, d| acc * 10 + u32::from(d - b'0'))
            })
            .ok_or_else(malformed)
    };
    let (year, month, day) = (field(0, 4)?, field(5, 7)?, field(8, 10)?);
    let (hour, minute) = (field(11, 13)?, field(14, 16)?);

    let date = i32::try_from(year)
        .ok()
        .and_then(|year| NaiveDate::from_ymd_opt(year, month, day))
        .ok_or_else(|| TimeError::OutOfRange {
            value: local.to_string(),
            reason: "no such calendar date".to_string(),
        })?;
    date.and_hms_opt(hour, minute, 0)
        .ok_or_else(|| TimeError::OutOfRange {
            value: local.to_string(),
            reason: "no such time of day".to_string(),
        })
}

/// Resolve a naive Eastern wall-clock value against the zone rules.
///
/// Ambiguous fall-back readings resolve to standard time (the later
/// instant). Readings that fall into the spring-forward gap are read in
/// `fallback` instead. When `fallback` shares the gap, the reading moves
/// forward one hour past it; UTC is the last resort.
fn resolve_eastern<F: TimeZone>(naive: NaiveDateTime, fallback: &F) -> DateTime<Utc> {
    match EASTERN.from_local_datetime(&naive) {
        LocalResult::Single(eastern) => eastern.with_timezone(&Utc),
        LocalResult::Ambiguous(first, second) => {
            let (first, second) = (first.with_timezone(&Utc), second.with_timezone(&Utc));
            tracing::debug!(%naive, "ambiguous Eastern wall-clock, choosing standard time");
            first.max(second)
        }
        LocalResult::None => {
            tracing::debug!(%naive, "Eastern wall-clock falls in the DST gap, reading it naively");
            fallback
                .from_local_datetime(&naive)
                .earliest()
                .or_else(|| {
                    naive
                        .checked_add_signed(TimeDelta::hours(1))
                        .and_then(|later| fallback.from_local_datetime(&later).earliest())
                })
                .map_or_else(|| naive.and_utc(), |dt| dt.with_timezone(&Utc))
        }
    }
}

/// Canonical wire form of an instant: `YYYY-MM-DDTHH:mm:ss.sssZ`.
pub fn to_iso_string(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse an instant as the API or a caller may supply it.
///
/// Accepts RFC 3339, naive ISO date-times (read as UTC), bare dates
/// and four-digit years (UTC midnight), and longer integers as epoch
/// milliseconds.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    if raw.len() == 4 && raw.bytes().all(|b| b.is_ascii_digit()) {
        return raw
            .parse()
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc());
    }
    raw.parse::<i64>()
        .ok()
        .and_then(DateTime::from_timestamp_millis)
}

/// Render an optional instant string in Eastern Time.
///
/// Absent or empty input gives `"-"`; anything unparseable, including a
/// whitespace-only string, gives `"Invalid Date"`.
pub fn format(instant: Option<&str>, style: DisplayFormat) -> String {
    let Some(raw) = instant.filter(|raw| !raw.is_empty()) else {
        return ABSENT.to_string();
    };
    match parse_instant(raw) {
        Some(instant) => format_instant(instant, style),
        None => INVALID_DATE.to_string(),
    }
}

/// Render an instant in Eastern Time.
pub fn format_instant(instant: DateTime<Utc>, style: DisplayFormat) -> String {
    let eastern = instant.with_timezone(&EASTERN);
    let mut rendered = String::new();
    if let Err(e) = write!(rendered, "{}", eastern.format(style.pattern())) {
        tracing::error!(error = %e, style = style.as_str(), "failed to format instant");
        return INVALID_DATE.to_string();
    }
    if style == DisplayFormat::WithZone {
        rendered.push(' ');
        rendered.push_str(&zone_abbreviation(instant));
    }
    rendered
}

/// `EST` or `EDT` for the instant, or `ET` for anything else the zone
/// database reports (`LMT`, wartime `EWT`/`EPT`).
pub fn zone_abbreviation(instant: DateTime<Utc>) -> String {
    let mut name = String::new();
    let formatted = write!(name, "{}", instant.with_timezone(&EASTERN).format("%Z"));
    if formatted.is_ok() && matches!(name.as_str(), "EST" | "EDT") {
        name
    } else {
        FALLBACK_ZONE_LABEL.to_string()
    }
}

pub fn format_with_zone(instant: Option<&str>) -> String {
    format(instant, DisplayFormat::WithZone)
}

pub fn format_short(instant: Option<&str>) -> String {
    format(instant, DisplayFormat::Short)
}

pub fn format_date(instant: Option<&str>) -> String {
    format(instant, DisplayFormat::Date)
}

pub fn format_time_only(instant: Option<&str>) -> String {
    format(instant, DisplayFormat::Time)
}
