//! Duration value object

use std::fmt;
use std::str::FromStr;

use crate::domain::error::DurationParseError;

/// Default recording duration when no valid input is given (60 minutes)
pub const DEFAULT_DURATION_MINUTES: u64 = 60;

/// Value object representing a recording length.
/// Minute-granular on input, stored as seconds. Immutable and always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Duration {
    seconds: u64,
}

impl Duration {
    /// Create a Duration from whole minutes. Zero minutes is not a valid
    /// recording length; callers validate before construction.
    pub const fn from_minutes(minutes: u64) -> Self {
        Self {
            seconds: minutes * 60,
        }
    }

    /// Default recording duration (60 minutes)
    pub const fn default_duration() -> Self {
        Self::from_minutes(DEFAULT_DURATION_MINUTES)
    }

    /// Get duration in seconds
    pub const fn as_secs(&self) -> u64 {
        self.seconds
    }

    /// Get duration in whole minutes (rounded down)
    pub const fn as_minutes(&self) -> u64 {
        self.seconds / 60
    }

    /// Number of sample frames a capture of this duration produces
    pub const fn frame_count(&self, sample_rate: u32) -> u64 {
        self.seconds * sample_rate as u64
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} minutes", self.seconds as f64 / 60.0)
    }
}

impl FromStr for Duration {
    type Err = DurationParseError;

    /// Parse user input as a whole number of minutes. Non-numeric or
    /// non-positive input is rejected; callers fall back to the default.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let minutes: i64 = trimmed.parse().map_err(|_| DurationParseError {
            input: trimmed.to_string(),
        })?;
        if minutes <= 0 {
            return Err(DurationParseError {
                input: trimmed.to_string(),
            });
        }
        Ok(Self::from_minutes(minutes as u64))
    }
}
