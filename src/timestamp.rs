/*!
 * SRT timestamps.
 *
 * A `Timestamp` is a non-negative point in time with millisecond resolution,
 * written as `HH:MM:SS,mmm`. Hours are capped at 99 because the text form
 * only has two digits for them.
 */

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{Result, SubtitleError};
use crate::validation::Offset;

/// Highest hour value the two-digit SRT field can hold
pub const MAX_HOURS: u32 = 99;

const MS_PER_SECOND: u64 = 1_000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;

// @const: Exact SRT timestamp pattern, ASCII digits only
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{2}):([0-9]{2}):([0-9]{2}),([0-9]{3})$").expect("valid timestamp regex")
});

/// A validated `HH:MM:SS,mmm` timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp {
    hours: u32,
    minutes: u32,
    seconds: u32,
    milliseconds: u32,
}

impl Timestamp {
    /// `00:00:00,000`
    pub const ZERO: Timestamp = Timestamp {
        hours: 0,
        minutes: 0,
        seconds: 0,
        milliseconds: 0,
    };

    /// Build a timestamp from its fields, rejecting any out-of-range value
    pub fn new(hours: u32, minutes: u32, seconds: u32, milliseconds: u32) -> Result<Self> {
        if hours > MAX_HOURS {
            return Err(SubtitleError::timestamp(format!("Hours must be 0-99, got {}", hours)));
        }
        if minutes > 59 {
            return Err(SubtitleError::timestamp(format!("Minutes must be 0-59, got {}", minutes)));
        }
        if seconds > 59 {
            return Err(SubtitleError::timestamp(format!("Seconds must be 0-59, got {}", seconds)));
        }
        if milliseconds > 999 {
            return Err(SubtitleError::timestamp(format!(
                "Milliseconds must be 0-999, got {}",
                milliseconds
            )));
        }

        Ok(Self {
            hours,
            minutes,
            seconds,
            milliseconds,
        })
    }

    /// Parse the exact `HH:MM:SS,mmm` form
    pub fn parse(text: &str) -> Result<Self> {
        let caps = TIMESTAMP_REGEX
            .captures(text)
            .ok_or_else(|| SubtitleError::timestamp(format!("Invalid timestamp format: {}", text)))?;

        let field = |idx: usize| -> Result<u32> {
            caps[idx].parse::<u32>().map_err(|e| {
                SubtitleError::timestamp(format!("Could not parse timestamp '{}': {}", text, e))
            })
        };

        Self::new(field(1)?, field(2)?, field(3)?, field(4)?)
    }

    /// Build a timestamp from a millisecond count; negative values are rejected
    pub fn from_millis(millis: i64) -> Result<Self> {
        if millis < 0 {
            return Err(SubtitleError::timestamp(format!(
                "Cannot represent negative time: {}ms",
                millis
            )));
        }
        let millis = millis as u64;

        let hours = millis / MS_PER_HOUR;
        if hours > u64::from(MAX_HOURS) {
            return Err(SubtitleError::timestamp(format!(
                "Hours exceed SRT format limit: {}",
                hours
            )));
        }

        Self::new(
            hours as u32,
            ((millis % MS_PER_HOUR) / MS_PER_MINUTE) as u32,
            ((millis % MS_PER_MINUTE) / MS_PER_SECOND) as u32,
            (millis % MS_PER_SECOND) as u32,
        )
    }

    /// Build a timestamp from a duration, truncating below one millisecond
    pub fn from_duration(duration: Duration) -> Result<Self> {
        let millis = i64::try_from(duration.as_millis()).map_err(|_| {
            SubtitleError::timestamp(format!("Duration too large for SRT: {:?}", duration))
        })?;
        Self::from_millis(millis)
    }

    /// Total milliseconds since zero
    pub fn as_millis(&self) -> u64 {
        u64::from(self.hours) * MS_PER_HOUR
            + u64::from(self.minutes) * MS_PER_MINUTE
            + u64::from(self.seconds) * MS_PER_SECOND
            + u64::from(self.milliseconds)
    }

    pub fn to_duration(&self) -> Duration {
        Duration::from_millis(self.as_millis())
    }

    /// Move the timestamp by `offset`, clamping at zero
    ///
    /// Fails only when the result would need more than 99 hours.
    pub fn shift(&self, offset: Offset) -> Result<Self> {
        let shifted = (self.as_millis() as i64 + offset.as_millis()).max(0);
        Self::from_millis(shifted)
    }

    /// Canonical `HH:MM:SS,mmm` text
    pub fn format(&self) -> String {
        self.to_string()
    }

    pub fn hours(&self) -> u32 {
        self.hours
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    pub fn milliseconds(&self) -> u32 {
        self.milliseconds
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02},{:03}",
            self.hours, self.minutes, self.seconds, self.milliseconds
        )
    }
}

impl FromStr for Timestamp {
    type Err = SubtitleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<Duration> for Timestamp {
    type Error = SubtitleError;

    fn try_from(duration: Duration) -> Result<Self> {
        Self::from_duration(duration)
    }
}

impl From<Timestamp> for Duration {
    fn from(timestamp: Timestamp) -> Self {
        timestamp.to_duration()
    }
}
