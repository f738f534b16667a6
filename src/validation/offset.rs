/*!
 * Offset validation.
 *
 * An offset is the signed number of milliseconds applied uniformly to every
 * timestamp. It may arrive as an integer (library callers) or as text (the
 * command line); both go through the same bounds check.
 */

use std::fmt;
use std::str::FromStr;

use chrono::TimeDelta;
use log::debug;

use crate::errors::{Result, SubtitleError};

/// Largest accepted offset magnitude: 24 hours in milliseconds
pub const MAX_OFFSET_MS: i64 = 86_400_000;

/// A validated, signed shift in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Offset {
    millis: i64,
}

impl Offset {
    /// The identity shift
    pub const ZERO: Offset = Offset { millis: 0 };

    /// Validate a millisecond value; `±MAX_OFFSET_MS` are accepted
    pub fn from_millis(millis: i64) -> Result<Self> {
        if millis.unsigned_abs() > MAX_OFFSET_MS.unsigned_abs() {
            return Err(SubtitleError::offset(format!(
                "Offset too large (max ±24 hours = ±{}ms): {}ms",
                MAX_OFFSET_MS, millis
            )));
        }
        Ok(Self { millis })
    }

    /// Parse an integer-valued string such as `"1500"` or `"-250"`
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let millis: i64 = trimmed.parse().map_err(|e| {
            SubtitleError::offset(format!("Offset must be a number, got '{}': {}", trimmed, e))
        })?;
        Self::from_millis(millis)
    }

    pub fn as_millis(&self) -> i64 {
        self.millis
    }

    /// The offset as a signed duration
    pub fn as_duration(&self) -> TimeDelta {
        TimeDelta::milliseconds(self.millis)
    }

    pub fn is_negative(&self) -> bool {
        self.millis < 0
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.millis)
    }
}

impl FromStr for Offset {
    type Err = SubtitleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<i64> for Offset {
    type Error = SubtitleError;

    fn try_from(millis: i64) -> Result<Self> {
        Self::from_millis(millis)
    }
}

/// An offset as supplied by the caller, before validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawOffset {
    Millis(i64),
    Text(String),
}

impl From<i64> for RawOffset {
    fn from(millis: i64) -> Self {
        Self::Millis(millis)
    }
}

impl From<i32> for RawOffset {
    fn from(millis: i32) -> Self {
        Self::Millis(i64::from(millis))
    }
}

impl From<&str> for RawOffset {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for RawOffset {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl fmt::Display for RawOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Millis(millis) => write!(f, "{}", millis),
            Self::Text(text) => write!(f, "{}", text),
        }
    }
}

/// Turns raw caller input into an `Offset`
pub struct OffsetValidator;

impl OffsetValidator {
    pub fn validate(raw: impl Into<RawOffset>) -> Result<Offset> {
        let offset = match raw.into() {
            RawOffset::Millis(millis) => Offset::from_millis(millis)?,
            RawOffset::Text(text) => Offset::parse(&text)?,
        };
        debug!("Validated offset: {}", offset);
        Ok(offset)
    }
}
