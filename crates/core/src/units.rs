//! Unit-carrying values used in rollover thresholds.
//!
//! [`ByteSize`] and [`TimeValue`] parse the compact unit notation used in
//! lifecycle policies (`"50gb"`, `"30d"`) and format back to the largest
//! unit that represents the value exactly.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

const KB: u64 = 1 << 10;
const MB: u64 = 1 << 20;
const GB: u64 = 1 << 30;
const TB: u64 = 1 << 40;
const PB: u64 = 1 << 50;

/// Byte units from largest to smallest; longer suffixes must be matched first.
const BYTE_UNITS: &[(&str, u64)] = &[
    ("pb", PB),
    ("tb", TB),
    ("gb", GB),
    ("mb", MB),
    ("kb", KB),
    ("p", PB),
    ("t", TB),
    ("g", GB),
    ("m", MB),
    ("k", KB),
    ("b", 1),
];

/// Units used when formatting, largest first.
const BYTE_DISPLAY_UNITS: &[(&str, u64)] = &[
    ("pb", PB),
    ("tb", TB),
    ("gb", GB),
    ("mb", MB),
    ("kb", KB),
];

/// A size in bytes, e.g. the `max_size` rollover threshold.
///
/// # Examples
///
/// ```
/// use ilm_core::ByteSize;
///
/// let size: ByteSize = "50gb".parse().unwrap();
/// assert_eq!(size.bytes(), 50 * 1024 * 1024 * 1024);
/// assert_eq!(size.to_string(), "50gb");
/// ```
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ByteSize(u64);

impl ByteSize {
    /// Wrap a raw byte count.
    #[must_use]
    pub const fn from_bytes(bytes: u64) -> Self {
        Self(bytes)
    }

    /// Size in kibibytes.
    #[must_use]
    pub const fn from_kb(kb: u64) -> Self {
        Self(kb * KB)
    }

    /// Size in mebibytes.
    #[must_use]
    pub const fn from_mb(mb: u64) -> Self {
        Self(mb * MB)
    }

    /// Size in gibibytes.
    #[must_use]
    pub const fn from_gb(gb: u64) -> Self {
        Self(gb * GB)
    }

    /// Raw byte count.
    #[must_use]
    pub const fn bytes(self) -> u64 {
        self.0
    }

    /// Parse a size string such as `"512mb"`, `"1.5gb"` or `"0"`.
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        let invalid = |reason| CoreError::InvalidByteSize {
            input: input.to_owned(),
            reason,
        };

        let normalized = input.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            return Err(invalid("value is empty"));
        }
        if normalized == "0" {
            return Ok(Self(0));
        }
        if normalized.starts_with('-') {
            return Err(invalid("negative sizes are not supported"));
        }

        let (number, multiplier) = BYTE_UNITS
            .iter()
            .find_map(|(suffix, mult)| normalized.strip_suffix(suffix).map(|n| (n, *mult)))
            .ok_or_else(|| invalid("unit is missing or unrecognized"))?;
        let number = number.trim();

        if multiplier == 1 {
            return number
                .parse::<u64>()
                .map(Self)
                .map_err(|_| invalid("expected a whole number of bytes"));
        }

        let value: f64 = number
            .parse()
            .map_err(|_| invalid("expected a number before the unit"))?;
        if !value.is_finite() || value < 0.0 {
            return Err(invalid("expected a finite, non-negative number"));
        }
        let bytes = value * multiplier as f64;
        if bytes > u64::MAX as f64 {
            return Err(invalid("value overflows a 64-bit byte count"));
        }
        Ok(Self(bytes as u64))
    }
}

impl fmt::Display for ByteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.0;
        if bytes == 0 {
            return f.write_str("0b");
        }
        if let Some((suffix, unit)) = BYTE_DISPLAY_UNITS
            .iter()
            .find(|(_, unit)| bytes >= *unit && bytes % unit == 0)
        {
            return write!(f, "{}{suffix}", bytes / unit);
        }
        match BYTE_DISPLAY_UNITS.iter().find(|(_, unit)| bytes >= *unit) {
            Some((suffix, unit)) => write!(f, "{:.1}{suffix}", bytes as f64 / *unit as f64),
            None => write!(f, "{bytes}b"),
        }
    }
}

impl FromStr for ByteSize {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ByteSize {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ByteSize {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Bytes(u64),
            Text(String),
        }

        match Raw::deserialize(d)? {
            Raw::Bytes(bytes) => Ok(Self(bytes)),
            Raw::Text(text) => Self::parse(&text).map_err(serde::de::Error::custom),
        }
    }
}

/// Time units from the longest suffix to the shortest; `ms` before `m`/`s`.
const TIME_UNITS: &[(&str, u64)] = &[
    ("nanos", 1),
    ("micros", 1_000),
    ("ms", 1_000_000),
    ("s", 1_000_000_000),
    ("m", 60 * 1_000_000_000),
    ("h", 60 * 60 * 1_000_000_000),
    ("d", 24 * 60 * 60 * 1_000_000_000),
];

/// A duration expressed in policy notation, e.g. the `max_age` threshold.
///
/// # Examples
///
/// ```
/// use ilm_core::TimeValue;
/// use std::time::Duration;
///
/// let age: TimeValue = "30d".parse().unwrap();
/// assert_eq!(age.as_duration(), Duration::from_secs(30 * 24 * 3600));
/// assert_eq!(age.to_string(), "30d");
/// ```
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeValue(Duration);

impl TimeValue {
    /// Wrap a [`Duration`].
    #[must_use]
    pub const fn new(duration: Duration) -> Self {
        Self(duration)
    }

    /// Whole seconds.
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self(Duration::from_secs(secs))
    }

    /// Whole hours.
    #[must_use]
    pub const fn from_hours(hours: u64) -> Self {
        Self(Duration::from_secs(hours * 3600))
    }

    /// Whole days.
    #[must_use]
    pub const fn from_days(days: u64) -> Self {
        Self(Duration::from_secs(days * 24 * 3600))
    }

    /// The wrapped duration.
    #[must_use]
    pub const fn as_duration(self) -> Duration {
        self.0
    }

    /// Parse a time string such as `"30d"`, `"12h"` or `"500ms"`.
    ///
    /// Fractional and negative values (including the `-1` "unset" marker)
    /// are rejected.
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        let invalid = |reason| CoreError::InvalidTimeValue {
            input: input.to_owned(),
            reason,
        };

        let normalized = input.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            return Err(invalid("value is empty"));
        }
        if normalized.starts_with('-') {
            return Err(invalid("negative time values are not supported"));
        }

        let (number, nanos_per_unit) = TIME_UNITS
            .iter()
            .find_map(|(suffix, nanos)| normalized.strip_suffix(suffix).map(|n| (n, *nanos)))
            .ok_or_else(|| invalid("unit is missing or unrecognized"))?;
        let number = number.trim();

        if number.contains('.') {
            return Err(invalid("fractional time values are not supported"));
        }
        let count: u64 = number
            .parse()
            .map_err(|_| invalid("expected a whole number before the unit"))?;
        let nanos = count
            .checked_mul(nanos_per_unit)
            .ok_or_else(|| invalid("value overflows the supported range"))?;
        Ok(Self(Duration::from_nanos(nanos)))
    }
}

impl From<Duration> for TimeValue {
    fn from(duration: Duration) -> Self {
        Self(duration)
    }
}

impl From<TimeValue> for Duration {
    fn from(value: TimeValue) -> Self {
        value.0
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nanos = self.0.as_nanos();
        if nanos == 0 {
            return f.write_str("0s");
        }
        let (suffix, unit) = TIME_UNITS
            .iter()
            .rev()
            .find(|(_, unit)| nanos % u128::from(*unit) == 0)
            .copied()
            .unwrap_or(("nanos", 1));
        write!(f, "{}{suffix}", nanos / u128::from(unit))
    }
}

impl FromStr for TimeValue {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for TimeValue {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeValue {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let text = String::deserialize(d)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
