//! Time types for availability slots.
//!
//! This module provides [`Slot`] for a single offered start time,
//! [`Interval`] for a start plus duration (one slot or several merged
//! slots), and [`TimeOfDay`] for same-day cutoffs such as `5 PM`.
//!
//! All timestamps keep the UTC offset reported by the scheduling service, so
//! dates, weekdays and cutoffs are evaluated on the wall clock the service
//! used for each slot.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{DateTime, Duration, FixedOffset, NaiveTime, Timelike};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Accepted cutoff forms: `3`, `3PM`, `3 PM`, `3:04PM`, `3:04 PM`.
///
/// Minutes are only accepted together with a meridiem.
static TIME_OF_DAY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})(?:(?::(\d{2}))? ?([AaPp][Mm]))?$").expect("Invalid time-of-day regex")
});

/// A single offered start time for an event type.
///
/// The duration is not stored per slot: every slot of one event type shares
/// the duration from the event-type metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    /// Start of the slot, in the offset the service reported.
    pub start: DateTime<FixedOffset>,
}

impl Slot {
    /// Creates a slot from an already parsed start time.
    pub fn new(start: DateTime<FixedOffset>) -> Self {
        Self { start }
    }

    /// Parses an RFC 3339 start timestamp as returned by the service.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::TimeParse`] if the timestamp is not valid RFC 3339.
    pub fn parse(start_time: &str) -> CoreResult<Self> {
        DateTime::parse_from_rfc3339(start_time)
            .map(Self::new)
            .map_err(|e| CoreError::time_parse(start_time, e.to_string()))
    }

    /// Returns the end of this slot for the given event duration.
    pub fn end(&self, duration: Duration) -> DateTime<FixedOffset> {
        self.start + duration
    }

    /// Converts this slot into an interval of the given duration.
    pub fn to_interval(&self, duration: Duration) -> Interval {
        Interval::new(self.start, duration)
    }
}

/// A start time plus a duration.
///
/// The end is derived, never stored. Merging produces new intervals instead
/// of editing existing ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    /// Start of the interval.
    pub start: DateTime<FixedOffset>,
    /// Length of the interval.
    pub duration: Duration,
}

impl Interval {
    /// Creates a new interval.
    pub fn new(start: DateTime<FixedOffset>, duration: Duration) -> Self {
        Self { start, duration }
    }

    /// Returns `start + duration`, in the start's offset.
    pub fn end(&self) -> DateTime<FixedOffset> {
        self.start + self.duration
    }

    /// Returns an interval with the same start that ends at the later of
    /// its current end and `end`.
    ///
    /// The duration never shrinks.
    #[must_use]
    pub fn extended_to(&self, end: DateTime<FixedOffset>) -> Self {
        let end = self.end().max(end);
        Self::new(self.start, end - self.start)
    }

    /// Returns `true` if `next` starts no later than this interval ends.
    ///
    /// Touching intervals (`next.start == self.end()`) count as joinable.
    pub fn joins(&self, next: &Interval) -> bool {
        next.start <= self.end()
    }

    /// Returns `true` if the instant falls within `[start, end)`.
    pub fn contains(&self, instant: DateTime<FixedOffset>) -> bool {
        self.start <= instant && instant < self.end()
    }
}

/// A time-of-day boundary, independent of any date.
///
/// Parsed from the forms `3`, `3PM`, `3 PM`, `3:04PM` and `3:04 PM`. A bare
/// hour without a meridiem is read as written (`3` is 03:00). The meridiem
/// is case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    /// Creates a time of day from a 24-hour clock hour and a minute.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::TimeParse`] if the hour or minute is out of range.
    pub fn new(hour: u32, minute: u32) -> CoreResult<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(|| {
                CoreError::time_parse(format!("{hour:02}:{minute:02}"), "hour or minute out of range")
            })
    }

    /// Returns the hour on a 24-hour clock.
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute.
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Builds the cutoff instant on the same calendar day as `start`, in
    /// `start`'s offset.
    pub fn cutoff_on(&self, start: &DateTime<FixedOffset>) -> DateTime<FixedOffset> {
        *start + (self.0 - start.time())
    }
}

impl FromStr for TimeOfDay {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let caps = TIME_OF_DAY_REGEX
            .captures(input)
            .ok_or_else(|| CoreError::time_parse(s, "expected one of 3, 3PM, 3 PM, 3:04PM, 3:04 PM"))?;

        let hour: u32 = caps[1]
            .parse()
            .map_err(|_| CoreError::time_parse(s, "invalid hour"))?;
        if hour > 12 {
            return Err(CoreError::time_parse(s, "hour out of range"));
        }

        let minute: u32 = match caps.get(2) {
            Some(m) => m
                .as_str()
                .parse()
                .map_err(|_| CoreError::time_parse(s, "invalid minute"))?,
            None => 0,
        };
        if minute > 59 {
            return Err(CoreError::time_parse(s, "minute out of range"));
        }

        let meridiem = caps.get(3).map(|m| m.as_str().to_ascii_uppercase());
        let hour = match meridiem.as_deref() {
            Some("PM") if hour < 12 => hour + 12,
            Some("AM") if hour == 12 => 0,
            _ => hour,
        };

        Self::new(hour, minute).map_err(|_| CoreError::time_parse(s, "hour or minute out of range"))
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%-I:%M %p"))
    }
}
