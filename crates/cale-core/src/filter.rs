//! Time-window filtering of candidate slots.

use chrono::{Datelike, Duration, Weekday};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::time::{Slot, TimeOfDay};

/// Restrictions applied to every candidate slot.
///
/// Unset fields impose no constraint. Built once by the caller and passed by
/// value into the pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Reject slots starting after this time on their own day.
    pub start_by: Option<TimeOfDay>,
    /// Reject slots ending after this time on their start day.
    pub end_by: Option<TimeOfDay>,
    /// Reject slots starting on Saturday or Sunday.
    pub weekdays_only: bool,
}

impl FilterConfig {
    /// Creates a filter config that accepts every slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the start-by cutoff.
    #[must_use]
    pub fn with_start_by(mut self, cutoff: TimeOfDay) -> Self {
        self.start_by = Some(cutoff);
        self
    }

    /// Builder method to set the end-by cutoff.
    #[must_use]
    pub fn with_end_by(mut self, cutoff: TimeOfDay) -> Self {
        self.end_by = Some(cutoff);
        self
    }

    /// Builder method to restrict slots to Monday through Friday.
    #[must_use]
    pub fn with_weekdays_only(mut self, weekdays_only: bool) -> Self {
        self.weekdays_only = weekdays_only;
        self
    }

    /// Returns `true` if the slot passes every configured check.
    pub fn accepts(&self, slot: &Slot, duration: Duration) -> bool {
        accept(slot, duration, self)
    }
}

/// Decides whether a slot of the given duration passes the filter.
///
/// Cutoffs are built on the calendar day of the slot's start, in the slot's
/// own offset. A slot starting exactly at the start-by cutoff, or ending
/// exactly at the end-by cutoff, is accepted.
pub fn accept(slot: &Slot, duration: Duration, config: &FilterConfig) -> bool {
    if let Some(start_by) = config.start_by {
        let cutoff = start_by.cutoff_on(&slot.start);
        if slot.start > cutoff {
            trace!(start = %slot.start, %cutoff, "slot starts after start-by cutoff");
            return false;
        }
    }

    if let Some(end_by) = config.end_by {
        let cutoff = end_by.cutoff_on(&slot.start);
        let end = slot.end(duration);
        if end > cutoff {
            trace!(start = %slot.start, %end, %cutoff, "slot ends after end-by cutoff");
            return false;
        }
    }

    if config.weekdays_only && matches!(slot.start.weekday(), Weekday::Sat | Weekday::Sun) {
        trace!(start = %slot.start, "slot falls on a weekend");
        return false;
    }

    true
}
