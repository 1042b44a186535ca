//! Raw availability to schedule lines.
//!
//! The pipeline runs, in order:
//! 1. parse every raw slot timestamp
//! 2. drop slots rejected by the [`FilterConfig`]
//! 3. turn the remaining slots into intervals of the event duration
//! 4. sort by start
//! 5. merge touching and overlapping intervals
//! 6. format each merged interval
//!
//! An empty upstream day list is reported as [`CoreError::NoAvailability`].
//! Filtering everything away is not an error and yields no lines.

use chrono::Duration;
use serde::Deserialize;
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::filter::FilterConfig;
use crate::format::format_interval;
use crate::merge::merge;
use crate::time::{Interval, Slot};

/// A slot as reported by the scheduling service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawSlot {
    /// RFC 3339 start timestamp.
    pub start_time: String,
    /// Service-side status, e.g. `available`.
    #[serde(default)]
    pub status: String,
}

impl RawSlot {
    /// Creates a raw slot.
    pub fn new(start_time: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            start_time: start_time.into(),
            status: status.into(),
        }
    }
}

/// One day of the queried range with its offered slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SlotDay {
    /// Calendar date as reported (`YYYY-MM-DD`).
    pub date: String,
    /// Service-side day status.
    #[serde(default)]
    pub status: String,
    /// Offered slots, in the order the service returned them.
    #[serde(default)]
    pub slots: Vec<RawSlot>,
}

impl SlotDay {
    /// Creates a day entry.
    pub fn new(date: impl Into<String>, status: impl Into<String>, slots: Vec<RawSlot>) -> Self {
        Self {
            date: date.into(),
            status: status.into(),
            slots,
        }
    }
}

/// Filter, merge and format pipeline for one event type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityPipeline {
    duration: Duration,
    filter: FilterConfig,
}

impl AvailabilityPipeline {
    /// Creates a pipeline for slots of the given duration.
    pub fn new(duration: Duration, filter: FilterConfig) -> Self {
        Self { duration, filter }
    }

    /// Returns the event duration shared by all slots.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Returns the filter applied to each slot.
    pub fn filter(&self) -> &FilterConfig {
        &self.filter
    }

    /// Runs the whole pipeline and returns schedule lines in chronological
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NoAvailability`] if `days` is empty and
    /// [`CoreError::TimeParse`] if any slot timestamp is invalid.
    pub fn run(&self, days: &[SlotDay]) -> CoreResult<Vec<String>> {
        let merged = self.merged_intervals(days)?;
        Ok(merged
            .iter()
            .map(|interval| format_interval(interval, self.duration))
            .collect())
    }

    /// Runs every step except formatting.
    ///
    /// # Errors
    ///
    /// Same as [`run`](Self::run).
    pub fn merged_intervals(&self, days: &[SlotDay]) -> CoreResult<Vec<Interval>> {
        if days.is_empty() {
            return Err(CoreError::NoAvailability);
        }

        let slots = days
            .iter()
            .flat_map(|day| day.slots.iter())
            .map(|raw| Slot::parse(&raw.start_time))
            .collect::<CoreResult<Vec<_>>>()?;
        let parsed = slots.len();

        let mut intervals: Vec<Interval> = slots
            .into_iter()
            .filter(|slot| self.filter.accepts(slot, self.duration))
            .map(|slot| slot.to_interval(self.duration))
            .collect();
        let accepted = intervals.len();

        intervals.sort_by_key(|interval| interval.start);
        let merged = merge(&intervals);

        debug!(
            days = days.len(),
            parsed,
            accepted,
            merged = merged.len(),
            "availability pipeline finished"
        );
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::TimeOfDay;

    fn day(date: &str, times: &[&str]) -> SlotDay {
        SlotDay::new(
            date,
            "available",
            times
                .iter()
                .map(|t| RawSlot::new(format!("{date}T{t}:00-05:00"), "available"))
                .collect(),
        )
    }

    fn tod(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    fn run(days: &[SlotDay], duration: Duration, filter: FilterConfig) -> CoreResult<Vec<String>> {
        AvailabilityPipeline::new(duration, filter).run(days)
    }

    #[test]
    fn empty_upstream_is_no_availability() {
        let err = run(&[], Duration::minutes(30), FilterConfig::new()).unwrap_err();
        assert_eq!(err, CoreError::NoAvailability);
    }

    #[test]
    fn days_without_slots_are_not_an_error() {
        let lines = run(
            &[SlotDay::new("2025-03-07", "unavailable", vec![])],
            Duration::minutes(30),
            FilterConfig::new(),
        )
        .unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn filtered_to_empty_is_not_an_error() {
        let days = [day("2025-03-08", &["09:00", "10:00"])];
        let filter = FilterConfig::new().with_weekdays_only(true);
        let lines = run(&days, Duration::minutes(30), filter).unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn merges_and_formats() {
        let days = [day("2025-03-07", &["09:00", "09:15", "10:00"])];
        let lines = run(&days, Duration::minutes(30), FilterConfig::new()).unwrap();
        assert_eq!(
            lines,
            vec![
                "Fri 07 Mar\tbetween 9:00 AM and 9:45 AM".to_string(),
                "Fri 07 Mar\t10:00 AM".to_string(),
            ]
        );
    }

    #[test]
    fn filters_before_merging() {
        // The 4:30 PM slot would extend the window; end-by removes it first.
        let days = [day("2025-03-07", &["15:30", "16:00", "16:30"])];
        let filter = FilterConfig::new().with_end_by(tod("4:45 PM"));
        let lines = run(&days, Duration::minutes(30), filter).unwrap();
        assert_eq!(lines, vec!["Fri 07 Mar\tbetween 3:30 PM and 4:30 PM".to_string()]);
    }

    #[test]
    fn sorts_unordered_input() {
        let days = [
            day("2025-03-10", &["09:00"]),
            day("2025-03-07", &["10:00", "09:30"]),
        ];
        let pipeline = AvailabilityPipeline::new(Duration::minutes(30), FilterConfig::new());
        let merged = pipeline.merged_intervals(&days).unwrap();
        assert_eq!(merged.len(), 2);
        assert!(merged[0].start < merged[1].start);
        assert_eq!(merged[0].duration, Duration::minutes(60));

        let lines = pipeline.run(&days).unwrap();
        assert_eq!(
            lines,
            vec![
                "Fri 07 Mar\tbetween 9:30 AM and 10:30 AM".to_string(),
                "Mon 10 Mar\t9:00 AM".to_string(),
            ]
        );
    }

    #[test]
    fn windows_do_not_merge_across_days() {
        let days = [
            day("2025-03-07", &["09:00"]),
            day("2025-03-10", &["09:00"]),
        ];
        let lines = run(&days, Duration::minutes(30), FilterConfig::new()).unwrap();
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn bad_timestamp_aborts() {
        let days = [SlotDay::new(
            "2025-03-07",
            "available",
            vec![
                RawSlot::new("2025-03-07T09:00:00-05:00", "available"),
                RawSlot::new("not a time", "available"),
            ],
        )];
        let err = run(&days, Duration::minutes(30), FilterConfig::new()).unwrap_err();
        assert!(matches!(err, CoreError::TimeParse { .. }));
    }

    #[test]
    fn accessors() {
        let filter = FilterConfig::new().with_weekdays_only(true);
        let pipeline = AvailabilityPipeline::new(Duration::minutes(45), filter);
        assert_eq!(pipeline.duration(), Duration::minutes(45));
        assert_eq!(pipeline.filter(), &filter);
    }

    #[test]
    fn raw_types_deserialize() {
        let day: SlotDay = serde_json::from_str(
            r#"{"date":"2025-03-07","slots":[{"start_time":"2025-03-07T09:00:00-05:00"}]}"#,
        )
        .unwrap();
        assert_eq!(day.status, "");
        assert_eq!(day.slots[0].status, "");
        assert_eq!(day.slots[0].start_time, "2025-03-07T09:00:00-05:00");
    }
}
