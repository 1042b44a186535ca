//! Rendering of merged intervals as schedule lines.
//!
//! Each line has two tab-separated fields, the date and the time:
//!
//! ```text
//! Fri 07 Mar	between 9:00 AM and 9:45 AM
//! Fri 07 Mar	10:00 AM
//! ```
//!
//! A window built from several slots shows its start and end, a single slot
//! shows only its start.

use chrono::{DateTime, Duration, FixedOffset};

use crate::time::Interval;

/// Date field: abbreviated weekday, zero-padded day, abbreviated month.
const DATE_FORMAT: &str = "%a %d %b";

/// Time field: 12-hour clock with AM/PM.
const TIME_FORMAT: &str = "%-I:%M %p";

/// Formats one interval as a schedule line.
///
/// `original_duration` is the event type's duration; an interval longer than
/// that is a merge of two or more slots and is shown as a range.
pub fn format_interval(interval: &Interval, original_duration: Duration) -> String {
    let date = interval.start.format(DATE_FORMAT);
    if interval.duration > original_duration {
        format!(
            "{}\tbetween {} and {}",
            date,
            format_time_of_day(&interval.start),
            format_time_of_day(&interval.end())
        )
    } else {
        format!("{}\t{}", date, format_time_of_day(&interval.start))
    }
}

/// Formats the wall-clock time of an instant, e.g. `9:45 AM`.
pub fn format_time_of_day(dt: &DateTime<FixedOffset>) -> String {
    dt.format(TIME_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(d: u32, h: u32, min: u32) -> DateTime<FixedOffset> {
        FixedOffset::west_opt(5 * 3600)
            .unwrap()
            .with_ymd_and_hms(2025, 3, d, h, min, 0)
            .unwrap()
    }

    #[test]
    fn single_slot_shows_start_only() {
        let interval = Interval::new(at(7, 10, 0), Duration::minutes(30));
        assert_eq!(
            format_interval(&interval, Duration::minutes(30)),
            "Fri 07 Mar\t10:00 AM"
        );
    }

    #[test]
    fn merged_window_shows_range() {
        let interval = Interval::new(at(7, 9, 0), Duration::minutes(45));
        assert_eq!(
            format_interval(&interval, Duration::minutes(30)),
            "Fri 07 Mar\tbetween 9:00 AM and 9:45 AM"
        );
    }

    #[test]
    fn afternoon_times() {
        let interval = Interval::new(at(10, 12, 30), Duration::minutes(120));
        assert_eq!(
            format_interval(&interval, Duration::minutes(60)),
            "Mon 10 Mar\tbetween 12:30 PM and 2:30 PM"
        );
    }

    #[test]
    fn time_of_day_has_no_leading_zero() {
        assert_eq!(format_time_of_day(&at(7, 9, 5)), "9:05 AM");
        assert_eq!(format_time_of_day(&at(7, 0, 0)), "12:00 AM");
        assert_eq!(format_time_of_day(&at(7, 23, 59)), "11:59 PM");
    }

    #[test]
    fn golden_week_schedule() {
        let slot = Duration::minutes(30);
        let lines: Vec<String> = [
            Interval::new(at(7, 9, 0), Duration::minutes(90)),
            Interval::new(at(7, 13, 0), slot),
            Interval::new(at(10, 8, 30), slot),
            Interval::new(at(10, 16, 0), Duration::minutes(60)),
        ]
        .iter()
        .map(|i| format_interval(i, slot))
        .collect();

        insta::assert_debug_snapshot!(lines, @r#"
        [
            "Fri 07 Mar\tbetween 9:00 AM and 10:30 AM",
            "Fri 07 Mar\t1:00 PM",
            "Mon 10 Mar\t8:30 AM",
            "Mon 10 Mar\tbetween 4:00 PM and 5:00 PM",
        ]
        "#);
    }
}
