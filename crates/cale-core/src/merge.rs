//! Merging of sorted intervals into maximal windows.

use crate::time::Interval;

/// Merges intervals sorted ascending by start into maximal windows.
///
/// The input must already be sorted by `start`; this function does not sort.
/// An interval starting strictly after the current window's end opens a new
/// window. Anything else, including an interval starting exactly at the
/// current end, is absorbed: the window is replaced by one ending at the
/// later of the two ends.
///
/// Runs in a single pass.
pub fn merge(sorted: &[Interval]) -> Vec<Interval> {
    debug_assert!(
        sorted.windows(2).all(|w| w[0].start <= w[1].start),
        "merge input must be sorted by start"
    );

    let mut merged: Vec<Interval> = Vec::with_capacity(sorted.len());
    for current in sorted {
        if let Some(last) = merged.last_mut()
            && last.joins(current)
        {
            *last = last.extended_to(current.end());
            continue;
        }
        merged.push(*current);
    }
    merged
}
