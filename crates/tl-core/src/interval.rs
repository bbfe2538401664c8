//! Time intervals and the guarded overlap test.

use serde::{Deserialize, Serialize};

/// Tolerance in seconds subtracted from interval ends before testing overlap.
///
/// Clips butted end to end after trimming must still count as sequential.
pub const GUARD_SECS: f64 = 1.0;

/// A half-open `[start, end)` span in seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub start: f64,
    pub end: f64,
}

impl Interval {
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Guarded overlap against another interval. See [`overlaps`].
    pub fn overlaps(&self, other: &Self) -> bool {
        overlaps(self.start, self.end, other.start, other.end)
    }
}

/// Returns true if two intervals overlap by more than [`GUARD_SECS`].
///
/// Symmetric but not transitive: a clip clear of one member of a track may
/// still collide with another, so callers check every member.
pub fn overlaps(start1: f64, end1: f64, start2: f64, end2: f64) -> bool {
    start1 < end2 - GUARD_SECS && start2 < end1 - GUARD_SECS
}

/// Merges intervals into a sorted list of disjoint spans.
///
/// Intervals that touch or overlap are joined. Inputs need not be sorted.
pub fn merge_intervals(intervals: &[Interval]) -> Vec<Interval> {
    let mut sorted: Vec<Interval> = intervals.to_vec();
    sorted.sort_by(|a, b| a.start.total_cmp(&b.start));

    let mut merged: Vec<Interval> = Vec::new();
    for interval in sorted {
        if let Some(last) = merged.last_mut() {
            if interval.start <= last.end {
                last.end = last.end.max(interval.end);
            } else {
                merged.push(interval);
            }
        } else {
            merged.push(interval);
        }
    }
    merged
}
