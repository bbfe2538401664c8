//! Calendar-day bucketing and day labels.
//!
//! Two groupings exist and intentionally disagree on undated files:
//! - [`group_by_day`] is used by allocation and puts undated files on the
//!   day of `now`.
//! - [`group_for_display`] is used by catalog views and puts undated files
//!   in a separate [`DisplayDay::NoDate`] bucket after every dated one.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use chrono::{DateTime, NaiveDate, Utc};

use crate::media::MediaFile;

/// Default chrono pattern for day labels, e.g. "January 15, 2025".
pub const DEFAULT_DATE_FORMAT: &str = "%B %-d, %Y";

/// UTC calendar day containing a Unix timestamp in seconds.
///
/// Timestamps chrono cannot represent fall on the epoch day.
#[expect(
    clippy::cast_possible_truncation,
    reason = "timestamps are clamped to whole seconds before conversion"
)]
pub fn day_of(secs: f64) -> NaiveDate {
    DateTime::<Utc>::from_timestamp(secs.floor() as i64, 0)
        .unwrap_or_default()
        .date_naive()
}

/// Buckets files by capture day for allocation.
///
/// Files without a start time land on the day of `now_secs`.
pub fn group_by_day(files: &[MediaFile], now_secs: f64) -> BTreeMap<NaiveDate, Vec<&MediaFile>> {
    let mut days: BTreeMap<NaiveDate, Vec<&MediaFile>> = BTreeMap::new();
    for file in files {
        days.entry(day_of(file.start_or(now_secs)))
            .or_default()
            .push(file);
    }
    days
}

/// Bucket key for display grouping. Orders every dated day before `NoDate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DisplayDay {
    Day(NaiveDate),
    NoDate,
}

/// Buckets files by capture day for display, dated days ascending and
/// undated files last.
pub fn group_for_display(files: &[MediaFile]) -> Vec<(DisplayDay, Vec<&MediaFile>)> {
    let mut days: BTreeMap<DisplayDay, Vec<&MediaFile>> = BTreeMap::new();
    for file in files {
        let key = file
            .start_time
            .map_or(DisplayDay::NoDate, |secs| DisplayDay::Day(day_of(secs)));
        days.entry(key).or_default().push(file);
    }
    days.into_iter().collect()
}

/// Produces the human-readable labels used for sector names.
///
/// Injected into allocation so labels never depend on ambient locale state.
pub trait DayLabeler {
    /// The formatted date for a day. Reconciliation searches sector names
    /// for this string.
    fn format_day(&self, day: NaiveDate, locale: &str) -> String;

    /// The display name for a new sector. Must contain [`Self::format_day`].
    fn sector_name(&self, day: NaiveDate, locale: &str) -> String {
        self.format_day(day, locale)
    }
}

/// Formats days with a chrono `strftime` pattern.
///
/// Month and weekday names are English regardless of locale.
#[derive(Debug, Clone)]
pub struct PatternDayLabeler {
    pattern: String,
}

impl PatternDayLabeler {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }
}

impl Default for PatternDayLabeler {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_FORMAT)
    }
}

impl DayLabeler for PatternDayLabeler {
    fn format_day(&self, day: NaiveDate, _locale: &str) -> String {
        let mut label = String::new();
        if write!(label, "{}", day.format(&self.pattern)).is_err() {
            // Invalid pattern
            tracing::warn!(pattern = %self.pattern, "invalid date format, using ISO date");
            return day.format("%Y-%m-%d").to_string();
        }
        label
    }
}
