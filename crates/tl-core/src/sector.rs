//! Sectors: one calendar day of footage.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::day::DayLabeler;
use crate::interval::{Interval, merge_intervals};
use crate::track::Track;
use crate::types::{SectorId, TrackKind};

/// Pre-compiled pattern for camera numbers embedded in track names.
static CAMERA_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Camera (\d+)").unwrap());

const fn default_zoom_level() -> f64 {
    1.0
}

/// The tracks of one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sector {
    pub id: SectorId,

    /// Display name containing the formatted date.
    pub name: String,

    #[serde(default)]
    pub tracks: Vec<Track>,

    /// Merged spans covered by every member of every track.
    #[serde(default)]
    pub time_ranges: Vec<Interval>,

    /// Earliest member start, or 0 when no track has members.
    #[serde(default)]
    pub start_time: f64,

    /// Latest member end, or 0 when no track has members.
    #[serde(default)]
    pub end_time: f64,

    /// UI state. Initialized here, never recomputed.
    #[serde(default = "default_zoom_level")]
    pub zoom_level: f64,

    /// UI state. Initialized here, never recomputed.
    #[serde(default)]
    pub scroll_position: f64,

    /// Highest camera number issued to a track in this sector.
    #[serde(default)]
    pub camera_counter: u32,
}

impl Sector {
    /// Creates an empty sector for a day.
    pub fn for_day(day: NaiveDate, labeler: &dyn DayLabeler, locale: &str) -> Self {
        Self {
            id: SectorId::for_day(day),
            name: labeler.sector_name(day, locale),
            tracks: Vec::new(),
            time_ranges: Vec::new(),
            start_time: 0.0,
            end_time: 0.0,
            zoom_level: default_zoom_level(),
            scroll_position: 0.0,
            camera_counter: 0,
        }
    }

    /// Positions of this sector's tracks of `kind`, ordered by ascending
    /// `index`. Ties keep their order in `tracks`.
    pub fn track_positions(&self, kind: TrackKind) -> Vec<usize> {
        let mut positions: Vec<usize> = self
            .tracks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.kind == kind)
            .map(|(pos, _)| pos)
            .collect();
        positions.sort_by_key(|&pos| self.tracks[pos].index);
        positions
    }

    /// Highest `index` among tracks of `kind`, or 0 if there are none.
    pub fn max_index(&self, kind: TrackKind) -> u32 {
        self.tracks
            .iter()
            .filter(|t| t.kind == kind)
            .map(|t| t.index)
            .max()
            .unwrap_or(0)
    }

    /// Highest `N` among track names containing `Camera N`, or 0.
    pub fn highest_camera_number_in_names(&self) -> u32 {
        self.tracks
            .iter()
            .filter_map(|t| CAMERA_NUMBER_RE.captures(&t.name))
            .filter_map(|caps| caps[1].parse::<u32>().ok())
            .max()
            .unwrap_or(0)
    }

    pub fn contains_path(&self, path: &str) -> bool {
        self.tracks.iter().any(|t| t.contains_path(path))
    }

    /// Inserts `track`, replacing an existing track with the same ID in place.
    pub fn upsert_track(&mut self, track: Track) {
        if let Some(existing) = self.tracks.iter_mut().find(|t| t.id == track.id) {
            *existing = track;
        } else {
            self.tracks.push(track);
        }
    }

    /// Recomputes bounds and time ranges from the members of every track.
    pub fn update_time_range(&mut self, now_secs: f64) {
        let intervals: Vec<Interval> = self
            .tracks
            .iter()
            .flat_map(|t| t.member_intervals(now_secs))
            .collect();

        if intervals.is_empty() {
            self.start_time = 0.0;
            self.end_time = 0.0;
            self.time_ranges = Vec::new();
            return;
        }

        self.start_time = intervals
            .iter()
            .map(|i| i.start)
            .fold(f64::INFINITY, f64::min);
        self.end_time = intervals
            .iter()
            .map(|i| i.end)
            .fold(f64::NEG_INFINITY, f64::max);
        self.time_ranges = merge_intervals(&intervals);
    }
}
