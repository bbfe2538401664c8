//! Timeline tracks: one lane of one day.

use serde::{Deserialize, Serialize};

use crate::camera::{CameraId, resolve_camera_id};
use crate::interval::{Interval, merge_intervals};
use crate::media::MediaFile;
use crate::types::{TrackId, TrackKind};

/// One lane of the timeline for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Stable identifier, assigned once at creation.
    pub id: TrackId,

    pub name: String,

    #[serde(rename = "type")]
    pub kind: TrackKind,

    /// Placed files in placement order. Audio tracks hold audio files here
    /// too; the serialized name is kept for project compatibility.
    #[serde(rename = "videos", default)]
    pub members: Vec<MediaFile>,

    #[serde(default)]
    pub start_time: f64,

    #[serde(default)]
    pub end_time: f64,

    /// Sum of member durations.
    #[serde(default)]
    pub combined_duration: f64,

    /// Merged spans covered by members.
    #[serde(default)]
    pub time_ranges: Vec<Interval>,

    /// Top-to-bottom rank and placement priority within its kind.
    #[serde(default)]
    pub index: u32,

    /// Camera of the file that created the track. Video tracks only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_id: Option<CameraId>,

    #[serde(default)]
    pub camera_name: String,
}

impl Track {
    /// Creates an empty track with a fresh ID.
    pub fn new(kind: TrackKind, index: u32, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: TrackId::generate(),
            camera_name: name.clone(),
            name,
            kind,
            members: Vec::new(),
            start_time: 0.0,
            end_time: 0.0,
            combined_duration: 0.0,
            time_ranges: Vec::new(),
            index,
            camera_id: None,
        }
    }

    #[must_use]
    pub fn with_camera(mut self, camera_id: CameraId) -> Self {
        self.camera_id = Some(camera_id);
        self
    }

    /// Returns the track with `file` appended. See [`Self::push_member`].
    #[must_use]
    pub fn with_member(mut self, file: MediaFile, now_secs: f64) -> Self {
        self.push_member(file, now_secs);
        self
    }

    /// Appends `file`, widening bounds and recomputing time ranges.
    pub fn push_member(&mut self, file: MediaFile, now_secs: f64) {
        let interval = file.interval(now_secs);
        if self.members.is_empty() {
            self.start_time = interval.start;
            self.end_time = interval.end;
        } else {
            self.start_time = self.start_time.min(interval.start);
            self.end_time = self.end_time.max(interval.end);
        }
        self.combined_duration += file.duration_or_zero();
        self.members.push(file);
        self.time_ranges = merge_intervals(&self.member_intervals(now_secs));
    }

    pub fn member_intervals(&self, now_secs: f64) -> Vec<Interval> {
        self.members.iter().map(|m| m.interval(now_secs)).collect()
    }

    /// Returns true if `interval` overlaps any member. Empty tracks never do.
    pub fn overlaps_any(&self, interval: &Interval, now_secs: f64) -> bool {
        self.members
            .iter()
            .any(|m| m.interval(now_secs).overlaps(interval))
    }

    /// Returns true if every member overlapping `interval` was recorded by
    /// `camera`. Vacuously true when nothing overlaps.
    pub fn overlapping_members_share_camera(
        &self,
        interval: &Interval,
        camera: CameraId,
        now_secs: f64,
    ) -> bool {
        self.members
            .iter()
            .filter(|m| m.interval(now_secs).overlaps(interval))
            .all(|m| resolve_camera_id(m).same_camera(&camera))
    }

    pub fn contains_path(&self, path: &str) -> bool {
        self.members.iter().any(|m| m.path == path)
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
