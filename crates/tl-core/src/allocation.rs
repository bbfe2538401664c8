//! Track allocation algorithm.
//!
//! Lays imported media out on per-day sectors of video and audio tracks,
//! reusing previously built sectors and tracks so that re-running on the
//! same project does not reshuffle it.
//!
//! # Algorithm Summary
//!
//! 1. Classify files into video and audio (images are not placed)
//! 2. Bucket files and previously built tracks by calendar day
//! 3. For each day, reconcile the day's sector with what already exists
//! 4. Place video files, then audio files, in ascending start order
//! 5. Recompute the sector's bounds and time ranges
//!
//! A video file goes on the lowest-index track it does not overlap, or on
//! a track where every clip it overlaps came from the same camera. Audio files
//! only avoid overlap. Each placement scans every member of every candidate
//! track of its day, so cost grows with tracks × members per day.

use std::collections::{BTreeSet, HashSet};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::camera::{CameraId, resolve_camera_id};
use crate::day::{DayLabeler, PatternDayLabeler, group_by_day};
use crate::interval::Interval;
use crate::media::{MediaFile, MediaKind, classify};
use crate::reconcile::{SectorArena, bucket_existing_tracks, reconcile_day};
use crate::sector::Sector;
use crate::track::Track;
use crate::types::TrackKind;

/// How the number in a new `Camera N` track name is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraNumbering {
    /// One past the highest `Camera N` found in the sector's track names.
    /// Matches layouts built before sectors carried a counter.
    #[default]
    TrackNames,
    /// One past the sector's `camera_counter`.
    Counter,
}

/// Configuration for track allocation.
#[derive(Debug, Clone)]
pub struct AllocationConfig {
    /// Stands in for the start time of files that have none.
    pub now: DateTime<Utc>,

    /// Locale handed to the day labeler.
    /// Default: "en".
    pub locale: String,

    /// Default: [`CameraNumbering::TrackNames`].
    pub camera_numbering: CameraNumbering,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            now: Utc::now(),
            locale: "en".to_string(),
            camera_numbering: CameraNumbering::default(),
        }
    }
}

impl AllocationConfig {
    #[expect(
        clippy::cast_precision_loss,
        reason = "millisecond timestamps fit in f64 without loss for realistic dates"
    )]
    fn now_secs(&self) -> f64 {
        self.now.timestamp_millis() as f64 / 1000.0
    }
}

/// Everything allocation reads.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllocationInput<'a> {
    /// Files to place.
    pub files: &'a [MediaFile],

    /// Tracks from a previous allocation, bucketed by their first member's day.
    pub existing_tracks: &'a [Track],

    /// Sectors from a previous allocation, possibly named under an older
    /// ID scheme.
    pub existing_sectors: &'a [Sector],
}

/// Allocates `files` onto tracks, reusing `existing_tracks`, with the
/// default day labels.
pub fn allocate(
    files: &[MediaFile],
    existing_tracks: &[Track],
    config: &AllocationConfig,
) -> Vec<Sector> {
    let input = AllocationInput {
        files,
        existing_tracks,
        existing_sectors: &[],
    };
    allocate_tracks(&input, config, &PatternDayLabeler::default())
}

/// Allocates files onto per-day sectors.
///
/// Never fails: missing start times fall back to `config.now`, missing
/// durations to 0, and unprobed files are treated as audio.
///
/// # Returns
///
/// Existing sectors in their given order (updated where they received
/// files or tracks), followed by new sectors in ascending day order.
pub fn allocate_tracks(
    input: &AllocationInput<'_>,
    config: &AllocationConfig,
    labeler: &dyn DayLabeler,
) -> Vec<Sector> {
    let now = config.now_secs();

    let mut seen_paths: HashSet<&str> = HashSet::new();
    let mut videos: Vec<MediaFile> = Vec::new();
    let mut audios: Vec<MediaFile> = Vec::new();
    for file in input.files {
        if !seen_paths.insert(file.path.as_str()) {
            tracing::debug!(path = %file.path, "skipping duplicate input file");
            continue;
        }
        match classify(file) {
            MediaKind::Video => videos.push(file.clone()),
            MediaKind::Audio => audios.push(file.clone()),
            MediaKind::Image => {
                tracing::debug!(path = %file.path, "images are not placed on tracks");
            }
        }
    }

    let video_days = group_by_day(&videos, now);
    let audio_days = group_by_day(&audios, now);
    let existing_days = bucket_existing_tracks(input.existing_tracks, now);

    let days: BTreeSet<NaiveDate> = video_days
        .keys()
        .chain(audio_days.keys())
        .chain(existing_days.keys())
        .copied()
        .collect();

    let mut arena = SectorArena::from_existing(input.existing_sectors);
    for day in days {
        let existing = existing_days.get(&day).map_or(&[][..], Vec::as_slice);
        let mut sector = reconcile_day(&arena, day, existing, labeler, &config.locale);

        if let Some(files) = video_days.get(&day) {
            place_videos(&mut sector, files, config.camera_numbering, now);
        }
        if let Some(files) = audio_days.get(&day) {
            place_audio(&mut sector, files, now);
        }

        sector.update_time_range(now);
        arena.insert(sector);
    }

    arena.into_sectors()
}

/// Returns `files` ordered by ascending start. Equal starts keep input order.
fn by_start<'a>(files: &[&'a MediaFile], now: f64) -> Vec<&'a MediaFile> {
    let mut sorted = files.to_vec();
    sorted.sort_by(|a, b| a.start_or(now).total_cmp(&b.start_or(now)));
    sorted
}

fn place_videos(
    sector: &mut Sector,
    files: &[&MediaFile],
    numbering: CameraNumbering,
    now: f64,
) {
    for file in by_start(files, now) {
        if sector.contains_path(&file.path) {
            tracing::debug!(path = %file.path, sector_id = %sector.id, "file already placed");
            continue;
        }

        let interval = file.interval(now);
        let camera = resolve_camera_id(file);

        if let Some(pos) = choose_video_track(sector, &interval, camera, now) {
            let track = &mut sector.tracks[pos];
            tracing::debug!(path = %file.path, track = %track.name, %camera, "placed video");
            track.push_member(file.clone(), now);
        } else {
            let number = next_camera_number(sector, numbering);
            sector.camera_counter = sector.camera_counter.max(number);
            let index = sector.max_index(TrackKind::Video) + 1;
            let name = format!("{} {number}", TrackKind::Video.name_prefix());
            let track = Track::new(TrackKind::Video, index, name)
                .with_camera(camera)
                .with_member(file.clone(), now);
            tracing::debug!(path = %file.path, track = %track.name, %camera, "created video track");
            sector.tracks.push(track);
        }
    }
}

/// Picks the track position for a video file, or `None` for a new track.
///
/// The first pass takes the lowest-index populated track that either has
/// no overlap with the file or whose overlapping members all share the
/// file's camera. The second pass takes the
/// lowest-index track with no overlap at all, which also admits empty
/// tracks.
fn choose_video_track(
    sector: &Sector,
    interval: &Interval,
    camera: CameraId,
    now: f64,
) -> Option<usize> {
    let candidates = sector.track_positions(TrackKind::Video);

    for &pos in &candidates {
        let track = &sector.tracks[pos];
        if track.is_empty() {
            continue;
        }
        if !track.overlaps_any(interval, now) {
            return Some(pos);
        }
        if track.overlapping_members_share_camera(interval, camera, now) {
            return Some(pos);
        }
        tracing::trace!(track = %track.name, "track overlaps a different camera");
    }

    candidates
        .into_iter()
        .filter(|&pos| !sector.tracks[pos].overlaps_any(interval, now))
        .min_by_key(|&pos| sector.tracks[pos].index)
}

fn next_camera_number(sector: &Sector, numbering: CameraNumbering) -> u32 {
    match numbering {
        CameraNumbering::TrackNames => sector.highest_camera_number_in_names() + 1,
        CameraNumbering::Counter => {
            sector
                .camera_counter
                .max(sector.highest_camera_number_in_names())
                + 1
        }
    }
}

fn place_audio(sector: &mut Sector, files: &[&MediaFile], now: f64) {
    for file in by_start(files, now) {
        if sector.contains_path(&file.path) {
            tracing::debug!(path = %file.path, sector_id = %sector.id, "file already placed");
            continue;
        }

        let interval = file.interval(now);
        let free = sector
            .track_positions(TrackKind::Audio)
            .into_iter()
            .find(|&pos| !sector.tracks[pos].overlaps_any(&interval, now));

        if let Some(pos) = free {
            let track = &mut sector.tracks[pos];
            tracing::debug!(path = %file.path, track = %track.name, "placed audio");
            track.push_member(file.clone(), now);
        } else {
            let index = sector.max_index(TrackKind::Audio) + 1;
            let name = format!("{} {index}", TrackKind::Audio.name_prefix());
            let track = Track::new(TrackKind::Audio, index, name)
                .with_member(file.clone(), now);
            tracing::debug!(path = %file.path, track = %track.name, "created audio track");
            sector.tracks.push(track);
        }
    }
}
