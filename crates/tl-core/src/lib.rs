//! Core domain logic for timeline track allocation.
//!
//! This crate contains the fundamental types and logic for:
//! - Classification: deciding whether an imported file is video, audio or image
//! - Day grouping: bucketing files by capture day
//! - Allocation: placing files onto per-day video and audio tracks
//! - Reconciliation: reusing previously built sectors and tracks

mod allocation;
pub mod camera;
pub mod day;
pub mod interval;
pub mod media;
mod reconcile;
pub mod sector;
pub mod track;
pub mod types;

pub use allocation::{
    AllocationConfig, AllocationInput, CameraNumbering, allocate, allocate_tracks,
};
pub use camera::{CameraId, resolve_camera_id};
pub use day::{DayLabeler, DisplayDay, PatternDayLabeler, group_by_day, group_for_display};
pub use interval::{GUARD_SECS, Interval, overlaps};
pub use media::{MediaFile, MediaKind, ProbedStream, classify, has_audio_stream};
pub use reconcile::SectorArena;
pub use sector::Sector;
pub use track::Track;
pub use types::{SectorId, TrackId, TrackKind, ValidationError};
