//! Shared utilities for CLI commands.

use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;

use tl_core::{MediaFile, Sector, Track};

/// Parses the `--now` reference time.
///
/// Accepts, in order:
/// - RFC 3339: "2025-01-15T09:00:00Z"
/// - a calendar date, read as midnight UTC: "2025-01-15"
/// - Unix seconds, the unit media start times use: "1736931600"
pub fn parse_now(s: &str) -> anyhow::Result<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(day) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(day.and_time(NaiveTime::MIN).and_utc());
    }
    if let Ok(secs) = s.parse::<i64>() {
        return DateTime::from_timestamp(secs, 0)
            .with_context(|| format!("Unix time out of range: {secs}"));
    }
    anyhow::bail!(
        "Invalid time: {s}. Use RFC 3339 (e.g., 2025-01-15T09:00:00Z), a date (2025-01-15) or Unix seconds"
    )
}

/// Reads a JSON array of media files.
pub fn read_media_files(path: &Path) -> anyhow::Result<Vec<MediaFile>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let files: Vec<MediaFile> = serde_json::from_str(&content)
        .with_context(|| format!("invalid media file list in {}", path.display()))?;
    if let Some(pos) = files.iter().position(|f| f.path.trim().is_empty()) {
        anyhow::bail!("media file {} in {} has an empty path", pos + 1, path.display());
    }
    Ok(files)
}

/// A previously built layout.
#[derive(Debug, Default, Deserialize)]
pub struct ExistingLayout {
    #[serde(default)]
    pub sectors: Vec<Sector>,
    #[serde(default)]
    pub tracks: Vec<Track>,
}

/// Either the bare sector array printed by `tl allocate --json` or an
/// object with `sectors` and/or `tracks`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LayoutFile {
    Sectors(Vec<Sector>),
    Layout(ExistingLayout),
}

/// Reads a previously built layout.
pub fn read_layout(path: &Path) -> anyhow::Result<ExistingLayout> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let layout: LayoutFile = serde_json::from_str(&content)
        .with_context(|| format!("invalid layout in {}", path.display()))?;
    Ok(match layout {
        LayoutFile::Sectors(sectors) => ExistingLayout {
            sectors,
            tracks: Vec::new(),
        },
        LayoutFile::Layout(layout) => layout,
    })
}

/// Formats Unix seconds as a UTC time of day.
#[expect(
    clippy::cast_possible_truncation,
    reason = "display only; sub-second precision is dropped"
)]
pub fn format_clock(secs: f64) -> String {
    DateTime::<Utc>::from_timestamp(secs.floor() as i64, 0)
        .map_or_else(|| "??:??:??".to_string(), |dt| dt.format("%H:%M:%S").to_string())
}
