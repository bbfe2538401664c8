//! Allocate command: lays media files out on timeline tracks.

use std::fmt::Write as _;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;

use tl_core::{AllocationConfig, AllocationInput, MediaFile, Sector, Track, allocate_tracks};

use crate::Config;
use crate::commands::util::{
    ExistingLayout, format_clock, parse_now, read_layout, read_media_files,
};

#[derive(Debug, Args)]
pub struct AllocateArgs {
    /// JSON file containing an array of media files.
    #[arg(long)]
    pub files: Option<PathBuf>,

    /// Previously built layout to extend: a sector array or an object with
    /// `sectors` and/or `tracks`.
    #[arg(long)]
    pub existing: Option<PathBuf>,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,

    /// Time used for files without a start time (RFC 3339, YYYY-MM-DD or Unix seconds).
    #[arg(long)]
    pub now: Option<String>,
}

pub fn run<W: Write>(writer: &mut W, args: &AllocateArgs, config: &Config) -> Result<()> {
    let files = match &args.files {
        Some(path) => read_media_files(path)?,
        None => Vec::new(),
    };
    let existing = match &args.existing {
        Some(path) => read_layout(path)?,
        None => ExistingLayout::default(),
    };
    let now = match &args.now {
        Some(value) => parse_now(value)?,
        None => Utc::now(),
    };

    let sectors = allocate_layout(&files, &existing, config, now);
    tracing::debug!(
        files = files.len(),
        sectors = sectors.len(),
        "allocation finished"
    );

    if args.json {
        let json = serde_json::to_string_pretty(&sectors).context("failed to encode layout")?;
        writeln!(writer, "{json}")?;
    } else {
        write!(writer, "{}", format_layout(&sectors))?;
    }
    Ok(())
}

fn allocate_layout(
    files: &[MediaFile],
    existing: &ExistingLayout,
    config: &Config,
    now: DateTime<Utc>,
) -> Vec<Sector> {
    let allocation_config = AllocationConfig {
        now,
        locale: config.locale.clone(),
        camera_numbering: config.camera_numbering,
    };
    let input = AllocationInput {
        files,
        existing_tracks: &existing.tracks,
        existing_sectors: &existing.sectors,
    };
    allocate_tracks(&input, &allocation_config, &config.labeler())
}

/// Formats sectors as a human-readable summary.
pub fn format_layout(sectors: &[Sector]) -> String {
    let mut output = String::new();
    if sectors.is_empty() {
        output.push_str("No sectors.\n");
        return output;
    }

    for sector in sectors {
        let span = if sector.tracks.iter().all(Track::is_empty) {
            "empty".to_string()
        } else {
            format!(
                "{}-{}",
                format_clock(sector.start_time),
                format_clock(sector.end_time)
            )
        };
        let _ = writeln!(output, "{} [{}] {span}", sector.name, sector.id);

        for track in &sector.tracks {
            let camera = track
                .camera_id
                .map(|id| format!(", {id}"))
                .unwrap_or_default();
            let count = track.members.len();
            let noun = if count == 1 { "file" } else { "files" };
            let _ = writeln!(
                output,
                "  {} {} (index {}{camera}): {count} {noun}, {:.0}s",
                track.kind, track.name, track.index, track.combined_duration
            );
        }
    }
    output
}
