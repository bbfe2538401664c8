//! Classify command: shows how each media file will be treated.

use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

use anyhow::Result;

use tl_core::{MediaFile, MediaKind, classify, has_audio_stream, resolve_camera_id};

use crate::commands::util::read_media_files;

pub fn run<W: Write>(writer: &mut W, files: &Path) -> Result<()> {
    let files = read_media_files(files)?;
    write!(writer, "{}", format_classification(&files))?;
    Ok(())
}

/// Formats one line per file: kind, audio presence, camera, path.
pub fn format_classification(files: &[MediaFile]) -> String {
    let mut output = String::new();
    for file in files {
        let kind = classify(file);
        let audio = if has_audio_stream(file) {
            "audio"
        } else {
            "no-audio"
        };
        let camera = match kind {
            MediaKind::Video => resolve_camera_id(file).to_string(),
            MediaKind::Audio | MediaKind::Image => "-".to_string(),
        };
        let _ = writeln!(
            output,
            "{:<5} {audio:<8} {camera:<10} {}",
            kind.as_str(),
            file.path
        );
    }
    output
}
