//! Days command: groups media files by capture day for display.

use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

use anyhow::Result;

use tl_core::{DayLabeler, DisplayDay, MediaFile, group_for_display};

use crate::Config;
use crate::commands::util::read_media_files;

pub fn run<W: Write>(writer: &mut W, files: &Path, config: &Config) -> Result<()> {
    let files = read_media_files(files)?;
    write!(writer, "{}", format_days(&files, config))?;
    Ok(())
}

/// Formats one line per day, undated files last.
pub fn format_days(files: &[MediaFile], config: &Config) -> String {
    let labeler = config.labeler();
    let mut output = String::new();
    for (day, group) in group_for_display(files) {
        let label = match day {
            DisplayDay::Day(date) => labeler.format_day(date, &config.locale),
            DisplayDay::NoDate => "No date".to_string(),
        };
        let noun = if group.len() == 1 { "file" } else { "files" };
        let _ = writeln!(output, "{label}: {} {noun}", group.len());
        for file in group {
            let _ = writeln!(output, "  {}", file.path);
        }
    }
    output
}
