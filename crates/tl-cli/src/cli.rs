//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::allocate::AllocateArgs;

/// Timeline track allocator.
///
/// Lays imported video and audio files out on per-day timeline tracks,
/// keeping previously built layouts stable.
#[derive(Debug, Parser)]
#[command(name = "tl", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Allocate media files onto timeline tracks.
    Allocate(AllocateArgs),

    /// Group media files by capture day for display.
    Days {
        /// JSON file containing an array of media files.
        #[arg(long)]
        files: PathBuf,
    },

    /// Show how each media file is classified.
    Classify {
        /// JSON file containing an array of media files.
        #[arg(long)]
        files: PathBuf,
    },
}
