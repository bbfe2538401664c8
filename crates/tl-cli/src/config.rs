//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use tl_core::day::DEFAULT_DATE_FORMAT;
use tl_core::{CameraNumbering, PatternDayLabeler};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Locale passed to the day labeler.
    pub locale: String,

    /// How new `Camera N` track numbers are chosen.
    pub camera_numbering: CameraNumbering,

    /// chrono pattern used for day labels and sector names.
    pub date_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en".to_string(),
            camera_numbering: CameraNumbering::default(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from default locations.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(None)
    }

    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (TL_*)
        figment = figment.merge(Env::prefixed("TL_"));

        figment.extract()
    }

    /// The day labeler described by this configuration.
    pub fn labeler(&self) -> PatternDayLabeler {
        PatternDayLabeler::new(&self.date_format)
    }
}

/// Returns the platform-specific config directory for tl.
///
/// On Linux: `~/.config/tl`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("tl"))
}
