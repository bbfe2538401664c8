//! Imported media files and their classification.

use serde::{Deserialize, Serialize};

use crate::interval::Interval;

/// One stream reported by the media prober.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProbedStream {
    /// Stream kind as reported by the prober (`video`, `audio`, `data`, ...).
    #[serde(default)]
    pub codec_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    /// Rotation in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<i32>,
}

/// An imported media file with its probed metadata.
///
/// Owned by the caller. The allocator only clones it into tracks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaFile {
    /// Absolute path, unique per file.
    pub path: String,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Capture start time in seconds since the Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<f64>,

    /// Duration in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,

    #[serde(default)]
    pub is_image: bool,

    /// Probed streams. Empty when probing has not happened yet.
    #[serde(default)]
    pub streams: Vec<ProbedStream>,
}

impl MediaFile {
    /// Creates a file with only a path and name; everything else unknown.
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            start_time: None,
            duration: None,
            is_image: false,
            streams: Vec::new(),
        }
    }

    /// Start time, falling back to `now_secs` when the file has none.
    pub fn start_or(&self, now_secs: f64) -> f64 {
        self.start_time.unwrap_or(now_secs)
    }

    /// Duration, or 0 when unknown.
    pub fn duration_or_zero(&self) -> f64 {
        self.duration.unwrap_or(0.0)
    }

    /// The `[start, start + duration)` interval this file occupies.
    pub fn interval(&self, now_secs: f64) -> Interval {
        let start = self.start_or(now_secs);
        Interval::new(start, start + self.duration_or_zero())
    }

    /// The first video stream, if any.
    pub fn video_stream(&self) -> Option<&ProbedStream> {
        self.streams.iter().find(|s| s.codec_type == "video")
    }
}

/// What kind of media a file is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    Audio,
    Image,
}

impl MediaKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Image => "image",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a file by its image flag and probed streams.
///
/// Files with no video stream are audio, including files that have not
/// been probed at all.
pub fn classify(file: &MediaFile) -> MediaKind {
    if file.is_image {
        MediaKind::Image
    } else if file.video_stream().is_some() {
        MediaKind::Video
    } else {
        MediaKind::Audio
    }
}

/// Returns true if any probed stream is audio.
pub fn has_audio_stream(file: &MediaFile) -> bool {
    file.streams.iter().any(|s| s.codec_type == "audio")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(codec_type: &str) -> ProbedStream {
        ProbedStream {
            codec_type: codec_type.to_string(),
            ..ProbedStream::default()
        }
    }

    #[test]
    fn image_flag_wins_over_streams() {
        let mut file = MediaFile::new("/a.jpg", "a.jpg");
        file.is_image = true;
        file.streams.push(stream("video"));
        assert_eq!(classify(&file), MediaKind::Image);
    }

    #[test]
    fn video_stream_makes_video() {
        let mut file = MediaFile::new("/a.mp4", "a.mp4");
        file.streams = vec![stream("audio"), stream("video")];
        assert_eq!(classify(&file), MediaKind::Video);
        assert!(has_audio_stream(&file));
    }

    #[test]
    fn unprobed_file_is_audio() {
        let file = MediaFile::new("/unknown.bin", "unknown.bin");
        assert_eq!(classify(&file), MediaKind::Audio);
        assert!(!has_audio_stream(&file));
    }

    #[test]
    fn data_only_streams_are_audio() {
        let mut file = MediaFile::new("/gps.bin", "gps.bin");
        file.streams.push(stream("data"));
        assert_eq!(classify(&file), MediaKind::Audio);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let file = MediaFile::new("/a.wav", "a.wav");
        let interval = file.interval(500.0);
        assert!((interval.start - 500.0).abs() < f64::EPSILON);
        assert!((interval.end - 500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn deserializes_camel_case_with_probe_data() {
        let json = r#"{
            "path": "/clips/a.mp4",
            "name": "a.mp4",
            "startTime": 100.5,
            "duration": 60,
            "streams": [{"codec_type": "video", "width": 1920, "height": 1080}]
        }"#;
        let file: MediaFile = serde_json::from_str(json).unwrap();
        assert_eq!(file.start_time, Some(100.5));
        assert_eq!(file.video_stream().and_then(|s| s.width), Some(1920));
        assert!(!file.is_image);
    }
}
