//! Camera identity derived from a file's video resolution.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::media::MediaFile;

/// Errors from parsing a `WxH` camera key.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CameraIdError {
    #[error("camera key must look like WIDTHxHEIGHT, got {value:?}")]
    Malformed { value: String },
}

/// Identity of the physical source that recorded a video file.
///
/// `Unknown` is never the same camera as anything, itself included, so
/// footage without resolution data is never merged onto another clip's
/// track through continuity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CameraId {
    Resolution { width: u32, height: u32 },
    Unknown,
}

impl CameraId {
    /// Returns true only when both sides are the same known resolution.
    pub fn same_camera(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::Resolution { width, height },
                Self::Resolution {
                    width: other_width,
                    height: other_height,
                },
            ) => width == other_width && height == other_height,
            _ => false,
        }
    }

    pub const fn is_known(&self) -> bool {
        matches!(self, Self::Resolution { .. })
    }
}

impl fmt::Display for CameraId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolution { width, height } => write!(f, "{width}x{height}"),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}

impl std::str::FromStr for CameraId {
    type Err = CameraIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || CameraIdError::Malformed {
            value: s.to_string(),
        };
        let (width, height) = s.split_once('x').ok_or_else(malformed)?;
        let width = width.parse().map_err(|_| malformed())?;
        let height = height.parse().map_err(|_| malformed())?;
        Ok(Self::Resolution { width, height })
    }
}

impl From<String> for CameraId {
    /// Anything that is not a `WxH` key (including random tokens written by
    /// older projects) loads as `Unknown`.
    fn from(value: String) -> Self {
        value.parse().unwrap_or(Self::Unknown)
    }
}

impl From<CameraId> for String {
    fn from(id: CameraId) -> Self {
        id.to_string()
    }
}

/// Resolves the camera identity of a video file from its first video stream.
pub fn resolve_camera_id(file: &MediaFile) -> CameraId {
    match file.video_stream() {
        Some(stream) => match (stream.width, stream.height) {
            (Some(width), Some(height)) => CameraId::Resolution { width, height },
            _ => CameraId::Unknown,
        },
        None => CameraId::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::ProbedStream;

    fn video(width: Option<u32>, height: Option<u32>) -> MediaFile {
        let mut file = MediaFile::new("/v.mp4", "v.mp4");
        file.streams.push(ProbedStream {
            codec_type: "video".to_string(),
            width,
            height,
            rotation: None,
        });
        file
    }

    #[test]
    fn resolution_key() {
        let id = resolve_camera_id(&video(Some(1920), Some(1080)));
        assert_eq!(id.to_string(), "1920x1080");
        assert!(id.is_known());
    }

    #[test]
    fn missing_height_is_unknown() {
        assert_eq!(resolve_camera_id(&video(Some(1920), None)), CameraId::Unknown);
    }

    #[test]
    fn no_video_stream_is_unknown() {
        let file = MediaFile::new("/a.wav", "a.wav");
        assert_eq!(resolve_camera_id(&file), CameraId::Unknown);
    }

    #[test]
    fn unknown_is_never_same_camera() {
        assert!(!CameraId::Unknown.same_camera(&CameraId::Unknown));
        let hd = CameraId::Resolution {
            width: 1920,
            height: 1080,
        };
        assert!(!hd.same_camera(&CameraId::Unknown));
        assert!(hd.same_camera(&hd));
    }

    #[test]
    fn different_resolutions_differ() {
        let a = CameraId::Resolution {
            width: 1920,
            height: 1080,
        };
        let b = CameraId::Resolution {
            width: 1080,
            height: 1920,
        };
        assert!(!a.same_camera(&b));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("1920".parse::<CameraId>().is_err());
        assert!("axb".parse::<CameraId>().is_err());
    }

    #[test]
    fn legacy_random_token_loads_as_unknown() {
        let id: CameraId = serde_json::from_str("\"k3j4h5g6\"").unwrap();
        assert_eq!(id, CameraId::Unknown);
        let id: CameraId = serde_json::from_str("\"3840x2160\"").unwrap();
        assert_eq!(
            id,
            CameraId::Resolution {
                width: 3840,
                height: 2160
            }
        );
    }
}
