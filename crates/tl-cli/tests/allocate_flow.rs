//! End-to-end tests for the `tl` binary.
//!
//! Tests the full pipeline: media list → allocate → re-allocate from the
//! saved layout.

use std::path::Path;
use std::process::{Command, Output};

use serde_json::json;
use tempfile::TempDir;

use tl_core::Sector;

fn tl_binary() -> String {
    env!("CARGO_BIN_EXE_tl").to_string()
}

/// Runs `tl` with an isolated HOME so no user config leaks in.
fn run_tl(home: &Path, args: &[&str]) -> Output {
    let output = Command::new(tl_binary())
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("failed to run tl");
    assert!(
        output.status.success(),
        "tl {args:?} should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    output
}

fn write_files(dir: &Path, name: &str, files: &serde_json::Value) -> String {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_string(files).unwrap()).unwrap();
    path.display().to_string()
}

/// 2025-01-15T09:00:00Z plus `offset` seconds.
fn at(offset: i64) -> i64 {
    1_736_931_600 + offset
}

fn sample_files() -> serde_json::Value {
    json!([
        {
            "path": "/footage/a.mp4",
            "name": "a.mp4",
            "startTime": at(100),
            "duration": 60,
            "streams": [{"codec_type": "video", "width": 1920, "height": 1080}, {"codec_type": "audio"}]
        },
        {
            "path": "/footage/b.mp4",
            "name": "b.mp4",
            "startTime": at(150),
            "duration": 60,
            "streams": [{"codec_type": "video", "width": 3840, "height": 2160}]
        },
        {
            "path": "/footage/c.mp4",
            "name": "c.mp4",
            "startTime": at(86_400),
            "duration": 30,
            "streams": [{"codec_type": "video", "width": 1920, "height": 1080}]
        },
        {
            "path": "/footage/mic.wav",
            "name": "mic.wav",
            "startTime": at(90),
            "duration": 300,
            "streams": [{"codec_type": "audio"}]
        }
    ])
}

fn parse_sectors(output: &Output) -> Vec<Sector> {
    serde_json::from_slice(&output.stdout).expect("stdout should be a sector array")
}

#[test]
fn test_allocate_builds_sectors_per_day() {
    let temp = TempDir::new().unwrap();
    let files = write_files(temp.path(), "files.json", &sample_files());

    let output = run_tl(
        temp.path(),
        &["allocate", "--files", &files, "--json", "--now", "2025-01-20T00:00:00Z"],
    );
    let sectors = parse_sectors(&output);

    let ids: Vec<&str> = sectors.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["2025-01-15", "2025-01-16"]);

    let first = &sectors[0];
    let names: Vec<&str> = first.tracks.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Camera 1", "Camera 2", "Audio 1"]);
    assert_eq!(sectors[1].tracks.len(), 1);
}

#[test]
fn test_reallocate_from_saved_layout_is_stable() {
    let temp = TempDir::new().unwrap();
    let files = write_files(temp.path(), "files.json", &sample_files());

    let first = run_tl(
        temp.path(),
        &["allocate", "--files", &files, "--json", "--now", "2025-01-20T00:00:00Z"],
    );
    let layout = temp.path().join("layout.json");
    std::fs::write(&layout, &first.stdout).unwrap();
    let layout = layout.display().to_string();

    let second = run_tl(
        temp.path(),
        &["allocate", "--existing", &layout, "--json", "--now", "2025-01-20T00:00:00Z"],
    );

    let before = parse_sectors(&first);
    let after = parse_sectors(&second);
    assert_eq!(before.len(), after.len());
    for (a, b) in before.iter().zip(&after) {
        assert_eq!(a.id, b.id);
        let a_tracks: Vec<_> = a.tracks.iter().map(|t| (&t.id, t.members.len())).collect();
        let b_tracks: Vec<_> = b.tracks.iter().map(|t| (&t.id, t.members.len())).collect();
        assert_eq!(a_tracks, b_tracks);
    }
}

#[test]
fn test_incremental_import_extends_existing_track() {
    let temp = TempDir::new().unwrap();
    let files = write_files(temp.path(), "files.json", &sample_files());

    let first = run_tl(
        temp.path(),
        &["allocate", "--files", &files, "--json", "--now", "2025-01-20T00:00:00Z"],
    );
    let layout = temp.path().join("layout.json");
    std::fs::write(&layout, &first.stdout).unwrap();
    let layout = layout.display().to_string();

    // Same camera as a.mp4, overlapping it
    let more = write_files(
        temp.path(),
        "more.json",
        &json!([{
            "path": "/footage/a2.mp4",
            "name": "a2.mp4",
            "startTime": at(150),
            "duration": 60,
            "streams": [{"codec_type": "video", "width": 1920, "height": 1080}]
        }]),
    );
    let second = run_tl(
        temp.path(),
        &[
            "allocate", "--files", &more, "--existing", &layout, "--json", "--now",
            "2025-01-20T00:00:00Z",
        ],
    );

    let before = parse_sectors(&first);
    let after = parse_sectors(&second);
    let camera_1 = &after[0].tracks[0];
    assert_eq!(camera_1.id, before[0].tracks[0].id);
    assert_eq!(camera_1.members.len(), 2);
    assert_eq!(after[0].tracks.len(), before[0].tracks.len());
}

#[test]
fn test_allocate_text_summary() {
    let temp = TempDir::new().unwrap();
    let files = write_files(temp.path(), "files.json", &sample_files());

    let output = run_tl(
        temp.path(),
        &["allocate", "--files", &files, "--now", "2025-01-20T00:00:00Z"],
    );
    let stdout = String::from_utf8(output.stdout).unwrap();

    assert!(stdout.contains("January 15, 2025 [2025-01-15] 09:01:30-09:06:30"));
    assert!(stdout.contains("  video Camera 2 (index 2, 3840x2160): 1 file, 60s"));
    assert!(stdout.contains("January 16, 2025 [2025-01-16]"));
}

#[test]
fn test_config_file_changes_sector_names() {
    let temp = TempDir::new().unwrap();
    let files = write_files(temp.path(), "files.json", &sample_files());
    let config = temp.path().join("custom.toml");
    std::fs::write(&config, "date_format = \"%Y/%m/%d\"\n").unwrap();
    let config = config.display().to_string();

    let output = run_tl(
        temp.path(),
        &[
            "--config", &config, "allocate", "--files", &files, "--json", "--now",
            "2025-01-20T00:00:00Z",
        ],
    );

    let sectors = parse_sectors(&output);
    assert_eq!(sectors[0].name, "2025/01/15");
}

#[test]
fn test_days_and_classify_commands() {
    let temp = TempDir::new().unwrap();
    let mut files = sample_files();
    files
        .as_array_mut()
        .unwrap()
        .push(json!({"path": "/footage/notes.m4a", "name": "notes.m4a"}));
    let files = write_files(temp.path(), "files.json", &files);

    let days = run_tl(temp.path(), &["days", "--files", &files]);
    let days = String::from_utf8(days.stdout).unwrap();
    let headers: Vec<&str> = days.lines().filter(|l| !l.starts_with(' ')).collect();
    assert_eq!(
        headers,
        vec!["January 15, 2025: 3 files", "January 16, 2025: 1 file", "No date: 1 file"]
    );

    let classify = run_tl(temp.path(), &["classify", "--files", &files]);
    let classify = String::from_utf8(classify.stdout).unwrap();
    assert!(classify.contains("video audio    1920x1080  /footage/a.mp4"));
    assert!(classify.contains("audio no-audio -          /footage/notes.m4a"));
}

#[test]
fn test_invalid_media_list_fails() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("bad.json");
    std::fs::write(&path, "{not json").unwrap();
    let path = path.display().to_string();

    let output = Command::new(tl_binary())
        .env("HOME", temp.path())
        .env("XDG_CONFIG_HOME", temp.path().join(".config"))
        .args(["allocate", "--files", path.as_str()])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid media file list"));
}
