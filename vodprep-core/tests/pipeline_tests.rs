//! End-to-end pipeline tests driven by stub external tools.
//!
//! Each stub is a small shell script standing in for ffmpeg, ffprobe, or the
//! scene detector, so the orchestration, failure semantics, and archiving
//! behavior can be exercised without real media.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::tempdir;
use vodprep_core::{run_job, CoreError, HighlightPolicy, PipelineConfig, WhisperConfig};

fn write_stub(dir: &Path, name: &str, body: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path.to_string_lossy().into_owned()
}

/// ffprobe stand-in: reports a 100-second duration for anything.
const STUB_FFPROBE: &str = "#!/bin/sh\necho 100.0\n";

/// ffmpeg stand-in: succeeds without writing anything, so silence detection
/// reports no events and the pipeline takes the copy-verbatim path.
const STUB_FFMPEG: &str = "#!/bin/sh\nexit 0\n";

/// Scene detector stand-in: writes a two-scene CSV for the clean video.
const STUB_SCENEDETECT_OK: &str = r#"#!/bin/sh
case "$1" in -version) exit 0 ;; esac
out="$4"
cat > "$out/clean-Scenes.csv" <<'EOF'
Scene Number,Start Timecode,Start Frame,Start Time (seconds),End Timecode,End Frame,End Time (seconds)
1,00:00:00.000,0,0.000,00:00:20.000,500,20.000
2,00:00:20.000,500,20.000,00:00:25.000,625,25.000
EOF
exit 0
"#;

/// Scene detector stand-in that fails outright.
const STUB_SCENEDETECT_FAIL: &str = "#!/bin/sh\nexit 3\n";

struct Setup {
    _root: tempfile::TempDir,
    config: PipelineConfig,
    input: PathBuf,
}

fn setup(scenedetect_body: &str) -> Setup {
    let root = tempdir().unwrap();
    let bin_dir = root.path().join("bin");
    let in_dir = root.path().join("in");
    fs::create_dir_all(&bin_dir).unwrap();
    fs::create_dir_all(&in_dir).unwrap();

    let input = in_dir.join("stream.mp4");
    fs::write(&input, "fake video bytes").unwrap();

    let mut config = PipelineConfig::new(
        root.path().join("export"),
        root.path().join("tmp"),
        root.path().join("archive"),
    );
    config.ffprobe_path = write_stub(&bin_dir, "ffprobe", STUB_FFPROBE);
    config.ffmpeg_path = write_stub(&bin_dir, "ffmpeg", STUB_FFMPEG);
    config.scenedetect_path = write_stub(&bin_dir, "scenedetect", scenedetect_body);
    config.monitor_interval = Duration::from_millis(20);
    config.probe_retry_delay = Duration::from_millis(20);
    config.highlight_policy = HighlightPolicy {
        min_duration: 3.0,
        max_duration: 15.0,
        max_count: 2,
    };

    Setup {
        _root: root,
        config,
        input,
    }
}

#[test]
fn successful_job_archives_original_and_extracts_highlights() {
    let s = setup(STUB_SCENEDETECT_OK);

    let report = run_job(&s.config, &s.input).unwrap();

    // Archive is the last action of the success path: the input has moved.
    assert!(!s.input.exists());
    let archived = s.config.archive_dir.join("stream.mp4");
    assert_eq!(report.archived_to, archived);
    assert_eq!(fs::read_to_string(&archived).unwrap(), "fake video bytes");

    // No silence events means the clean video is a verbatim copy.
    let clean = s.config.export_base.join("stream").join("clean.mp4");
    assert_eq!(report.clean_path, clean);
    assert_eq!(fs::read_to_string(&clean).unwrap(), "fake video bytes");

    // Scenes (0,20) and (20,25): the first truncates to 15s and outranks the
    // 5s second; both survive under max_count = 2, numbered in score order.
    assert_eq!(report.highlights.len(), 2);
    assert!(report.highlights[0].ends_with("highlight_01.mp4"));
    assert!(report.highlights[1].ends_with("highlight_02.mp4"));

    assert_eq!(report.summary.original_duration, Some(100.0));
    assert_eq!(report.summary.clean_duration, Some(100.0));
    assert_eq!(report.summary.highlight_count, 2);

    let log_text =
        fs::read_to_string(s.config.export_base.join("stream").join("pipeline.log")).unwrap();
    assert!(log_text.contains("----- SUMMARY -----"));
    assert!(log_text.contains("Original duration: 100.00 seconds"));
}

#[test]
fn scene_detection_failure_keeps_original_and_still_emits_summary() {
    let s = setup(STUB_SCENEDETECT_FAIL);

    let err = run_job(&s.config, &s.input).unwrap_err();
    assert!(matches!(err, CoreError::CommandFailed { code: 3, .. }));

    // The original is NOT archived on failure.
    assert!(s.input.exists());
    assert!(!s.config.archive_dir.join("stream.mp4").exists());

    // The monitor was stopped and the summary still written, using the
    // values computed before the failing stage.
    let log_text =
        fs::read_to_string(s.config.export_base.join("stream").join("pipeline.log")).unwrap();
    assert!(log_text.contains("[PIPELINE] ERROR:"));
    assert!(log_text.contains("----- SUMMARY -----"));
    assert!(log_text.contains("Original duration: 100.00 seconds"));
}

#[test]
fn probe_reporting_no_duration_fails_instead_of_retrying() {
    // ffprobe exits zero but prints `N/A`, as it does for a container with no
    // duration. That is deterministic, so the job must fail rather than sit
    // in the retry loop.
    let mut s = setup(STUB_SCENEDETECT_OK);
    let bin_dir = s._root.path().join("bin");
    s.config.ffprobe_path = write_stub(&bin_dir, "ffprobe-na", "#!/bin/sh\necho N/A\n");

    let err = run_job(&s.config, &s.input).unwrap_err();
    assert!(matches!(err, CoreError::ToolOutput { .. }));
    assert!(s.input.exists());
}

#[test]
fn missing_transcriber_is_caught_before_any_work() {
    let mut s = setup(STUB_SCENEDETECT_OK);
    s.config.whisper = Some(WhisperConfig {
        bin_path: "definitely-not-a-real-transcriber".to_string(),
        model_path: s._root.path().join("model.bin"),
    });

    let err = run_job(&s.config, &s.input).unwrap_err();
    assert!(matches!(err, CoreError::DependencyNotFound(_)));

    // Caught up front: no job directory was created and the input is intact.
    assert!(s.input.exists());
    assert!(!s.config.export_base.join("stream").exists());
}

#[test]
fn detector_exiting_clean_without_csv_is_an_error() {
    // Exits zero but never writes the expected CSV.
    let s = setup("#!/bin/sh\ncase \"$1\" in -version) exit 0 ;; esac\nexit 0\n");

    let err = run_job(&s.config, &s.input).unwrap_err();
    assert!(matches!(err, CoreError::OutputMissing(_)));
    assert!(s.input.exists());
}
