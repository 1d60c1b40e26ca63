//! Pipeline configuration: directories, external tool paths, and the tunable
//! constants of each stage.
//!
//! Every value is fixed for the life of a job; there is no mid-job
//! reconfiguration. Instances are built by the consumer (vodprep-cli) and
//! passed into [`crate::pipeline::run_job`].

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{CoreError, CoreResult};
use crate::external::EncodeSettings;
use crate::highlights::HighlightPolicy;
use crate::silence::DEFAULT_SEGMENT_PADDING;

/// Default silencedetect noise floor in dB; audio below this is silence.
pub const DEFAULT_SILENCE_NOISE_DB: i32 = -35;

/// Default minimum silence duration in seconds before a stretch is reported.
pub const DEFAULT_SILENCE_MIN_DURATION: f64 = 1.0;

/// Default resource monitor sampling interval.
pub const DEFAULT_MONITOR_INTERVAL: Duration = Duration::from_millis(500);

/// Default delay between duration-probe retries while a file is landing.
pub const DEFAULT_PROBE_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Speech-to-text configuration. Subtitles are generated only when this is
/// present on the pipeline config.
#[derive(Debug, Clone)]
pub struct WhisperConfig {
    /// Path or name of the whisper.cpp-style binary.
    pub bin_path: String,
    /// Path to the speech model file.
    pub model_path: PathBuf,
}

/// Main configuration for one pipeline job.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    // ---- Directories ----
    /// Base directory under which each job gets `<stem>/` with its outputs.
    pub export_base: PathBuf,
    /// Scratch directory for silence logs and edit lists.
    pub tmp_dir: PathBuf,
    /// Directory receiving the original file after a successful job.
    pub archive_dir: PathBuf,

    // ---- External tools ----
    pub ffmpeg_path: String,
    pub ffprobe_path: String,
    pub scenedetect_path: String,
    pub whisper: Option<WhisperConfig>,

    // ---- Silence removal ----
    pub silence_noise_db: i32,
    pub silence_min_duration: f64,
    /// Padding added to each end of every keep segment.
    pub segment_padding: f64,

    // ---- Highlights ----
    pub highlight_policy: HighlightPolicy,

    // ---- Encoding ----
    pub encode: EncodeSettings,

    // ---- Monitoring and retry ----
    pub monitor_interval: Duration,
    pub probe_retry_delay: Duration,
}

impl PipelineConfig {
    /// Builds a config rooted at the given directories, with defaults for
    /// everything else.
    pub fn new(export_base: PathBuf, tmp_dir: PathBuf, archive_dir: PathBuf) -> Self {
        PipelineConfig {
            export_base,
            tmp_dir,
            archive_dir,
            ffmpeg_path: "ffmpeg".to_string(),
            ffprobe_path: "ffprobe".to_string(),
            scenedetect_path: "scenedetect".to_string(),
            whisper: None,
            silence_noise_db: DEFAULT_SILENCE_NOISE_DB,
            silence_min_duration: DEFAULT_SILENCE_MIN_DURATION,
            segment_padding: DEFAULT_SEGMENT_PADDING,
            highlight_policy: HighlightPolicy::default(),
            encode: EncodeSettings::default(),
            monitor_interval: DEFAULT_MONITOR_INTERVAL,
            probe_retry_delay: DEFAULT_PROBE_RETRY_DELAY,
        }
    }

    /// Checks values that would otherwise fail deep inside a job.
    pub fn validate(&self) -> CoreResult<()> {
        if self.segment_padding < 0.0 {
            return Err(CoreError::Config(
                "segment padding must not be negative".to_string(),
            ));
        }
        if self.silence_min_duration <= 0.0 {
            return Err(CoreError::Config(
                "minimum silence duration must be positive".to_string(),
            ));
        }
        if self.highlight_policy.min_duration > self.highlight_policy.max_duration {
            return Err(CoreError::Config(format!(
                "highlight min duration {} exceeds max duration {}",
                self.highlight_policy.min_duration, self.highlight_policy.max_duration
            )));
        }
        if self.monitor_interval.is_zero() {
            return Err(CoreError::Config(
                "monitor interval must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> PipelineConfig {
        PipelineConfig::new(
            PathBuf::from("/tmp/export"),
            PathBuf::from("/tmp/scratch"),
            PathBuf::from("/tmp/archive"),
        )
    }

    #[test]
    fn defaults_validate() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn negative_padding_is_rejected() {
        let mut config = base_config();
        config.segment_padding = -0.1;
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn inverted_highlight_bounds_are_rejected() {
        let mut config = base_config();
        config.highlight_policy.min_duration = 100.0;
        config.highlight_policy.max_duration = 10.0;
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));
    }
}
