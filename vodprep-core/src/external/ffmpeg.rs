//! ffmpeg invocations: silence detection and per-highlight clip extraction,
//! plus the shared re-encode settings.

use std::fs::File;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::CoreResult;

use super::run_tool;

/// Encoder settings passed through unchanged to every re-encode invocation
/// (clean-video assembly and highlight clips alike).
#[derive(Debug, Clone)]
pub struct EncodeSettings {
    pub video_codec: String,
    pub preset: String,
    pub crf: u8,
    pub pixel_format: String,
    pub profile: String,
    pub audio_codec: String,
    pub audio_bitrate: String,
}

impl Default for EncodeSettings {
    fn default() -> Self {
        EncodeSettings {
            video_codec: "libx264".to_string(),
            preset: "veryfast".to_string(),
            crf: 18,
            pixel_format: "yuv420p".to_string(),
            profile: "main".to_string(),
            audio_codec: "aac".to_string(),
            audio_bitrate: "192k".to_string(),
        }
    }
}

impl EncodeSettings {
    /// Appends the output-side encoding arguments to an ffmpeg command.
    pub(crate) fn apply(&self, cmd: &mut Command) {
        cmd.arg("-c:v")
            .arg(&self.video_codec)
            .arg("-preset")
            .arg(&self.preset)
            .arg("-crf")
            .arg(self.crf.to_string())
            .arg("-pix_fmt")
            .arg(&self.pixel_format)
            .arg("-profile:v")
            .arg(&self.profile)
            .arg("-movflags")
            .arg("+faststart")
            .arg("-c:a")
            .arg(&self.audio_codec)
            .arg("-b:a")
            .arg(&self.audio_bitrate);
    }
}

/// Runs the silence detector over the source, teeing ffmpeg's stderr (where
/// the `silencedetect` filter reports its events) into `silence_log`.
pub fn run_silencedetect(
    ffmpeg: &str,
    input: &Path,
    silence_log: &Path,
    noise_db: i32,
    min_duration: f64,
) -> CoreResult<()> {
    let log_file = File::create(silence_log)?;

    let mut cmd = Command::new(ffmpeg);
    cmd.arg("-hide_banner")
        .arg("-i")
        .arg(input)
        .arg("-af")
        .arg(format!("silencedetect=noise={noise_db}dB:d={min_duration}"))
        .args(["-f", "null", "-"])
        .stdout(Stdio::null())
        .stderr(Stdio::from(log_file));

    run_tool(ffmpeg, &mut cmd)
}

/// Extracts a single clip from the cleaned source.
///
/// Seek (`-ss`) and duration (`-t`) are applied after the input so the cut is
/// frame-accurate under the re-encode.
pub fn extract_clip(
    ffmpeg: &str,
    input: &Path,
    output: &Path,
    start: f64,
    duration: f64,
    settings: &EncodeSettings,
) -> CoreResult<()> {
    let mut cmd = Command::new(ffmpeg);
    cmd.arg("-hide_banner")
        .arg("-y")
        .arg("-i")
        .arg(input)
        .arg("-ss")
        .arg(start.to_string())
        .arg("-t")
        .arg(duration.to_string());
    settings.apply(&mut cmd);
    cmd.arg(output);

    run_tool(ffmpeg, &mut cmd)
}
