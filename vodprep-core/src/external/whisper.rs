//! Optional speech-to-text pass producing plain-text and SRT transcripts of
//! the cleaned video via a whisper.cpp-style CLI.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::CoreResult;

use super::run_tool;

/// Transcribes `input` into `<out_dir>/<base_name>.txt` and `.srt`, returning
/// the SRT path. A non-zero exit is fatal for the job, like any other stage
/// tool failure.
pub fn generate_subtitles(
    whisper: &str,
    model: &Path,
    input: &Path,
    out_dir: &Path,
    base_name: &str,
) -> CoreResult<PathBuf> {
    fs::create_dir_all(out_dir)?;
    let prefix = out_dir.join(base_name);

    let mut cmd = Command::new(whisper);
    cmd.arg("-m")
        .arg(model)
        .arg("-f")
        .arg(input)
        .arg("-otxt")
        .arg("-osrt")
        .arg("-of")
        .arg(&prefix);

    run_tool(whisper, &mut cmd)?;
    Ok(prefix.with_extension("srt"))
}
