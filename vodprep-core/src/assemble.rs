//! Clean-video assembly: builds the concat-demuxer edit list for the keep
//! segments and drives a single re-encode that stitches them together.

use std::io::Write;
use std::path::Path;
use std::process::Command;

use log::info;
use tempfile::NamedTempFile;

use crate::error::CoreResult;
use crate::external::{run_tool, EncodeSettings};
use crate::interval::TimeInterval;

/// Writes a concat-demuxer edit list: one entry per keep segment, each
/// referencing the same source with its own in/out points, in segment order.
///
/// The list lives in a `NamedTempFile`, so it is deleted when the handle
/// drops, whichever exit path is taken.
fn write_concat_list(
    source: &Path,
    segments: &[TimeInterval],
    tmp_dir: &Path,
) -> CoreResult<NamedTempFile> {
    let mut list = tempfile::Builder::new()
        .prefix("edit-list-")
        .suffix(".txt")
        .tempfile_in(tmp_dir)?;

    for seg in segments {
        writeln!(list, "file '{}'", source.display())?;
        writeln!(list, "inpoint {}", seg.start)?;
        writeln!(list, "outpoint {}", seg.end)?;
    }
    list.flush()?;

    Ok(list)
}

/// Re-encodes `source` into `output`, keeping only `segments`, in order, in a
/// single encoder invocation. A non-zero encoder exit is fatal for the job.
pub fn build_clean_video(
    ffmpeg: &str,
    source: &Path,
    output: &Path,
    segments: &[TimeInterval],
    settings: &EncodeSettings,
    tmp_dir: &Path,
) -> CoreResult<()> {
    let list = write_concat_list(source, segments, tmp_dir)?;
    info!(
        "assembling {} keep segment(s) into {}",
        segments.len(),
        output.display()
    );

    let mut cmd = Command::new(ffmpeg);
    cmd.arg("-hide_banner")
        .arg("-y")
        .args(["-f", "concat", "-safe", "0"])
        .arg("-i")
        .arg(list.path());
    settings.apply(&mut cmd);
    cmd.arg(output);

    run_tool(ffmpeg, &mut cmd)
}
