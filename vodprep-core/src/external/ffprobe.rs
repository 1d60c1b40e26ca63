//! Container duration probing via ffprobe.

use std::path::Path;
use std::process::Command;
use std::thread;
use std::time::Duration;

use log::warn;

use crate::error::{CoreError, CoreResult};

use super::run_tool_capture;

/// Reads the container duration in seconds with a single ffprobe call.
pub fn probe_duration(ffprobe: &str, input: &Path) -> CoreResult<f64> {
    let mut cmd = Command::new(ffprobe);
    cmd.args([
        "-v",
        "error",
        "-show_entries",
        "format=duration",
        "-of",
        "default=noprint_wrappers=1:nokey=1",
    ])
    .arg(input);

    let out = run_tool_capture(ffprobe, &mut cmd)?;
    out.trim().parse::<f64>().map_err(|_| CoreError::ToolOutput {
        tool: ffprobe.to_string(),
        output: out.trim().to_string(),
    })
}

/// Probes until it succeeds or fails for good.
///
/// A freshly landed file may not be fully visible yet, so spawn failures and
/// non-zero exits are treated as transient and retried after a fixed delay;
/// a file that stays unreadable keeps the probe waiting. A clean ffprobe run
/// whose output does not parse as a number (`N/A` for a container with no
/// duration) is deterministic and propagates instead of retrying forever.
pub fn probe_duration_retrying(
    ffprobe: &str,
    input: &Path,
    retry_delay: Duration,
) -> CoreResult<f64> {
    loop {
        match probe_duration(ffprobe, input) {
            Ok(duration) => return Ok(duration),
            Err(
                e @ (CoreError::CommandStart(..) | CoreError::CommandFailed { .. } | CoreError::Io(_)),
            ) => {
                warn!(
                    "duration probe of {} failed ({e}), retrying in {retry_delay:?}",
                    input.display()
                );
                thread::sleep(retry_delay);
            }
            Err(e) => return Err(e),
        }
    }
}
