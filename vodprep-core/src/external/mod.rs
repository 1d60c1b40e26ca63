//! Invocation of the external tools the pipeline orchestrates.
//!
//! Every stage that touches media delegates the heavy lifting to an external
//! command-line tool: ffmpeg (silence detection, assembly, clip extraction),
//! ffprobe (duration probing), a PySceneDetect-style scene detector, and
//! optionally a whisper.cpp-style transcriber. Each invocation is a blocking
//! call; the worker does not continue until the tool exits. No timeout is
//! enforced here.

use std::io;
use std::process::{Command, Stdio};

use log::debug;

use crate::error::{CoreError, CoreResult};

pub mod ffmpeg;
pub mod ffprobe;
pub mod scenedetect;
pub mod whisper;

pub use ffmpeg::EncodeSettings;

/// Checks that a required external command exists and can be started.
///
/// The command is run with a `-version` argument; any exit status counts as
/// present, only a failure to start does not.
pub fn check_dependency(cmd_name: &str) -> CoreResult<()> {
    let result = Command::new(cmd_name)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            debug!("found dependency: {cmd_name}");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(CoreError::DependencyNotFound(cmd_name.to_string()))
        }
        Err(e) => Err(CoreError::CommandStart(cmd_name.to_string(), e)),
    }
}

/// Runs a fully-built command to completion. A failed spawn maps to
/// [`CoreError::CommandStart`], a non-zero exit to
/// [`CoreError::CommandFailed`]; both are fatal for the calling stage unless
/// the caller chooses to isolate the failure.
pub(crate) fn run_tool(tool: &str, cmd: &mut Command) -> CoreResult<()> {
    debug!("running: {cmd:?}");
    let status = cmd
        .status()
        .map_err(|e| CoreError::CommandStart(tool.to_string(), e))?;

    if status.success() {
        Ok(())
    } else {
        Err(CoreError::CommandFailed {
            tool: tool.to_string(),
            code: status.code().unwrap_or(-1),
        })
    }
}

/// Like [`run_tool`] but captures stdout, for tools whose output is consumed
/// rather than written to disk.
pub(crate) fn run_tool_capture(tool: &str, cmd: &mut Command) -> CoreResult<String> {
    debug!("running: {cmd:?}");
    let output = cmd
        .output()
        .map_err(|e| CoreError::CommandStart(tool.to_string(), e))?;

    if !output.status.success() {
        return Err(CoreError::CommandFailed {
            tool: tool.to_string(),
            code: output.status.code().unwrap_or(-1),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
