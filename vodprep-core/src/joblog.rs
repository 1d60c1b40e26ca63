//! Per-job log sink: timestamped lines mirrored to the console logger and
//! appended to the job's `pipeline.log`.
//!
//! Each job constructs its own sink and passes it by reference into the
//! stages that need it. There is deliberately no process-wide "current log
//! file"; two consecutive jobs can never write into each other's logs.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use chrono::Local;
use log::{info, warn};

use crate::error::CoreResult;

/// Append-only log sink owned by a single job. Never rotated within a job.
pub struct JobLog {
    file: Mutex<File>,
}

impl JobLog {
    /// Creates (or truncates) the log file at `path`.
    pub fn create(path: &Path) -> CoreResult<Self> {
        let file = File::create(path)?;
        Ok(JobLog {
            file: Mutex::new(file),
        })
    }

    /// Writes one timestamped line to the job log file and mirrors the
    /// message to the console logger. A failed file append downgrades to a
    /// warning; it never aborts the job.
    pub fn log(&self, message: &str) {
        info!("{message}");

        let line = format!("{} - {message}", Local::now().format("%Y-%m-%d %H:%M:%S"));
        if let Ok(mut file) = self.file.lock() {
            if let Err(e) = writeln!(file, "{line}") {
                warn!("failed to append to job log: {e}");
            }
        }
    }
}
