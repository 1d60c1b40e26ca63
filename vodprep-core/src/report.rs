//! End-of-job summary.
//!
//! Every quantity that might not have been computed by the time a job fails
//! is optional, so emitting the summary can never itself fail during failure
//! handling. Unset fields print as `n/a`.

use std::time::Duration;

use crate::joblog::JobLog;
use crate::monitor::MonitorStats;

/// Summary of one job, emitted on every exit path, success or failure.
#[derive(Debug, Clone, Default)]
pub struct JobSummary {
    pub total_time: Duration,
    pub stats: MonitorStats,
    pub original_duration: Option<f64>,
    pub clean_duration: Option<f64>,
    pub highlight_count: usize,
}

impl JobSummary {
    /// Seconds of content removed by silence trimming, when both durations
    /// are known.
    #[must_use]
    pub fn time_removed(&self) -> Option<f64> {
        Some(self.original_duration? - self.clean_duration?)
    }

    /// Writes the summary block to the job log.
    pub fn emit(&self, log: &JobLog) {
        log.log("");
        log.log("----- SUMMARY -----");
        log.log(&format!(
            "Total processing time: {:.2} seconds",
            self.total_time.as_secs_f64()
        ));
        log.log(&format!("Average CPU usage: {:.1}%", self.stats.avg_cpu));
        log.log(&format!("Average RAM usage: {:.1} MB", self.stats.avg_ram_mb));
        log.log(&format!(
            "Original duration: {}",
            format_opt_seconds(self.original_duration)
        ));
        log.log(&format!(
            "Final duration: {}",
            format_opt_seconds(self.clean_duration)
        ));
        log.log(&format!(
            "Total time removed: {}",
            format_opt_seconds(self.time_removed())
        ));
        log.log(&format!("Highlights produced: {}", self.highlight_count));
        log.log("--------------------");
        log.log("");
    }
}

fn format_opt_seconds(value: Option<f64>) -> String {
    match value {
        Some(seconds) => format!("{seconds:.2} seconds"),
        None => "n/a".to_string(),
    }
}
