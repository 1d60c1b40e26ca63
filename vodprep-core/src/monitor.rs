//! Background CPU/RSS sampling for the lifetime of a job.
//!
//! One sampling thread appends to a vector it owns; the orchestrator signals
//! shutdown through an atomic flag and receives the samples back when the
//! thread is joined. Single writer, single reader-after-join; no further
//! synchronization is needed.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::warn;
use sysinfo::{ProcessExt, System, SystemExt};

/// One reading of the pipeline process taken by the monitor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceSample {
    /// Process CPU usage in percent (may exceed 100 on multi-core hosts).
    pub cpu_percent: f32,
    /// Resident set size in MB.
    pub rss_mb: f64,
    /// Time since the monitor started.
    pub elapsed: Duration,
}

/// Aggregate statistics over a finished sampling run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MonitorStats {
    pub avg_cpu: f64,
    pub avg_ram_mb: f64,
    pub sample_count: usize,
}

impl MonitorStats {
    /// Arithmetic means over the samples. No samples means all-zero stats,
    /// not an error; a job can legitimately finish before the first tick.
    #[must_use]
    pub fn from_samples(samples: &[ResourceSample]) -> Self {
        if samples.is_empty() {
            return MonitorStats::default();
        }
        let n = samples.len() as f64;
        MonitorStats {
            avg_cpu: samples.iter().map(|s| f64::from(s.cpu_percent)).sum::<f64>() / n,
            avg_ram_mb: samples.iter().map(|s| s.rss_mb).sum::<f64>() / n,
            sample_count: samples.len(),
        }
    }
}

/// Handle to the background sampler. Created by [`ResourceMonitor::start`],
/// consumed by [`ResourceMonitor::stop`].
pub struct ResourceMonitor {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<Vec<ResourceSample>>,
}

impl ResourceMonitor {
    /// Spawns the sampling thread. One sample is appended per `interval`
    /// until [`stop`](Self::stop) is called.
    pub fn start(interval: Duration) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let handle = thread::spawn(move || sample_loop(interval, &flag));
        ResourceMonitor { stop, handle }
    }

    /// Signals the sampler and waits for it to exit, returning every sample
    /// it recorded. The loop observes the flag within one interval, so this
    /// blocks at most that long; reading the samples only after the join is
    /// what keeps the sequence race-free.
    pub fn stop(self) -> Vec<ResourceSample> {
        self.stop.store(true, Ordering::Relaxed);
        self.handle.join().unwrap_or_default()
    }
}

fn sample_loop(interval: Duration, stop: &AtomicBool) -> Vec<ResourceSample> {
    let mut samples = Vec::new();

    let pid = match sysinfo::get_current_pid() {
        Ok(pid) => pid,
        Err(e) => {
            warn!("resource monitor disabled, cannot resolve own pid: {e}");
            return samples;
        }
    };

    let mut system = System::new();
    let started = Instant::now();

    while !stop.load(Ordering::Relaxed) {
        thread::sleep(interval);
        if stop.load(Ordering::Relaxed) {
            break;
        }
        if system.refresh_process(pid) {
            if let Some(process) = system.process(pid) {
                samples.push(ResourceSample {
                    cpu_percent: process.cpu_usage(),
                    rss_mb: process.memory() as f64 / (1024.0 * 1024.0),
                    elapsed: started.elapsed(),
                });
            }
        }
    }

    samples
}
