//! Core library for the vodprep recorded-video cleanup pipeline.
//!
//! vodprep turns a raw recording into a silence-trimmed "clean" copy, a
//! scene catalog, and a bounded set of top-scoring highlight clips, then
//! archives the original. Silence detection, encoding, scene-boundary
//! computation, and transcription are delegated to external tools (ffmpeg,
//! ffprobe, a PySceneDetect-style CLI, optionally a whisper.cpp-style CLI);
//! this crate supplies the orchestration, interval math, selection logic,
//! and resource telemetry around them.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use std::path::{Path, PathBuf};
//! use vodprep_core::PipelineConfig;
//!
//! let config = PipelineConfig::new(
//!     PathBuf::from("/srv/vod/export"),
//!     PathBuf::from("/srv/vod/tmp"),
//!     PathBuf::from("/srv/vod/archive"),
//! );
//! config.validate().unwrap();
//!
//! let report = vodprep_core::run_job(&config, Path::new("/srv/vod/in/stream.mp4")).unwrap();
//! println!("{} highlight clip(s)", report.highlights.len());
//! ```

pub mod assemble;
pub mod config;
pub mod discovery;
pub mod error;
pub mod external;
pub mod highlights;
pub mod interval;
pub mod joblog;
pub mod monitor;
pub mod pipeline;
pub mod report;
pub mod scenes;
pub mod silence;

// Re-exports for the public API
pub use config::{PipelineConfig, WhisperConfig};
pub use discovery::find_processable_files;
pub use error::{CoreError, CoreResult};
pub use external::EncodeSettings;
pub use highlights::{Highlight, HighlightPolicy};
pub use interval::TimeInterval;
pub use monitor::{MonitorStats, ResourceMonitor};
pub use pipeline::{run_job, JobContext, JobReport};
pub use report::JobSummary;
