// vodprep-cli/src/main.rs
//
// Command-line interface for the vodprep pipeline. Parses arguments with
// clap, builds a PipelineConfig for vodprep-core, runs one job per input
// file (strictly one at a time), and maps job-level failures to a non-zero
// process exit.

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use log::{error, info};
use vodprep_core::{
    find_processable_files, run_job, HighlightPolicy, PipelineConfig, WhisperConfig,
};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "vodprep: silence removal and highlight extraction for recorded video",
    long_about = "Removes silent stretches from a recording, detects scenes, extracts \
                  top-scoring highlight clips, and archives the original. The heavy \
                  lifting is delegated to ffmpeg, ffprobe, and a scene-detector CLI."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Process a single recording end to end
    Run {
        /// The recording to process
        #[arg(value_name = "INPUT_FILE")]
        input: PathBuf,

        #[command(flatten)]
        opts: PipelineOpts,
    },
    /// Process every recording in a directory, one at a time
    Batch {
        /// Directory containing recordings
        #[arg(value_name = "INPUT_DIR")]
        input_dir: PathBuf,

        #[command(flatten)]
        opts: PipelineOpts,
    },
}

#[derive(Args, Debug)]
struct PipelineOpts {
    /// Base directory for per-job output folders
    #[arg(long, value_name = "DIR", default_value = "export")]
    export_base: PathBuf,

    /// Scratch directory for silence logs and edit lists
    #[arg(long, value_name = "DIR", default_value = "tmp")]
    tmp_dir: PathBuf,

    /// Directory receiving the original file after a successful job
    #[arg(long, value_name = "DIR", default_value = "archive")]
    archive_dir: PathBuf,

    /// Silence noise floor in dB (audio below this counts as silence)
    #[arg(long, value_name = "DB", default_value_t = -35, allow_hyphen_values = true)]
    noise_db: i32,

    /// Minimum silence duration in seconds before a stretch is cut
    #[arg(long, value_name = "SECONDS", default_value_t = 1.0)]
    min_silence: f64,

    /// Padding in seconds kept around each non-silent segment
    #[arg(long, value_name = "SECONDS", default_value_t = 0.15)]
    padding: f64,

    /// Minimum highlight duration in seconds
    #[arg(long, value_name = "SECONDS", default_value_t = 5.0)]
    min_highlight: f64,

    /// Maximum highlight duration in seconds (longer scenes are truncated)
    #[arg(long, value_name = "SECONDS", default_value_t = 60.0)]
    max_highlight: f64,

    /// Maximum number of highlight clips per job
    #[arg(long, value_name = "COUNT", default_value_t = 5)]
    max_highlights: usize,

    /// Resource monitor sampling interval in seconds
    #[arg(long, value_name = "SECONDS", default_value_t = 0.5)]
    sample_interval: f64,

    /// Path to the ffmpeg binary
    #[arg(long, value_name = "PATH", default_value = "ffmpeg")]
    ffmpeg: String,

    /// Path to the ffprobe binary
    #[arg(long, value_name = "PATH", default_value = "ffprobe")]
    ffprobe: String,

    /// Path to the scene detector binary
    #[arg(long, value_name = "PATH", default_value = "scenedetect")]
    scenedetect: String,

    /// Path to a whisper.cpp-style binary for subtitle generation
    #[arg(long, value_name = "PATH", requires = "whisper_model")]
    whisper_bin: Option<String>,

    /// Path to the speech model used for subtitle generation
    #[arg(long, value_name = "PATH", requires = "whisper_bin")]
    whisper_model: Option<PathBuf>,
}

impl PipelineOpts {
    fn into_config(self) -> PipelineConfig {
        let mut config = PipelineConfig::new(self.export_base, self.tmp_dir, self.archive_dir);
        config.ffmpeg_path = self.ffmpeg;
        config.ffprobe_path = self.ffprobe;
        config.scenedetect_path = self.scenedetect;
        config.silence_noise_db = self.noise_db;
        config.silence_min_duration = self.min_silence;
        config.segment_padding = self.padding;
        config.highlight_policy = HighlightPolicy {
            min_duration: self.min_highlight,
            max_duration: self.max_highlight,
            max_count: self.max_highlights,
        };
        config.monitor_interval = Duration::from_secs_f64(self.sample_interval);
        if let (Some(bin_path), Some(model_path)) = (self.whisper_bin, self.whisper_model) {
            config.whisper = Some(WhisperConfig {
                bin_path,
                model_path,
            });
        }
        config
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let failures = match cli.command {
        Commands::Run { input, opts } => run_jobs(&opts.into_config(), &[input]),
        Commands::Batch { input_dir, opts } => {
            let config = opts.into_config();
            match find_processable_files(&input_dir) {
                Ok(files) => run_jobs(&config, &files),
                Err(e) => {
                    error!("{e}");
                    1
                }
            }
        }
    };

    if failures > 0 {
        process::exit(1);
    }
}

/// Runs each job in turn and returns the number of failures. One failed job
/// does not stop the remaining ones in batch mode.
fn run_jobs(config: &PipelineConfig, inputs: &[PathBuf]) -> usize {
    let mut failures = 0;
    for input in inputs {
        match run_job(config, input) {
            Ok(report) => {
                info!(
                    "{}: clean video plus {} highlight clip(s), original archived to {}",
                    input.display(),
                    report.highlights.len(),
                    report.archived_to.display()
                );
            }
            Err(e) => {
                error!("{}: {e}", input.display());
                failures += 1;
            }
        }
    }
    failures
}
