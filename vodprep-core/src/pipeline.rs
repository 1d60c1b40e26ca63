//! Job orchestration: the sequential stage machine with guaranteed monitor
//! shutdown and summary emission on every exit path.
//!
//! Stages run strictly in order for one input file at a time:
//!
//! ```text
//! Init -> ProbeOriginal -> RemoveSilence -> ProbeClean -> [Subtitles]
//!      -> DetectScenes -> ExtractHighlights -> Archive -> Done
//! ```
//!
//! The resource monitor is started right after init and stopped
//! unconditionally before the summary is emitted, whichever stage ended the
//! job. A stage failure logs the error, still produces the summary from
//! whatever was computed so far, and then propagates to the caller; the
//! original file is archived only as the very last action of a successful
//! run.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::assemble;
use crate::config::PipelineConfig;
use crate::error::{CoreError, CoreResult};
use crate::external::{check_dependency, ffmpeg, ffprobe, scenedetect, whisper};
use crate::highlights;
use crate::joblog::JobLog;
use crate::monitor::{MonitorStats, ResourceMonitor};
use crate::report::JobSummary;
use crate::scenes;
use crate::silence;

/// Per-job state: identity, directory tree, and the log sink. Created once
/// per input file and owned for the job's lifetime.
pub struct JobContext {
    /// Filename stem of the input; keys the job directory.
    pub job_id: String,
    pub job_dir: PathBuf,
    pub tmp_dir: PathBuf,
    pub log: JobLog,
    pub started: Instant,
}

impl JobContext {
    /// Creates the per-job directory tree and log sink.
    pub fn create(config: &PipelineConfig, input: &Path) -> CoreResult<Self> {
        let job_id = input
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| {
                CoreError::PathError(format!(
                    "input {} has no usable filename stem",
                    input.display()
                ))
            })?
            .to_string();

        fs::create_dir_all(&config.export_base)?;
        let job_dir = config.export_base.join(&job_id);
        fs::create_dir_all(&job_dir)?;
        fs::create_dir_all(&config.tmp_dir)?;

        let log = JobLog::create(&job_dir.join("pipeline.log"))?;

        Ok(JobContext {
            job_id,
            job_dir,
            tmp_dir: config.tmp_dir.clone(),
            log,
            started: Instant::now(),
        })
    }
}

/// Everything a finished job produced.
#[derive(Debug)]
pub struct JobReport {
    pub clean_path: PathBuf,
    pub highlights: Vec<PathBuf>,
    pub subtitles: Option<PathBuf>,
    pub archived_to: PathBuf,
    pub summary: JobSummary,
}

/// Outputs of the stage sequence, before the summary is attached.
struct StageOutputs {
    clean_path: PathBuf,
    highlights: Vec<PathBuf>,
    subtitles: Option<PathBuf>,
    archived_to: PathBuf,
}

/// Runs the full pipeline for one input file.
///
/// On success the original input has been moved into the archive directory
/// and the report lists every artifact. On failure the error from the
/// failing stage is returned after the monitor has been stopped and the
/// summary written to the job log; the original file stays where it was.
pub fn run_job(config: &PipelineConfig, input: &Path) -> CoreResult<JobReport> {
    config.validate()?;
    check_dependency(&config.ffmpeg_path)?;
    check_dependency(&config.ffprobe_path)?;
    check_dependency(&config.scenedetect_path)?;
    if let Some(w) = &config.whisper {
        check_dependency(&w.bin_path)?;
    }

    let ctx = JobContext::create(config, input)?;
    ctx.log.log(&format!(
        "[PIPELINE] starting job '{}' for {}",
        ctx.job_id,
        input.display()
    ));

    let monitor = ResourceMonitor::start(config.monitor_interval);
    let mut summary = JobSummary::default();

    let result = run_stages(config, &ctx, input, &mut summary);

    // Monitor shutdown and the summary happen before any error propagates,
    // whatever stage ended the job.
    let samples = monitor.stop();
    summary.stats = MonitorStats::from_samples(&samples);
    summary.total_time = ctx.started.elapsed();
    if let Err(e) = &result {
        ctx.log.log(&format!("[PIPELINE] ERROR: {e}"));
    }
    summary.emit(&ctx.log);
    ctx.log.log(&format!("[PIPELINE] finished job '{}'", ctx.job_id));

    result.map(|out| JobReport {
        clean_path: out.clean_path,
        highlights: out.highlights,
        subtitles: out.subtitles,
        archived_to: out.archived_to,
        summary,
    })
}

fn run_stages(
    config: &PipelineConfig,
    ctx: &JobContext,
    input: &Path,
    summary: &mut JobSummary,
) -> CoreResult<StageOutputs> {
    // ProbeOriginal. Retries while the file may still be landing; a container
    // with no readable duration is fatal.
    let original_duration =
        ffprobe::probe_duration_retrying(&config.ffprobe_path, input, config.probe_retry_delay)?;
    summary.original_duration = Some(original_duration);
    ctx.log.log(&format!(
        "[PIPELINE] original duration: {original_duration:.2} seconds"
    ));

    // RemoveSilence.
    let ext = input.extension().and_then(|e| e.to_str()).unwrap_or("mp4");
    let clean_path = ctx.job_dir.join(format!("clean.{ext}"));
    remove_silence(config, ctx, input, &clean_path, original_duration)?;
    ctx.log
        .log(&format!("[PIPELINE] clean video at {}", clean_path.display()));

    // ProbeClean.
    let clean_duration = ffprobe::probe_duration_retrying(
        &config.ffprobe_path,
        &clean_path,
        config.probe_retry_delay,
    )?;
    summary.clean_duration = Some(clean_duration);
    ctx.log.log(&format!(
        "[PIPELINE] clean duration: {clean_duration:.2} seconds ({:.2} seconds removed)",
        original_duration - clean_duration
    ));

    // Subtitles, only when a speech model is configured.
    let subtitles = match &config.whisper {
        Some(w) => {
            ctx.log.log("[SUBS] generating transcript");
            let srt = whisper::generate_subtitles(
                &w.bin_path,
                &w.model_path,
                &clean_path,
                &ctx.job_dir.join("subtitles"),
                &ctx.job_id,
            )?;
            ctx.log
                .log(&format!("[SUBS] subtitles at {}", srt.display()));
            Some(srt)
        }
        None => None,
    };

    // DetectScenes.
    ctx.log.log("[SCENE] running scene detection");
    let scenes_csv = scenedetect::run_scene_detect(
        &config.scenedetect_path,
        &clean_path,
        &ctx.job_dir.join("scenes"),
    )?;
    let scene_list = scenes::parse_scenes_csv(&scenes_csv)?;
    ctx.log
        .log(&format!("[SCENE] parsed {} scene(s)", scene_list.len()));

    // ExtractHighlights.
    let selected = highlights::select_highlights(
        &scene_list,
        &config.highlight_policy,
        highlights::duration_score,
    );
    ctx.log.log(&format!(
        "[HIGHLIGHT] selected {} of {} scene(s)",
        selected.len(),
        scene_list.len()
    ));
    let clips = highlights::extract_highlights(
        &config.ffmpeg_path,
        &clean_path,
        &selected,
        &ctx.job_dir.join("highlights"),
        &config.encode,
        &ctx.log,
    )?;
    summary.highlight_count = clips.len();

    // Archive. Destructive move of the original; must stay the last action
    // of the success path.
    fs::create_dir_all(&config.archive_dir)?;
    let file_name = input.file_name().ok_or_else(|| {
        CoreError::PathError(format!("input {} has no filename", input.display()))
    })?;
    let archived_to = config.archive_dir.join(file_name);
    move_file(input, &archived_to)?;
    ctx.log.log(&format!(
        "[PIPELINE] archived original to {}",
        archived_to.display()
    ));

    Ok(StageOutputs {
        clean_path,
        highlights: clips,
        subtitles,
        archived_to,
    })
}

/// Silence-removal stage: detect, segment, then either copy the source
/// verbatim (nothing to cut) or assemble the re-encoded clean video.
fn remove_silence(
    config: &PipelineConfig,
    ctx: &JobContext,
    input: &Path,
    clean_path: &Path,
    duration: f64,
) -> CoreResult<()> {
    let silence_log = ctx.tmp_dir.join(format!("{}-silence.log", ctx.job_id));
    ctx.log.log(&format!(
        "[SILENCE] detecting silence (noise {} dB, min {:.2}s)",
        config.silence_noise_db, config.silence_min_duration
    ));
    ffmpeg::run_silencedetect(
        &config.ffmpeg_path,
        input,
        &silence_log,
        config.silence_noise_db,
        config.silence_min_duration,
    )?;

    let log_text = fs::read_to_string(&silence_log)?;
    let (starts, ends) = silence::parse_silence_log(&log_text);
    ctx.log.log(&format!(
        "[SILENCE] {} silence interval(s) reported",
        ends.len()
    ));

    let segments = silence::keep_segments(&starts, &ends, duration, config.segment_padding);

    // An empty segment list means silence covered the whole span; like the
    // untouched full-span case it is handed over as a verbatim copy rather
    // than an empty encode.
    if segments.is_empty() || silence::is_full_span(&segments, duration) {
        ctx.log.log("[SILENCE] nothing to cut, copying source");
        fs::copy(input, clean_path)?;
        return Ok(());
    }

    ctx.log.log(&format!(
        "[SILENCE] keeping {} segment(s), re-encoding",
        segments.len()
    ));
    assemble::build_clean_video(
        &config.ffmpeg_path,
        input,
        clean_path,
        &segments,
        &config.encode,
        &ctx.tmp_dir,
    )
}

/// Moves the original into the archive under its own basename. `rename` when
/// possible, falling back to copy+remove when the archive sits on another
/// filesystem.
fn move_file(from: &Path, to: &Path) -> CoreResult<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(_) => {
            fs::copy(from, to)?;
            fs::remove_file(from)?;
            Ok(())
        }
    }
}
