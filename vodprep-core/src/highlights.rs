//! Highlight selection and clip extraction.
//!
//! Scenes are filtered and truncated by a duration policy, scored, ranked,
//! and capped at a maximum count. Scoring is a pluggable strategy so the
//! ranking machinery stays stable while the scoring heuristic evolves.

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::CoreResult;
use crate::external::{ffmpeg, EncodeSettings};
use crate::interval::TimeInterval;
use crate::joblog::JobLog;

/// Duration bounds and count cap applied when selecting highlights.
#[derive(Debug, Clone, Copy)]
pub struct HighlightPolicy {
    /// Scenes shorter than this are dropped outright.
    pub min_duration: f64,
    /// Scenes longer than this are truncated to this length.
    pub max_duration: f64,
    /// At most this many highlights are selected per job.
    pub max_count: usize,
}

impl Default for HighlightPolicy {
    fn default() -> Self {
        HighlightPolicy {
            min_duration: 5.0,
            max_duration: 60.0,
            max_count: 5,
        }
    }
}

/// A selected highlight: the (possibly truncated) scene interval and the
/// score it was ranked by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Highlight {
    pub interval: TimeInterval,
    pub score: f64,
}

/// Default scoring strategy: longer scenes score higher. Deliberately simple;
/// pass a different closure to [`select_highlights`] to change the policy.
#[must_use]
pub fn duration_score(interval: &TimeInterval) -> f64 {
    interval.duration()
}

/// Filters scenes by the duration policy, scores the survivors, and keeps the
/// `max_count` best.
///
/// The sort is stable and descending by score, so equal-scoring scenes retain
/// their chronological catalog order. The returned list is in score order,
/// not chronological order; callers that need time order must re-sort.
#[must_use]
pub fn select_highlights<S>(
    scenes: &[TimeInterval],
    policy: &HighlightPolicy,
    score: S,
) -> Vec<Highlight>
where
    S: Fn(&TimeInterval) -> f64,
{
    let mut selected: Vec<Highlight> = scenes
        .iter()
        .filter_map(|scene| {
            let mut scene = *scene;
            if scene.duration() < policy.min_duration {
                return None;
            }
            if scene.duration() > policy.max_duration {
                scene.end = scene.start + policy.max_duration;
            }
            Some(Highlight {
                interval: scene,
                score: score(&scene),
            })
        })
        .collect();

    selected.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    selected.truncate(policy.max_count);
    selected
}

/// Extracts each selected highlight as a numbered clip under
/// `highlights_dir`, in the given (score-ranked) order.
///
/// A failed extraction is logged and that clip dropped; the remaining clips
/// still run and the job continues. Returns the paths actually produced, in
/// extraction order.
pub fn extract_highlights(
    ffmpeg_bin: &str,
    clean_path: &Path,
    highlights: &[Highlight],
    highlights_dir: &Path,
    settings: &EncodeSettings,
    log: &JobLog,
) -> CoreResult<Vec<PathBuf>> {
    fs::create_dir_all(highlights_dir)?;
    let ext = clean_path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("mp4");

    let mut produced = Vec::new();
    for (idx, hl) in highlights.iter().enumerate() {
        let out_path = highlights_dir.join(format!("highlight_{:02}.{ext}", idx + 1));
        log.log(&format!(
            "[HIGHLIGHT] extracting {} ({:.2}s-{:.2}s, score {:.2})",
            out_path.display(),
            hl.interval.start,
            hl.interval.end,
            hl.score
        ));

        match ffmpeg::extract_clip(
            ffmpeg_bin,
            clean_path,
            &out_path,
            hl.interval.start,
            hl.interval.duration(),
            settings,
        ) {
            Ok(()) => produced.push(out_path),
            Err(e) => log.log(&format!(
                "[HIGHLIGHT] extraction failed for {}: {e}",
                out_path.display()
            )),
        }
    }

    Ok(produced)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(min: f64, max: f64, count: usize) -> HighlightPolicy {
        HighlightPolicy {
            min_duration: min,
            max_duration: max,
            max_count: count,
        }
    }

    #[test]
    fn ranks_surviving_scenes_by_score_after_truncation() {
        // scenes = [(0,5), (10,12), (20,40)], min 3, max 15, count 2.
        let scenes = vec![
            TimeInterval::new(0.0, 5.0),
            TimeInterval::new(10.0, 12.0),
            TimeInterval::new(20.0, 40.0),
        ];
        let selected = select_highlights(&scenes, &policy(3.0, 15.0, 2), duration_score);
        assert_eq!(
            selected,
            vec![
                Highlight {
                    interval: TimeInterval::new(20.0, 35.0),
                    score: 15.0
                },
                Highlight {
                    interval: TimeInterval::new(0.0, 5.0),
                    score: 5.0
                },
            ]
        );
    }

    #[test]
    fn never_exceeds_max_count() {
        let scenes: Vec<TimeInterval> = (0..20)
            .map(|i| TimeInterval::new(i as f64 * 10.0, i as f64 * 10.0 + 8.0))
            .collect();
        let selected = select_highlights(&scenes, &policy(1.0, 60.0, 3), duration_score);
        assert_eq!(selected.len(), 3);
    }

    #[test]
    fn durations_stay_within_policy_bounds() {
        let scenes = vec![
            TimeInterval::new(0.0, 2.0),
            TimeInterval::new(5.0, 300.0),
            TimeInterval::new(400.0, 420.0),
        ];
        let p = policy(4.0, 30.0, 10);
        let selected = select_highlights(&scenes, &p, duration_score);
        assert_eq!(selected.len(), 2);
        for hl in &selected {
            assert!(hl.interval.duration() >= p.min_duration);
            assert!(hl.interval.duration() <= p.max_duration);
        }
    }

    #[test]
    fn equal_scores_keep_chronological_order() {
        // Both scenes truncate to the same 10s duration, so they tie; the
        // stable sort must keep the earlier scene first.
        let scenes = vec![TimeInterval::new(50.0, 70.0), TimeInterval::new(80.0, 95.0)];
        let selected = select_highlights(&scenes, &policy(1.0, 10.0, 5), duration_score);
        assert_eq!(selected[0].interval.start, 50.0);
        assert_eq!(selected[1].interval.start, 80.0);
    }

    #[test]
    fn scoring_strategy_is_pluggable() {
        // Score by earliness instead of duration: earlier scenes win.
        let scenes = vec![TimeInterval::new(0.0, 5.0), TimeInterval::new(10.0, 40.0)];
        let selected = select_highlights(&scenes, &policy(1.0, 60.0, 1), |iv| -iv.start);
        assert_eq!(selected[0].interval.start, 0.0);
    }
}
