//! Silence segmentation: turns the detector's timestamped silence log into
//! the ordered, padded, non-overlapping set of keep segments.
//!
//! The detector (ffmpeg's `silencedetect` filter) reports events as plain
//! text lines on stderr: `silence_start: <seconds>` and
//! `silence_end: <seconds>`, in chronological order. Starts and ends are
//! paired positionally, i-th start with i-th end.

use log::warn;

use crate::interval::{keep_complement, TimeInterval};

/// Padding in seconds applied around each keep segment so speech abutting a
/// silence boundary is not clipped.
pub const DEFAULT_SEGMENT_PADDING: f64 = 0.15;

/// Extracts `silence_start` / `silence_end` timestamps from detector output,
/// in the order they appear. Lines carrying neither marker are ignored.
#[must_use]
pub fn parse_silence_log(text: &str) -> (Vec<f64>, Vec<f64>) {
    let mut starts = Vec::new();
    let mut ends = Vec::new();

    for line in text.lines() {
        if let Some(ts) = parse_marker(line, "silence_start:") {
            starts.push(ts);
        }
        if let Some(ts) = parse_marker(line, "silence_end:") {
            ends.push(ts);
        }
    }

    (starts, ends)
}

/// Reads the float immediately following `marker` on `line`, if any.
///
/// The detector can report the very first event slightly below zero
/// (e.g. `silence_start: -0.00129`); the sign is accepted and the value
/// clamped to `0.0` so the event still pairs with its `silence_end`.
fn parse_marker(line: &str, marker: &str) -> Option<f64> {
    let idx = line.find(marker)?;
    let rest = line[idx + marker.len()..].trim_start();
    let token: String = rest
        .chars()
        .enumerate()
        .take_while(|&(i, c)| c.is_ascii_digit() || c == '.' || (i == 0 && c == '-'))
        .map(|(_, c)| c)
        .collect();
    token.parse::<f64>().ok().map(|ts| ts.max(0.0))
}

/// Pairs the i-th silence start with the i-th silence end and returns the
/// padded keep segments covering everything that is not silence.
///
/// With no events at all the result is the single segment `[0, duration]`,
/// which tells the caller to copy the source verbatim instead of re-encoding
/// (see [`is_full_span`]).
///
/// An unmatched trailing `silence_start` (a source that ends in silence with
/// no corresponding `silence_end`) is dropped and the tail treated as
/// retained content. The drop is logged so the behavior is visible; it is
/// intentionally not corrected into silence-to-end-of-file.
#[must_use]
pub fn keep_segments(starts: &[f64], ends: &[f64], duration: f64, padding: f64) -> Vec<TimeInterval> {
    if starts.len() > ends.len() {
        warn!(
            "silence log has {} unmatched silence_start event(s); dropping from {:.2}s onward and keeping the tail",
            starts.len() - ends.len(),
            starts[ends.len()]
        );
    }

    let pairs: Vec<(f64, f64)> = starts.iter().copied().zip(ends.iter().copied()).collect();
    keep_complement(&pairs, duration, padding)
}

/// True when the segment list keeps the whole source untouched, so no
/// re-encode is needed.
#[must_use]
pub fn is_full_span(segments: &[TimeInterval], duration: f64) -> bool {
    segments.len() == 1 && segments[0].start == 0.0 && segments[0].end == duration
}
