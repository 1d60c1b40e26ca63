//! Pure time-interval arithmetic shared by the silence segmenter and the
//! highlight selector.

/// A `[start, end]` span in seconds within a media file.
///
/// Invariant once clamped: `0 <= start <= end <= duration of the media`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeInterval {
    pub start: f64,
    pub end: f64,
}

impl TimeInterval {
    #[must_use]
    pub fn new(start: f64, end: f64) -> Self {
        TimeInterval { start, end }
    }

    /// Length of the interval in seconds.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Clamps both ends into `[0, max]`.
    #[must_use]
    pub fn clamp(self, max: f64) -> Self {
        TimeInterval {
            start: self.start.clamp(0.0, max),
            end: self.end.clamp(0.0, max),
        }
    }

    /// Expands both ends outward by `padding`, then clamps into `[0, max]`.
    #[must_use]
    pub fn pad(self, padding: f64, max: f64) -> Self {
        TimeInterval {
            start: self.start - padding,
            end: self.end + padding,
        }
        .clamp(max)
    }
}

/// Builds the padded complement of chronological `(start, end)` silence pairs
/// within `[0, duration]`: the gap before each silence, plus the tail after
/// the last one. Pure and total on well-ordered input.
///
/// Each emitted gap is padded on both sides so content abutting a silence
/// boundary is not clipped, then clamped back into `[0, duration]`.
#[must_use]
pub fn keep_complement(pairs: &[(f64, f64)], duration: f64, padding: f64) -> Vec<TimeInterval> {
    let mut segments = Vec::new();
    let mut cursor = 0.0;

    for &(start, end) in pairs {
        if start > cursor {
            segments.push(TimeInterval::new(cursor, start).pad(padding, duration));
        }
        cursor = end;
    }

    if cursor < duration {
        segments.push(TimeInterval::new(cursor, duration).pad(padding, duration));
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_limits_both_ends() {
        let iv = TimeInterval::new(-1.0, 120.0).clamp(100.0);
        assert_eq!(iv, TimeInterval::new(0.0, 100.0));
    }

    #[test]
    fn pad_expands_and_clamps() {
        // 0.25 is exactly representable, so these compare exactly.
        let iv = TimeInterval::new(0.0, 10.0).pad(0.25, 100.0);
        assert_eq!(iv, TimeInterval::new(0.0, 10.25));

        let iv = TimeInterval::new(12.0, 50.0).pad(0.25, 100.0);
        assert_eq!(iv, TimeInterval::new(11.75, 50.25));

        let iv = TimeInterval::new(99.5, 100.0).pad(0.25, 100.0);
        assert_eq!(iv, TimeInterval::new(99.25, 100.0));
    }

    #[test]
    fn complement_of_nothing_is_full_span() {
        let segments = keep_complement(&[], 42.0, 0.15);
        assert_eq!(segments, vec![TimeInterval::new(0.0, 42.0)]);
    }

    #[test]
    fn complement_skips_leading_silence() {
        // Silence starting at 0 produces no gap before it.
        let segments = keep_complement(&[(0.0, 5.0)], 20.0, 0.0);
        assert_eq!(segments, vec![TimeInterval::new(5.0, 20.0)]);
    }

    #[test]
    fn complement_omits_tail_when_silence_runs_to_end() {
        let segments = keep_complement(&[(10.0, 20.0)], 20.0, 0.0);
        assert_eq!(segments, vec![TimeInterval::new(0.0, 10.0)]);
    }
}
