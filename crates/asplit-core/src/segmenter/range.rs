//! Segment type and time-range planning.

use crate::timecode::format_hms;

/// A single segment of the source: time range `[start, end)` in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Position in the output numbering.
    pub sequence: u64,
    /// Start offset in seconds (inclusive).
    pub start: f64,
    /// End offset in seconds (exclusive).
    pub end: f64,
}

impl Segment {
    /// Length of this segment in seconds.
    pub fn len_secs(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }

    /// Human-readable range, `[HH:MM:SS-HH:MM:SS]`.
    pub fn range_label(&self) -> String {
        format!("[{}-{}]", format_hms(self.start), format_hms(self.end))
    }
}

/// Builds a segment plan covering `[start, end)` in pieces of `segment_secs`.
///
/// Segments are contiguous; the last one is shortened so it ends exactly at
/// `end`. Numbering starts at `first_sequence` and has no gaps.
/// Returns an empty vec if the range is empty or `segment_secs` is not a
/// positive finite number. Planning stops after the segment numbered
/// `u64::MAX`; callers that need full coverage check [`last_sequence`] first.
pub fn plan_segments(start: f64, end: f64, segment_secs: f64, first_sequence: u64) -> Vec<Segment> {
    if !(start.is_finite() && end.is_finite() && start < end) {
        return Vec::new();
    }
    if !(segment_secs.is_finite() && segment_secs > 0.0) {
        return Vec::new();
    }

    let expected = ((end - start) / segment_secs).ceil() as usize;
    let mut out = Vec::with_capacity(expected.min(1 << 16));
    let mut cursor = start;
    let mut sequence = first_sequence;

    while cursor < end {
        let mut next = (cursor + segment_secs).min(end);
        // A step too small to move the cursor at this magnitude would never terminate.
        if next <= cursor {
            next = end;
        }
        out.push(Segment {
            sequence,
            start: cursor,
            end: next,
        });
        cursor = next;
        match sequence.checked_add(1) {
            Some(n) => sequence = n,
            None => break,
        }
    }

    out
}

/// Number of the last segment a plan of `[start, end)` would carry, or
/// `None` if it does not fit in `u64`. Inputs that plan nothing give
/// `Some(first_sequence)`.
pub fn last_sequence(start: f64, end: f64, segment_secs: f64, first_sequence: u64) -> Option<u64> {
    if !(start < end && segment_secs.is_finite() && segment_secs > 0.0) {
        return Some(first_sequence);
    }
    let parts = ((end - start) / segment_secs).ceil();
    if parts.is_nan() || parts >= u64::MAX as f64 {
        return None;
    }
    first_sequence.checked_add((parts as u64).saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(segs: &[Segment]) -> Vec<(f64, f64, u64)> {
        segs.iter().map(|s| (s.start, s.end, s.sequence)).collect()
    }

    #[test]
    fn plan_segments_even() {
        let segs = plan_segments(0.0, 3600.0, 1200.0, 1);
        assert_eq!(
            bounds(&segs),
            vec![(0.0, 1200.0, 1), (1200.0, 2400.0, 2), (2400.0, 3600.0, 3)]
        );
    }

    #[test]
    fn plan_segments_remainder() {
        let segs = plan_segments(0.0, 1000.0, 300.0, 1);
        assert_eq!(
            bounds(&segs),
            vec![
                (0.0, 300.0, 1),
                (300.0, 600.0, 2),
                (600.0, 900.0, 3),
                (900.0, 1000.0, 4)
            ]
        );
        assert_eq!(segs[3].len_secs(), 100.0);
    }

    #[test]
    fn plan_segments_one_when_range_fits() {
        let segs = plan_segments(10.0, 70.0, 60.0, 1);
        assert_eq!(bounds(&segs), vec![(10.0, 70.0, 1)]);

        let segs = plan_segments(10.0, 40.0, 60.0, 1);
        assert_eq!(bounds(&segs), vec![(10.0, 40.0, 1)]);
    }

    #[test]
    fn plan_segments_numbering_offset() {
        let segs = plan_segments(0.0, 50.0, 10.0, 7);
        let seqs: Vec<u64> = segs.iter().map(|s| s.sequence).collect();
        assert_eq!(seqs, vec![7, 8, 9, 10, 11]);
    }

    #[test]
    fn plan_segments_contiguous_for_many_inputs() {
        let cases = [
            (0.0, 3600.0, 1200.0),
            (5.0, 1000.0, 300.0),
            (0.0, 5025.375, 1200.0),
            (120.0, 121.0, 0.25),
            (0.0, 7.0, 3.0),
            (17.0, 9999.0, 61.5),
        ];
        for (start, end, len) in cases {
            let segs = plan_segments(start, end, len, 1);
            assert_eq!(segs.len(), ((end - start) / len).ceil() as usize, "{start}..{end}/{len}");
            assert_eq!(segs.first().unwrap().start, start);
            assert_eq!(segs.last().unwrap().end, end);
            for pair in segs.windows(2) {
                assert_eq!(pair[0].end, pair[1].start);
                assert_eq!(pair[0].sequence + 1, pair[1].sequence);
            }
            for seg in &segs {
                assert!(seg.start < seg.end);
                assert!(seg.len_secs() <= len);
            }
        }
    }

    #[test]
    fn plan_segments_idempotent() {
        assert_eq!(
            plan_segments(3.5, 4000.25, 600.0, 2),
            plan_segments(3.5, 4000.25, 600.0, 2)
        );
    }

    #[test]
    fn plan_segments_empty() {
        assert!(plan_segments(100.0, 100.0, 10.0, 1).is_empty());
        assert!(plan_segments(200.0, 100.0, 10.0, 1).is_empty());
        assert!(plan_segments(0.0, 100.0, 0.0, 1).is_empty());
        assert!(plan_segments(0.0, 100.0, -5.0, 1).is_empty());
        assert!(plan_segments(0.0, f64::NAN, 5.0, 1).is_empty());
    }

    #[test]
    fn plan_segments_stops_at_max_sequence() {
        let segs = plan_segments(0.0, 60.0, 60.0, u64::MAX);
        assert_eq!(bounds(&segs), vec![(0.0, 60.0, u64::MAX)]);

        let segs = plan_segments(0.0, 100.0, 10.0, u64::MAX - 1);
        assert_eq!(
            bounds(&segs),
            vec![(0.0, 10.0, u64::MAX - 1), (10.0, 20.0, u64::MAX)]
        );
    }

    #[test]
    fn last_sequence_detects_overflow() {
        assert_eq!(last_sequence(0.0, 1000.0, 300.0, 1), Some(4));
        assert_eq!(last_sequence(0.0, 60.0, 60.0, u64::MAX), Some(u64::MAX));
        assert_eq!(last_sequence(0.0, 120.0, 60.0, u64::MAX), None);
        assert_eq!(last_sequence(0.0, 1e300, 1e-300, 1), None);
    }

    #[test]
    fn segment_range_label() {
        let s = Segment {
            sequence: 2,
            start: 1200.0,
            end: 2400.0,
        };
        assert_eq!(s.range_label(), "[00:20:00-00:40:00]");
    }
}
