use super::timeline_info::TimelineInfo;

/// Maps a playback timestamp to the annotated frame active at that time.
///
/// Walks the runs accumulating frame durations. The first frame whose start
/// time reaches the requested time decides the answer, reported as the
/// previous frame index and floored at 1 (frame 0 is never active while
/// scanning). Past the end of the timeline the last frame index is returned.
///
/// Returns `None` when the timeline contains no frames. Mismatched run
/// lengths are not checked here; validate at load time.
pub fn resolve_frame_index(timeline: &TimelineInfo, timestamp_seconds: f64) -> Option<usize> {
    let find_time = timestamp_seconds * timeline.time_scale as f64;
    let mut time: u64 = 0;
    let mut k: usize = 0;

    for (count, duration) in timeline.runs() {
        for _ in 0..count {
            if time as f64 >= find_time {
                return Some(k.saturating_sub(1).max(1));
            }
            time += duration;
            k += 1;
        }
    }

    // Both exhaust branches reduce to k - 1 once k > 0.
    k.checked_sub(1)
}
