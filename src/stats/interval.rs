//! Exact downtime calculation by interval arithmetic over outage windows.

use super::{OutageWindow, QueryRange};

/// Compute `(availability_percentage, downtime_seconds)` for a device over
/// an inclusive epoch range.
///
/// Downtime is the total number of seconds within the range during which
/// the device was in an outage state, with overlapping or touching windows
/// counted exactly once. An outage with no recovery time is treated as
/// lasting through the end of the range. The percentage is rounded to
/// 4 decimal places; a zero-length range yields 0.0 rather than dividing
/// by zero.
pub fn compute_downtime(windows: &[OutageWindow], range: QueryRange) -> (f64, i64) {
    let mut sorted: Vec<OutageWindow> = windows.to_vec();
    sorted.sort_by_key(|w| w.down_at);

    let range_total = range.duration();
    let mut downtime: i64 = 0;

    // Was the device already down at the range start? Scan every window;
    // the last qualifying one in sorted order is the boundary-crossing
    // outage. Tracked by index so that windows with identical fields stay
    // distinct entries.
    let mut boundary: Option<usize> = None;
    for (i, w) in sorted.iter().enumerate() {
        if w.down_at <= range.start && w.up_at.map_or(true, |up| up > range.start) {
            boundary = Some(i);
        }
    }

    // Everything before the cursor has already been counted as down.
    let mut cursor = range.start;

    if let Some(i) = boundary {
        let outage_end = sorted[i].up_at.unwrap_or(range.end);
        let clipped_end = outage_end.min(range.end);
        if clipped_end > range.start {
            downtime += clipped_end - range.start;
            cursor = clipped_end;
        }
    }

    for (i, w) in sorted.iter().enumerate() {
        if boundary == Some(i) {
            continue;
        }

        let effective_end = w.up_at.unwrap_or(range.end);
        if effective_end <= range.start {
            // Ended before (or exactly at) the range start: no overlap.
            continue;
        }

        let inter_start = w.down_at.max(cursor);
        let inter_end = effective_end.min(range.end);
        if inter_end > inter_start {
            downtime += inter_end - inter_start;
            cursor = inter_end;
        }
    }

    let uptime = (range_total - downtime).max(0);
    let percentage = if range_total > 0 {
        round4(uptime as f64 / range_total as f64 * 100.0)
    } else {
        0.0
    };

    (percentage, downtime)
}

fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}
