//! Human-readable remaining-time labels.

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

pub const EXPIRED_LABEL: &str = "Expired";

/// Render whole seconds as the coarsest two units that apply.
///
/// `0` and negative inputs are `"Expired"`; otherwise `"{d}d {h}h"`,
/// `"{h}h {m}m"` or `"{m}m {s}s"`.
pub fn format_remaining(seconds: i64) -> String {
    if seconds <= 0 {
        return EXPIRED_LABEL.to_string();
    }

    if seconds >= DAY {
        format!("{}d {}h", seconds / DAY, (seconds % DAY) / HOUR)
    } else if seconds >= HOUR {
        format!("{}h {}m", seconds / HOUR, (seconds % HOUR) / MINUTE)
    } else {
        format!("{}m {}s", seconds / MINUTE, seconds % MINUTE)
    }
}

/// Label for a timer entry that may not exist; absent counts as expired.
pub fn format_optional(seconds: Option<u64>) -> String {
    let seconds = seconds.map(|s| i64::try_from(s).unwrap_or(i64::MAX)).unwrap_or(0);
    format_remaining(seconds)
}
