//! Human-readable durations and distances.

/// `45s`, `2m 5s`, `1h 30m` style duration text.
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0).round() as i64;
    if total < 60 {
        return format!("{total}s");
    }
    if total < 3600 {
        let (mins, secs) = (total / 60, total % 60);
        return if secs > 0 {
            format!("{mins}m {secs}s")
        } else {
            format!("{mins}m")
        };
    }
    let (hours, mins) = (total / 3600, (total % 3600) / 60);
    if mins > 0 {
        format!("{hours}h {mins}m")
    } else {
        format!("{hours}h")
    }
}

/// Meters below 1 km, otherwise kilometers with one decimal.
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{}m", meters.round() as i64)
    } else {
        format!("{:.1}km", meters / 1000.0)
    }
}

/// Clock offset as `H:MM:SS`, or `M:SS` under an hour.
pub fn format_clock(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as i64;
    let hours = total / 3600;
    let mins = (total % 3600) / 60;
    let secs = total % 60;
    if hours > 0 {
        format!("{hours}:{mins:02}:{secs:02}")
    } else {
        format!("{mins}:{secs:02}")
    }
}
