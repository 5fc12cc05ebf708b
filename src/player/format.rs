/// Format seconds as `m:ss`, flooring both parts.
///
/// Minutes are not padded; seconds always take two digits. Negative and
/// non-finite input renders as `0:00`.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

/// Progress through the track as a percentage in `0.0..=100.0`.
///
/// Returns `0.0` while the duration is unknown (zero, negative or not finite).
pub fn progress_percent(position: f64, duration: f64) -> f64 {
    if !duration.is_finite() || duration <= 0.0 || !position.is_finite() {
        return 0.0;
    }
    (position / duration * 100.0).clamp(0.0, 100.0)
}

/// Seconds left in the track, never negative.
pub fn remaining(position: f64, duration: f64) -> f64 {
    let rem = duration - position;
    if rem.is_finite() && rem > 0.0 { rem } else { 0.0 }
}
