//! Playback position helpers for the waveform player's progress bar.

/// `m:ss`, with anything non-finite, negative or zero shown as `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }
    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Playback position for a click `click_x` pixels into a bar `bar_width`
/// pixels wide, clamped to `[0, duration]`.
pub fn seek_time(click_x: f64, bar_width: f64, duration: f64) -> Option<f64> {
    if !(bar_width > 0.0) || !duration.is_finite() || duration <= 0.0 || !click_x.is_finite() {
        return None;
    }
    Some((click_x / bar_width * duration).clamp(0.0, duration))
}

/// Fraction of the track played, in `[0, 1]`.
pub fn progress(current: f64, duration: f64) -> f64 {
    if !duration.is_finite() || duration <= 0.0 || !current.is_finite() {
        return 0.0;
    }
    (current / duration).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_padded_seconds() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(9.9), "0:09");
        assert_eq!(format_time(61.0), "1:01");
        assert_eq!(format_time(3600.0), "60:00");
    }

    #[test]
    fn seek_clamps_to_track() {
        assert_eq!(seek_time(50.0, 200.0, 120.0), Some(30.0));
        assert_eq!(seek_time(-10.0, 200.0, 120.0), Some(0.0));
        assert_eq!(seek_time(250.0, 200.0, 120.0), Some(120.0));
        assert_eq!(seek_time(50.0, 0.0, 120.0), None);
        assert_eq!(seek_time(50.0, 200.0, f64::NAN), None);
    }

    #[test]
    fn progress_is_a_fraction() {
        assert_eq!(progress(30.0, 120.0), 0.25);
        assert_eq!(progress(30.0, 0.0), 0.0);
        assert_eq!(progress(500.0, 120.0), 1.0);
    }
}
