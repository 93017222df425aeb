//! Time display formatting

/// Split a second count into hours, minutes and seconds
pub fn split_hms(total_seconds: u64) -> (u64, u64, u64) {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    (hours, minutes, seconds)
}

/// Format a second count as `MM:SS`, or `HH:MM:SS` from one hour upwards.
///
/// Negative values are clamped to zero.
pub fn format_time(total_seconds: i64) -> String {
    let total = total_seconds.max(0) as u64;
    let (hours, minutes, seconds) = split_hms(total);

    if total < 3600 {
        return format!("{:02}:{:02}", minutes, seconds);
    }

    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn formats_zero() {
        assert_eq!(format_time(0), "00:00");
    }

    #[test]
    fn formats_under_a_minute() {
        assert_eq!(format_time(59), "00:59");
    }

    #[test]
    fn formats_last_second_before_an_hour() {
        assert_eq!(format_time(3599), "59:59");
    }

    #[test]
    fn switches_to_hours_at_one_hour() {
        assert_eq!(format_time(3600), "01:00:00");
        assert_eq!(format_time(3661), "01:01:01");
    }

    #[test]
    fn hours_grow_past_two_digits() {
        assert_eq!(format_time(100 * 3600 + 5), "100:00:05");
    }

    #[test]
    fn clamps_negative() {
        assert_eq!(format_time(-5), "00:00");
    }

    #[test]
    fn short_form_below_an_hour_long_form_above() {
        for s in [0, 1, 60, 1500, 3599] {
            assert_eq!(format_time(s).len(), 5, "{s}");
        }
        for s in [3600, 7322, 86399] {
            assert_eq!(format_time(s).len(), 8, "{s}");
        }
    }

    #[test]
    fn splits_hours_minutes_seconds() {
        assert_eq!(split_hms(1500), (0, 25, 0));
        assert_eq!(split_hms(3661), (1, 1, 1));
    }
}
