//! Timestamp rendering for citations

/// Format seconds as a `MM:SS` timestamp
///
/// Fractional seconds are floored. Negative and non-finite inputs render as
/// `00:00`. Minutes are not wrapped into hours, so long recordings render as
/// e.g. `125:03`.
pub fn format_timestamp(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Format a range as `MM:SS – MM:SS`
pub fn format_range(start: f64, end: f64) -> String {
    format!("{} – {}", format_timestamp(start), format_timestamp(end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0.0), "00:00");
        assert_eq!(format_timestamp(59.99), "00:59");
        assert_eq!(format_timestamp(75.0), "01:15");
        assert_eq!(format_timestamp(3600.0), "60:00");
        assert_eq!(format_timestamp(7503.4), "125:03");
    }

    #[test]
    fn test_negative_and_nan_clamp_to_zero() {
        assert_eq!(format_timestamp(-3.5), "00:00");
        assert_eq!(format_timestamp(f64::NAN), "00:00");
    }

    #[test]
    fn test_format_range() {
        assert_eq!(format_range(75.0, 185.0), "01:15 – 03:05");
        assert_eq!(format_range(0.0, 0.0), "00:00 – 00:00");
    }
}
