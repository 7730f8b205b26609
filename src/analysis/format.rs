//! Display helpers shared by reply composition and commentary bindings.

/// Compact magnitude rendering for dollar figures. Zero and missing values
/// both read as unavailable.
pub fn format_magnitude(value: Option<f64>) -> String {
    match value {
        None => "N/A".to_string(),
        Some(v) if v == 0.0 => "N/A".to_string(),
        Some(v) if v >= 1_000_000.0 => format!("{:.2}M", v / 1_000_000.0),
        Some(v) if v >= 1_000.0 => format!("{:.2}K", v / 1_000.0),
        Some(v) => format!("{:.2}", v),
    }
}

/// Render every supplied percentage, two decimals each.
pub fn format_percentile_list(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format!("{:.2}%", v))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Coarse "time ago" label from a past millisecond timestamp.
pub fn relative_age(then_millis: i64, now_millis: i64) -> String {
    let seconds = (now_millis - then_millis).max(0) / 1000;
    if seconds < 60 {
        "just now".to_string()
    } else if seconds < 3600 {
        format!("{}m ago", seconds / 60)
    } else if seconds < 86_400 {
        format!("{}h ago", seconds / 3600)
    } else if seconds < 172_800 {
        "1 day ago".to_string()
    } else {
        format!("{} days ago", seconds / 86_400)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_magnitude() {
        assert_eq!(format_magnitude(None), "N/A");
        assert_eq!(format_magnitude(Some(0.0)), "N/A");
        assert_eq!(format_magnitude(Some(1500.0)), "1.50K");
        assert_eq!(format_magnitude(Some(2_500_000.0)), "2.50M");
        assert_eq!(format_magnitude(Some(999.4)), "999.40");
    }

    #[test]
    fn test_format_percentile_list() {
        assert_eq!(format_percentile_list(&[12.35, 5.0]), "12.35%, 5.00%");
        assert_eq!(format_percentile_list(&[]), "");
    }

    #[test]
    fn test_relative_age_bands() {
        let now = 1_700_000_000_000;
        assert_eq!(relative_age(now - 30_000, now), "just now");
        assert_eq!(relative_age(now - 5 * 60_000, now), "5m ago");
        assert_eq!(relative_age(now - 3 * 3_600_000, now), "3h ago");
        assert_eq!(relative_age(now - 30 * 3_600_000, now), "1 day ago");
        assert_eq!(relative_age(now - 72 * 3_600_000, now), "3 days ago");
    }

    #[test]
    fn test_relative_age_clamps_future_timestamps() {
        let now = 1_700_000_000_000;
        assert_eq!(relative_age(now + 60_000, now), "just now");
    }
}
