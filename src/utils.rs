// Utility functions

/// Formats a score with exactly two decimals.
///
/// Rounds half away from zero at the second decimal, then prints. A negative
/// value that rounds to zero keeps its sign (`-0.004` -> `"-0.00"`).
pub fn format_score(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    format!("{:.2}", rounded)
}

/// Trims the value; `None` when it is missing or blank.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_to_two_decimals() {
        assert_eq!(format_score(0.456), "0.46");
        assert_eq!(format_score(1.0), "1.00");
        assert_eq!(format_score(-1.0), "-1.00");
        assert_eq!(format_score(0.0), "0.00");
        assert_eq!(format_score(0.5), "0.50");
    }

    #[test]
    fn halves_round_away_from_zero() {
        assert_eq!(format_score(0.125), "0.13");
        assert_eq!(format_score(-0.125), "-0.13");
        assert_eq!(format_score(0.375), "0.38");
    }

    #[test]
    fn small_negative_keeps_its_sign() {
        assert_eq!(format_score(-0.004), "-0.00");
        assert_eq!(format_score(0.004), "0.00");
    }

    #[test]
    fn non_empty_filters_blank_values() {
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some("  ".into())), None);
        assert_eq!(non_empty(Some(" key ".into())), Some("key".into()));
    }
}
