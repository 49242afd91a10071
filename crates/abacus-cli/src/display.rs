//! Rendering of the calculator display value.

/// Formats `value` for the display.
///
/// Without a precision the shortest representation that round-trips is used.
/// With one, the value is rounded to that many fraction digits and trailing
/// zeros are trimmed. Negative zero renders as `0`; NaN and the infinities
/// render as `NaN`, `inf` and `-inf`.
pub fn format_value(value: f64, precision: Option<usize>) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_positive() { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    match precision {
        None => value.to_string(),
        Some(p) => {
            let formatted = format!("{value:.p$}");
            let trimmed = if formatted.contains('.') {
                formatted.trim_end_matches('0').trim_end_matches('.')
            } else {
                formatted.as_str()
            };
            if trimmed == "-0" { "0".to_string() } else { trimmed.to_string() }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers_have_no_fraction() {
        assert_eq!(format_value(123.0, None), "123");
        assert_eq!(format_value(-42.0, Some(3)), "-42");
    }

    #[test]
    fn test_fractions() {
        assert_eq!(format_value(5.25, None), "5.25");
        assert_eq!(format_value(1.0 / 3.0, Some(4)), "0.3333");
        assert_eq!(format_value(2.75, Some(1)), "2.8");
        assert_eq!(format_value(7.0, Some(0)), "7");
    }

    #[test]
    fn test_special_values() {
        assert_eq!(format_value(f64::NAN, None), "NaN");
        assert_eq!(format_value(f64::INFINITY, Some(2)), "inf");
        assert_eq!(format_value(f64::NEG_INFINITY, None), "-inf");
    }

    #[test]
    fn test_negative_zero() {
        assert_eq!(format_value(-0.0, None), "0");
        assert_eq!(format_value(-0.0001, Some(2)), "0");
    }
}
