/// Number of significant digits used when a float is shown as text.
pub const DISPLAY_PRECISION: usize = 6;

/// Parses `text` as an integer literal, requiring the whole string to match.
///
/// ## Example
/// ```
/// use stutsk::util::num::parse_integer;
///
/// assert_eq!(parse_integer("42"), Some(42));
/// assert_eq!(parse_integer("-7"), Some(-7));
/// assert_eq!(parse_integer("42abc"), None);
/// assert_eq!(parse_integer("4.5"), None);
/// ```
#[must_use]
pub fn parse_integer(text: &str) -> Option<i64> {
    text.parse().ok()
}

/// Parses `text` as a float literal, requiring the whole string to match.
///
/// Only decimal notation with an optional exponent is accepted, so words such
/// as `inf` or `nan` are not numbers.
///
/// ## Example
/// ```
/// use stutsk::util::num::parse_float;
///
/// assert_eq!(parse_float("4.5"), Some(4.5));
/// assert_eq!(parse_float("1e3"), Some(1000.0));
/// assert_eq!(parse_float("nan"), None);
/// assert_eq!(parse_float("4.5x"), None);
/// ```
#[must_use]
pub fn parse_float(text: &str) -> Option<f64> {
    if !text.bytes().any(|b| b.is_ascii_digit())
       || !text.bytes()
               .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
    {
        return None;
    }
    text.parse().ok()
}

/// Truncates a float toward zero, saturating at the `i64` bounds.
///
/// ## Example
/// ```
/// use stutsk::util::num::float_to_integer;
///
/// assert_eq!(float_to_integer(3.9), 3);
/// assert_eq!(float_to_integer(-3.9), -3);
/// assert_eq!(float_to_integer(f64::NAN), 0);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn float_to_integer(value: f64) -> i64 {
    value as i64
}

/// Converts an integer to a float, rounding to the nearest representable
/// value.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub const fn integer_to_float(value: i64) -> f64 {
    value as f64
}

/// Converts a collection length or position into an integer value.
#[must_use]
pub fn usize_to_integer(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Formats a float with six significant digits, dropping trailing zeros and
/// switching to exponent notation for very large or very small magnitudes.
///
/// ## Example
/// ```
/// use stutsk::util::num::format_float;
///
/// assert_eq!(format_float(2.0), "2");
/// assert_eq!(format_float(0.1), "0.1");
/// assert_eq!(format_float(1.0 / 3.0), "0.333333");
/// assert_eq!(format_float(1e20), "1e+20");
/// assert_eq!(format_float(0.000_012_5), "1.25e-05");
/// ```
#[must_use]
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_owned();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_owned();
    }

    let scientific = format!("{:.*e}", DISPLAY_PRECISION - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let precision = i32::try_from(DISPLAY_PRECISION).unwrap_or(6);

    if exponent < -4 || exponent >= precision {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_fraction(mantissa), exponent.unsigned_abs())
    } else {
        let decimals = usize::try_from(precision - 1 - exponent).unwrap_or(0);
        trim_fraction(&format!("{value:.decimals$}")).to_owned()
    }
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}
