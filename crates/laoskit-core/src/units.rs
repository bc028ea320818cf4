//! Unit conversion utilities
//!
//! Document coordinates are points; the controller works in machine units
//! (micrometres with the default scale). Every numeric field of a command
//! line goes through [`format_scaled`]. Feature values arrive as loosely
//! formatted strings and are read with the C `atoi`/`atof` leniency:
//! the longest numeric prefix counts, anything else reads as zero.

/// Points per inch in PostScript document space
pub const POINTS_PER_INCH: f64 = 72.0;

/// Largest value of one 8-bit colour channel
pub const MAX_CHANNEL_VALUE: u32 = 255;

/// Format `value * scale` as fixed-point with `digits` decimals
///
/// * `value` - Coordinate in document units
/// * `scale` - Document-to-machine scale
/// * `digits` - Number of decimals
pub fn format_scaled(value: f64, scale: f64, digits: usize) -> String {
    format!("{:.*}", digits, scale * value)
}

/// Parse the leading integer of a string, `atoi` style
pub fn leading_int(input: &str) -> i64 {
    let s = input.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    let value = digits[..end].parse::<i64>().unwrap_or(0);
    if negative {
        -value
    } else {
        value
    }
}

/// Parse the leading floating point number of a string, `atof` style
pub fn leading_float(input: &str) -> f64 {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'-' | b'+')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return 0.0;
    }

    // Exponent only counts when it carries at least one digit
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'-' | b'+')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().unwrap_or(0.0)
}
