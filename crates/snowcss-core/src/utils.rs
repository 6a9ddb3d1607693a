//! Small string and number helpers shared across the compiler.

/// Fast djb2 hash of a string, rendered in base 36.
///
/// Operates on UTF-16 code units with 32-bit wrapping arithmetic so keys stay
/// stable across hosts that produce them the same way.
pub fn hash(input: &str) -> String {
    let mut hash: i32 = 5381;
    for unit in input.encode_utf16() {
        hash = hash.wrapping_mul(33) ^ i32::from(unit);
    }
    to_radix(hash as u32, 36)
}

fn to_radix(mut value: u32, radix: u32) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        // Digit is always < radix <= 36.
        if let Some(digit) = char::from_digit(value % radix, radix) {
            digits.push(digit);
        }
        value /= radix;
    }
    digits.iter().rev().collect()
}

/// Formats a number the way CSS authors write it: no trailing `.0`, no `-0`.
///
/// ```
/// use snowcss_core::utils::format_number;
///
/// assert_eq!(format_number(2.0), "2");
/// assert_eq!(format_number(1.5), "1.5");
/// assert_eq!(format_number(-0.0), "0");
/// ```
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}

/// Escapes literal dots so a path segment can live inside a CSS variable name.
pub fn escape_css_var_name(name: &str) -> String {
    name.replace('.', "\\.")
}
