//! Brazilian mobile phone helpers
//!
//! Display format is `(DD) DDDDD-DDDD`: two-digit area code, five-digit
//! prefix, four-digit suffix.

/// Progressive formatting of raw input, as typed into the form
///
/// Non-digits are stripped and at most 11 digits are kept.
///
/// ```
/// use shared::phone::format_phone;
///
/// assert_eq!(format_phone("11987654321"), "(11) 98765-4321");
/// assert_eq!(format_phone("119"), "(11) 9");
/// assert_eq!(format_phone("1"), "1");
/// ```
pub fn format_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).take(11).collect();
    match digits.len() {
        0..=2 => digits,
        3..=7 => format!("({}) {}", &digits[..2], &digits[2..]),
        _ => format!("({}) {}-{}", &digits[..2], &digits[2..7], &digits[7..]),
    }
}

/// Exact match of `(DD) DDDDD-DDDD`
pub fn is_valid_phone(phone: &str) -> bool {
    let bytes = phone.as_bytes();
    if bytes.len() != 15 {
        return false;
    }
    bytes.iter().enumerate().all(|(i, b)| match i {
        0 => *b == b'(',
        3 => *b == b')',
        4 => *b == b' ',
        10 => *b == b'-',
        _ => b.is_ascii_digit(),
    })
}
