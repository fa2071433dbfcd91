use super::Currency;

/// Render a minor-unit digit string (e.g. `"123456"`) as a display amount (`"R$ 1.234,56"`).
///
/// Non-digit characters are ignored and an empty input renders as an empty string.
pub fn format_minor_units(digits: &str, currency: Currency) -> String {
    let digits: String = digits.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return String::new();
    }

    // At least one integer digit plus two cents digits
    let padded = format!("{:0>3}", digits);
    let (integer_part, cents) = padded.split_at(padded.len() - 2);

    let integer_part = integer_part.trim_start_matches('0');
    let integer_part = if integer_part.is_empty() {
        "0"
    } else {
        integer_part
    };

    format!(
        "{} {}{}{}",
        currency.symbol(),
        group_thousands(integer_part, currency.thousands_separator()),
        currency.decimal_separator(),
        cents
    )
}

fn group_thousands(integer_part: &str, separator: char) -> String {
    let len = integer_part.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, digit) in integer_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(digit);
    }
    grouped
}
