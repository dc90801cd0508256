/// Parse a free-form floor label into a signed floor number.
///
/// Only ASCII digits are kept, so `"B2"` reads as 2 and `"12F"` as 12. A leading minus
/// sign marks a basement. Labels without digits, or whose digits overflow, read as 0.
pub fn parse_floor(label: &str) -> i32 {
    let trimmed = label.trim();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let digits: String = rest.chars().filter(char::is_ascii_digit).collect();
    let floor = digits.parse::<i32>().unwrap_or(0);

    if negative {
        -floor
    } else {
        floor
    }
}
