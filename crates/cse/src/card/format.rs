//! Cosmetic formatting the gateway expects for card fields.

/// Minimum digit count before a card number is grouped.
pub const MIN_GROUPED_LEN: usize = 15;

/// Group a card number into 4-digit blocks: `0123 4567 8901 2345`.
///
/// - Input with exactly four spaces is assumed formatted and returned as-is.
/// - Any other spaces are removed before grouping.
/// - Numbers shorter than [`MIN_GROUPED_LEN`] are returned without grouping.
///
/// The first three blocks are four characters; the remainder forms the last
/// block, so 19-digit numbers end in a 7-character group.
pub fn format_card_number(number: &str) -> String {
    let spaces = number.matches(' ').count();
    if spaces == 4 {
        return number.to_owned();
    }

    let digits: Vec<char> = number.chars().filter(|c| *c != ' ').collect();
    if digits.len() < MIN_GROUPED_LEN {
        return digits.into_iter().collect();
    }

    let mut out = String::with_capacity(digits.len() + 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && i < 16 && i % 4 == 0 {
            out.push(' ');
        }
        out.push(*c);
    }
    out
}

/// Format an expiry as `("MM", "YYYY")`.
///
/// `year` is expected to be fully qualified (`2024`, not `24`).
pub fn format_expiry(month: u32, year: i32) -> (String, String) {
    (format!("{month:02}"), year.to_string())
}
