//! Price parser

use crate::config::PriceUnits;

/// Symbols removed before the numeric part is read
const CURRENCY_SYMBOLS: &[char] = &[
    '$', '¢', '€', '£', '¥', '₹', '₽', '₩', '₺', '₫', '₱', '₪', '₦', '₴', '₡', '﷼',
];

/// Dollar-style symbols carrying a country prefix (`R$ 7.50`)
const PREFIXED_SYMBOLS: &[&str] = &["US$", "NZ$", "MX$", "R$", "C$", "A$", "S/"];

/// ISO 4217 codes accepted at either end of the amount
const CURRENCY_CODES: &[&str] = &[
    "USD", "EUR", "GBP", "BRL", "ARS", "MXN", "CLP", "COP", "PEN", "UYU", "PYG", "BOB", "CAD",
    "AUD", "NZD", "JPY", "CNY", "CHF", "INR",
];

/// Parse price text into minor units
///
/// Returns `None` for empty, non-numeric, negative or overflowing input.
/// Malformed input never panics.
pub fn parse_price(text: &str, units: PriceUnits) -> Option<u64> {
    let cleaned = clean(text)?;
    match units {
        PriceUnits::MinorUnitRounded => parse_decimal_minor_units(&cleaned),
        PriceUnits::MajorUnitInteger => parse_integer_digits(&cleaned),
    }
}

/// Render minor units as `<major>.<minor>` with two fractional digits
pub fn format_minor_units(amount: u64) -> String {
    format!("{}.{:02}", amount / 100, amount % 100)
}

fn clean(text: &str) -> Option<String> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let compact = strip_affix(&compact, PREFIXED_SYMBOLS);

    let stripped: String = compact
        .chars()
        .filter(|c| !CURRENCY_SYMBOLS.contains(c) && *c != ',')
        .collect();

    let trimmed = strip_affix(&stripped, CURRENCY_CODES);
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Remove one known marker from the start and one from the end, ignoring case
///
/// Only listed markers are removed, so `"5E"` or `"AB12"` stay malformed.
fn strip_affix<'a>(s: &'a str, markers: &[&str]) -> &'a str {
    let has_prefix = |m: &&str| {
        s.len() >= m.len() && s.is_char_boundary(m.len()) && s[..m.len()].eq_ignore_ascii_case(m)
    };
    let s = match markers.iter().copied().find(has_prefix) {
        Some(m) => &s[m.len()..],
        None => s,
    };

    let has_suffix = |m: &&str| {
        s.len() >= m.len()
            && s.is_char_boundary(s.len() - m.len())
            && s[s.len() - m.len()..].eq_ignore_ascii_case(m)
    };
    match markers.iter().copied().find(has_suffix) {
        Some(m) => &s[..s.len() - m.len()],
        None => s,
    }
}

fn parse_decimal_minor_units(s: &str) -> Option<u64> {
    let s = s.strip_prefix('+').unwrap_or(s);
    let (whole, fraction) = match s.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (s, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let major: u64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };

    let digits = fraction.as_bytes();
    let digit_at = |i: usize| digits.get(i).map_or(0, |b| u64::from(b - b'0'));
    let cents = digit_at(0) * 10 + digit_at(1);
    let round_up = u64::from(digit_at(2) >= 5);

    major.checked_mul(100)?.checked_add(cents)?.checked_add(round_up)
}

fn parse_integer_digits(s: &str) -> Option<u64> {
    let joined: String = s.chars().filter(|c| *c != '.').collect();
    let s = joined.strip_prefix('+').unwrap_or(&joined);
    let digits: &str = &s[..s.bytes().take_while(|b| b.is_ascii_digit()).count()];
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}
