// src/domain/price.rs

/// Parses a free-text price such as `"$1,200.50"`.
///
/// Every character other than ASCII digits, `.` and `-` is dropped before
/// parsing. Returns `None` when nothing numeric is left (`"N/A"`, `""`) or the
/// remainder is not a number (`"1.2.3"`).
pub fn parse_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Inclusive price bounds. Construct through validation so `min <= max` holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}
