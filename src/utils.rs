// Utility functions
use regex::Regex;
use std::sync::LazyLock;

static AMOUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d[\d.,]*").expect("amount pattern should compile"));

/// Parses displayed price text such as `$1,299.99`, `12,99 €` or `Price: $5`.
///
/// The last `.` or `,` is the decimal separator when two digits follow it (or
/// when both separators appear); otherwise separators group thousands.
/// Returns `None` for text without a positive amount.
pub fn parse_price_text(text: &str) -> Option<f64> {
    let raw = AMOUNT_RE.find(text)?.as_str().trim_end_matches(['.', ',']);

    let last_sep = raw.rfind(['.', ',']);
    let normalized: String = match last_sep {
        Some(idx) => {
            let decimals = raw.len() - idx - 1;
            let mixed = raw.contains('.') && raw.contains(',');
            if mixed || decimals != 3 {
                let int_part: String = raw[..idx].chars().filter(char::is_ascii_digit).collect();
                format!("{}.{}", int_part, &raw[idx + 1..])
            } else {
                raw.chars().filter(char::is_ascii_digit).collect()
            }
        }
        None => raw.to_string(),
    };

    normalized.parse::<f64>().ok().filter(|p| p.is_finite() && *p > 0.0)
}

/// Lower-cases and joins words with dashes, for file names.
pub fn to_kebab_case(text: &str) -> String {
    text.to_lowercase().replace(" ", "-")
}
