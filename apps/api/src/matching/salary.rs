use once_cell::sync::Lazy;
use regex::Regex;

/// A currency-like number: optional `$`, then digits with optional thousands separators.
static SALARY_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$?(\d{1,3}(?:,\d{3})*)").expect("salary pattern is a valid regex")
});

/// Extracts the first salary-like number from free text such as
/// `"$80,000 - $120,000"`. Returns `None` when nothing numeric is present.
pub fn extract_min_salary(text: &str) -> Option<u64> {
    let captures = SALARY_NUMBER.captures(text)?;
    let digits: String = captures
        .get(1)?
        .as_str()
        .chars()
        .filter(|c| *c != ',')
        .collect();
    digits.parse().ok()
}
