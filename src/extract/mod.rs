//! Per-source field extraction.
//!
//! Each submodule turns one site's raw page text into its profile struct.
//! Extractors are pure and never fail: a pattern that does not match, or a
//! capture that does not parse, leaves the field at its default.

pub mod researchgate;
pub mod scholar;

use regex::Regex;

/// Trimmed first capture group of `re` in `text`, or `""`.
fn first_text(re: &Regex, text: &str) -> String {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// First capture group of `re` parsed as a count, or 0.
fn first_count(re: &Regex, text: &str) -> u64 {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| parse_count(m.as_str()))
        .unwrap_or(0)
}

/// Every capture group 1 of `re`, in page order.
fn all_captures<'t>(re: &Regex, text: &'t str) -> Vec<&'t str> {
    re.captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Non-numeric or overflowing input counts as absent.
fn parse_count(raw: &str) -> u64 {
    raw.trim().replace(',', "").parse::<u64>().unwrap_or(0)
}

#[cfg(test)]
pub(crate) fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}.html", name)).unwrap()
}
