//! URL Feature Extractor
//!
//! Pure function from a URL string to the 5-feature vector. Total and
//! deterministic: malformed input degrades to well-defined values (an
//! empty string yields all zeros), it never fails.

use super::layout::FEATURE_COUNT;
use super::vector::FeatureVector;

/// Extract the lexical feature vector from a raw URL string.
///
/// - `url_length`: character count of the raw string
/// - `dot_count`: number of `.` characters
/// - `hyphen_count`: number of `-` characters
/// - `has_at_symbol`: 1 iff the string contains `@`
/// - `has_https`: 1 iff the string starts with `https://` (case-insensitive,
///   exact prefix match - not a parse of the URL's scheme field)
pub fn extract(url: &str) -> FeatureVector {
    let mut url_length = 0u64;
    let mut dot_count = 0u64;
    let mut hyphen_count = 0u64;
    let mut has_at_symbol = false;

    for c in url.chars() {
        url_length += 1;
        match c {
            '.' => dot_count += 1,
            '-' => hyphen_count += 1,
            '@' => has_at_symbol = true,
            _ => {}
        }
    }

    let values: [f64; FEATURE_COUNT] = [
        url_length as f64,
        dot_count as f64,
        hyphen_count as f64,
        if has_at_symbol { 1.0 } else { 0.0 },
        if has_https_prefix(url) { 1.0 } else { 0.0 },
    ];

    FeatureVector::from_values(values)
}

/// Case-insensitive `https://` prefix check on the raw bytes.
/// `get(..8)` returns None on a non-ASCII boundary, which can never be
/// the wanted prefix anyway.
fn has_https_prefix(url: &str) -> bool {
    url.get(..8)
        .map(|prefix| prefix.eq_ignore_ascii_case("https://"))
        .unwrap_or(false)
}
