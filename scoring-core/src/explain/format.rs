//! Explanation Formatter
//!
//! Turns raw feature values and attribution numbers into a ranked,
//! human-readable list. Entries are sorted by descending contribution
//! magnitude (ties broken by feature declaration order), each with a
//! direction label and its share of the total absolute impact. No
//! feature is ever dropped.

use serde::{Deserialize, Serialize};

use crate::features::{feature_name, FeatureVector, FEATURE_COUNT};

// ============================================================================
// TYPES
// ============================================================================

/// Which way a contribution pushed the prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    TowardRisk,
    TowardSafe,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::TowardRisk => "toward-risk",
            Direction::TowardSafe => "toward-safe",
        }
    }
}

/// One ranked explanation entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplanationEntry {
    pub feature: String,
    pub value: f64,
    pub contribution: f64,
    pub direction: Direction,
    /// Share of the total absolute contribution, 0-100
    pub impact_pct: f64,
    pub description: Option<String>,
}

impl ExplanationEntry {
    /// One-line human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "{} = {} pushed {} ({:.1}% of feature impact)",
            self.feature,
            self.value,
            self.direction.as_str(),
            self.impact_pct
        )
    }
}

// ============================================================================
// FORMATTING
// ============================================================================

/// Build the ranked entry list for one prediction's contributions.
pub fn format_entries(
    features: &FeatureVector,
    contributions: &[f64; FEATURE_COUNT],
) -> Vec<ExplanationEntry> {
    let total_magnitude: f64 = contributions.iter().map(|c| c.abs()).sum();

    let mut order: Vec<usize> = (0..FEATURE_COUNT).collect();
    order.sort_by(|&a, &b| {
        contributions[b]
            .abs()
            .partial_cmp(&contributions[a].abs())
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.cmp(&b))
    });

    order
        .into_iter()
        .map(|index| {
            let contribution = contributions[index];
            let impact_pct = if total_magnitude > 0.0 {
                contribution.abs() / total_magnitude * 100.0
            } else {
                0.0
            };
            let name = feature_name(index).unwrap_or("unknown");
            ExplanationEntry {
                feature: name.to_string(),
                value: features.values[index],
                contribution,
                direction: if contribution > 0.0 {
                    Direction::TowardRisk
                } else {
                    Direction::TowardSafe
                },
                impact_pct,
                description: describe(name),
            }
        })
        .collect()
}

fn describe(name: &str) -> Option<String> {
    match name {
        "url_length" => Some("Overall length of the address".to_string()),
        "dot_count" => Some("Dots in the address (subdomain nesting)".to_string()),
        "hyphen_count" => Some("Hyphens in the address (brand-impersonation pattern)".to_string()),
        "has_at_symbol" => Some("An '@' symbol can hide the real destination".to_string()),
        "has_https" => Some("Whether the address starts with the HTTPS scheme".to_string()),
        _ => None,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::extract;

    #[test]
    fn entries_are_ranked_by_magnitude() {
        let features = extract("https://www.google.com");
        let contributions = [0.1, -0.4, 0.0, 0.05, -1.3];
        let entries = format_entries(&features, &contributions);

        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0].feature, "has_https");
        assert_eq!(entries[0].direction, Direction::TowardSafe);
        assert_eq!(entries[1].feature, "dot_count");
        assert_eq!(entries[4].feature, "hyphen_count");
    }

    #[test]
    fn ties_break_by_declaration_order() {
        let features = extract("http://a.com");
        let contributions = [0.2, -0.2, 0.2, 0.0, 0.0];
        let entries = format_entries(&features, &contributions);

        assert_eq!(entries[0].feature, "url_length");
        assert_eq!(entries[1].feature, "dot_count");
        assert_eq!(entries[2].feature, "hyphen_count");
        // zero-contribution tail keeps declaration order too
        assert_eq!(entries[3].feature, "has_at_symbol");
        assert_eq!(entries[4].feature, "has_https");
    }

    #[test]
    fn impact_percentages_sum_to_one_hundred() {
        let features = extract("http://verify-login.example.com");
        let contributions = [0.3, -0.1, 0.6, 0.0, -0.2];
        let entries = format_entries(&features, &contributions);

        let total: f64 = entries.iter().map(|e| e.impact_pct).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn all_zero_contributions_yield_zero_percent() {
        let features = extract("http://a.com");
        let entries = format_entries(&features, &[0.0; 5]);

        assert_eq!(entries.len(), 5);
        for entry in &entries {
            assert_eq!(entry.impact_pct, 0.0);
            assert_eq!(entry.direction, Direction::TowardSafe);
        }
    }

    #[test]
    fn positive_is_toward_risk_negative_toward_safe() {
        let features = extract("http://a.com");
        let entries = format_entries(&features, &[0.5, -0.5, 0.0, 0.0, 0.0]);

        let risk = entries.iter().find(|e| e.feature == "url_length").unwrap();
        let safe = entries.iter().find(|e| e.feature == "dot_count").unwrap();
        assert_eq!(risk.direction, Direction::TowardRisk);
        assert_eq!(safe.direction, Direction::TowardSafe);
    }

    #[test]
    fn entries_carry_feature_values() {
        let features = extract("https://www.google.com");
        let entries = format_entries(&features, &[0.0, 0.0, 0.0, 0.0, -0.9]);
        let https = entries.iter().find(|e| e.feature == "has_https").unwrap();
        assert_eq!(https.value, 1.0);
        assert!(https.description.is_some());
    }
}
