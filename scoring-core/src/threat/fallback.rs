//! Fallback Scorer
//!
//! Deterministic rule-based risk accumulation, used only when no model
//! is loaded (never called or load failed). Each rule that fires emits
//! a reason string, so the explanation surface is never empty even
//! without a trained ensemble.

use crate::features::FeatureVector;

use super::rules::HeuristicRules;

/// Output of the rule-based scorer
#[derive(Debug, Clone)]
pub struct HeuristicScore {
    /// Risk in [0, 100]
    pub score: f64,
    pub reasons: Vec<String>,
}

/// Score a feature vector with the rule set. Always in [0, 100];
/// reasons are never empty.
pub fn score(features: &FeatureVector, rules: &HeuristicRules) -> HeuristicScore {
    let mut risk = rules.base_risk;
    let mut reasons = Vec::new();

    if features.url_length() > rules.long_url_threshold {
        risk += rules.long_url_penalty;
        reasons.push(format!(
            "Unusually long address ({} characters)",
            features.url_length()
        ));
    }

    let extra_dots = (features.dot_count() - rules.dot_baseline).max(0.0);
    if extra_dots > 0.0 {
        risk += extra_dots * rules.dot_penalty;
        reasons.push(format!(
            "Deeply nested subdomains ({} dots)",
            features.dot_count()
        ));
    }

    let extra_hyphens = (features.hyphen_count() - rules.hyphen_baseline).max(0.0);
    if extra_hyphens > 0.0 {
        risk += extra_hyphens * rules.hyphen_penalty;
        reasons.push(format!(
            "Many hyphens in the address ({})",
            features.hyphen_count()
        ));
    }

    if features.has_at_symbol() {
        risk += rules.at_symbol_penalty;
        reasons.push("Contains an '@' symbol, which can hide the real destination".to_string());
    }

    if features.has_https() {
        reasons.push("Uses HTTPS".to_string());
    } else {
        risk += rules.no_https_penalty;
        reasons.push("Connection is not HTTPS".to_string());
    }

    HeuristicScore {
        score: risk.clamp(0.0, 100.0),
        reasons,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::extract;

    fn run(url: &str) -> HeuristicScore {
        score(&extract(url), &HeuristicRules::default())
    }

    #[test]
    fn score_stays_in_range() {
        let urls = [
            "",
            "https://www.google.com",
            "http://a-b-c-d-e-f-g-h.very.long.nested.sub.domain.example.com/@@@-----loooooooooooooooooooooooooooong",
        ];
        for url in urls {
            let result = run(url);
            assert!(
                (0.0..=100.0).contains(&result.score),
                "{} scored {}",
                url,
                result.score
            );
        }
    }

    #[test]
    fn reasons_are_never_empty() {
        for url in ["", "https://www.google.com", "http://x.tk"] {
            assert!(!run(url).reasons.is_empty(), "no reasons for {:?}", url);
        }
    }

    #[test]
    fn clean_https_url_scores_low() {
        let result = run("https://www.google.com");
        assert!(result.score < 50.0);
        assert!(result.reasons.iter().any(|r| r.contains("HTTPS")));
    }

    #[test]
    fn at_symbol_adds_a_large_increment() {
        let with = run("http://user@evil.com");
        let without = run("http://userevil.com");
        assert!(with.score > without.score);
        assert!(with.reasons.iter().any(|r| r.contains('@')));
    }

    #[test]
    fn long_urls_are_penalized() {
        let long = format!("http://example.com/{}", "a".repeat(80));
        assert!(run(&long).score > run("http://example.com/a").score);
    }

    #[test]
    fn hyphens_and_dots_accumulate() {
        let hyphens = run("http://verify-amazon-login-secure.tk/confirm");
        let plain = run("http://verifyamazonloginsecure.tk/confirm");
        assert!(hyphens.score > plain.score);

        let dotted = run("http://a.b.c.d.e.example.com");
        let flat = run("http://example.com");
        assert!(dotted.score > flat.score);
    }

    #[test]
    fn missing_https_is_penalized() {
        assert!(run("http://example.com").score > run("https://example.com").score);
    }
}
