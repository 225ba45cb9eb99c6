//! Reputation Fuser
//!
//! Merges the model/heuristic score with the external reputation
//! verdict. The policy is deliberately asymmetric: the external service
//! can only raise confidence of danger, never lower it. A flagged
//! verdict forces the fixed critical score; clean and unknown verdicts
//! pass the model's score through unchanged, so a failed lookup never
//! blocks or distorts the model-only result.

use super::rules::FusionPolicy;
use super::types::{ReputationVerdict, VerdictKind};

/// Fuse a 0-100 score with the external verdict.
/// Returns the final score and the safety label.
pub fn fuse(model_score: f64, verdict: &ReputationVerdict, policy: &FusionPolicy) -> (f64, bool) {
    let final_score = match verdict.kind {
        VerdictKind::Flagged => policy.flagged_score,
        VerdictKind::Clean | VerdictKind::Unknown => model_score,
    }
    .clamp(0.0, 100.0);

    (final_score, final_score < policy.safe_max)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> FusionPolicy {
        FusionPolicy::default()
    }

    #[test]
    fn flagged_forces_the_critical_score() {
        for model_score in [0.0, 12.5, 50.0, 94.0, 100.0] {
            let verdict = ReputationVerdict::flagged(vec!["SOCIAL_ENGINEERING".to_string()]);
            let (score, is_safe) = fuse(model_score, &verdict, &policy());
            assert_eq!(score, 95.0);
            assert!(!is_safe);
        }
    }

    #[test]
    fn clean_and_unknown_pass_the_score_through() {
        for model_score in [0.0, 30.0, 80.0] {
            let (clean, _) = fuse(model_score, &ReputationVerdict::clean(), &policy());
            let (unknown, _) = fuse(model_score, &ReputationVerdict::unknown(), &policy());
            assert_eq!(clean, model_score);
            assert_eq!(unknown, model_score);
        }
    }

    #[test]
    fn clean_verdict_does_not_lower_a_risky_score() {
        let (score, is_safe) = fuse(88.0, &ReputationVerdict::clean(), &policy());
        assert_eq!(score, 88.0);
        assert!(!is_safe);
    }

    #[test]
    fn fusion_is_monotone_in_the_verdict() {
        for model_score in [0.0, 25.0, 50.0, 75.0, 95.0] {
            let (flagged, _) = fuse(model_score, &ReputationVerdict::flagged(vec![]), &policy());
            let (clean, _) = fuse(model_score, &ReputationVerdict::clean(), &policy());
            let (unknown, _) = fuse(model_score, &ReputationVerdict::unknown(), &policy());
            assert!(flagged >= clean);
            assert!(flagged >= unknown);
        }
    }

    #[test]
    fn safety_threshold_is_strict() {
        let (_, below) = fuse(49.9, &ReputationVerdict::unknown(), &policy());
        let (_, at) = fuse(50.0, &ReputationVerdict::unknown(), &policy());
        assert!(below);
        assert!(!at);
    }

    #[test]
    fn out_of_range_input_is_clamped() {
        let (score, _) = fuse(140.0, &ReputationVerdict::clean(), &policy());
        assert_eq!(score, 100.0);
    }
}
