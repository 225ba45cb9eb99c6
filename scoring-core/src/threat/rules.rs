//! Scoring Rules & Thresholds
//!
//! Constants and configurable rule sets for the fallback scorer and the
//! fusion policy. No scoring logic here.

use serde::{Deserialize, Serialize};

// ============================================================================
// FUSION CONSTANTS
// ============================================================================

/// Final score forced when the external service flags the URL.
/// A confirmed external threat always dominates the model's opinion.
pub const FLAGGED_VERDICT_SCORE: f64 = 95.0;

/// Scores below this are labeled safe
pub const SAFE_SCORE_MAX: f64 = 50.0;

// ============================================================================
// HEURISTIC CONSTANTS
// ============================================================================

/// Starting risk before any rule fires
pub const BASE_RISK: f64 = 10.0;

/// URLs longer than this pick up the long-URL penalty
pub const LONG_URL_THRESHOLD: f64 = 75.0;

/// Penalty for exceeding LONG_URL_THRESHOLD
pub const LONG_URL_PENALTY: f64 = 20.0;

/// Dots beyond this count are each penalized
pub const DOT_BASELINE: f64 = 2.0;

/// Penalty per dot beyond DOT_BASELINE
pub const DOT_PENALTY: f64 = 6.0;

/// Hyphens beyond this count are each penalized
pub const HYPHEN_BASELINE: f64 = 1.0;

/// Penalty per hyphen beyond HYPHEN_BASELINE
pub const HYPHEN_PENALTY: f64 = 7.0;

/// Penalty when the URL contains an '@' symbol
pub const AT_SYMBOL_PENALTY: f64 = 30.0;

/// Penalty when the URL does not start with https://
pub const NO_HTTPS_PENALTY: f64 = 15.0;

// ============================================================================
// CONFIGURABLE RULE SETS
// ============================================================================

/// Fallback scorer rules (configurable, defaults above)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeuristicRules {
    pub base_risk: f64,
    pub long_url_threshold: f64,
    pub long_url_penalty: f64,
    pub dot_baseline: f64,
    pub dot_penalty: f64,
    pub hyphen_baseline: f64,
    pub hyphen_penalty: f64,
    pub at_symbol_penalty: f64,
    pub no_https_penalty: f64,
}

impl Default for HeuristicRules {
    fn default() -> Self {
        Self {
            base_risk: BASE_RISK,
            long_url_threshold: LONG_URL_THRESHOLD,
            long_url_penalty: LONG_URL_PENALTY,
            dot_baseline: DOT_BASELINE,
            dot_penalty: DOT_PENALTY,
            hyphen_baseline: HYPHEN_BASELINE,
            hyphen_penalty: HYPHEN_PENALTY,
            at_symbol_penalty: AT_SYMBOL_PENALTY,
            no_https_penalty: NO_HTTPS_PENALTY,
        }
    }
}

/// Fusion policy (configurable, defaults above)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FusionPolicy {
    /// Score forced on a flagged verdict
    pub flagged_score: f64,
    /// Scores below this are safe
    pub safe_max: f64,
}

impl Default for FusionPolicy {
    fn default() -> Self {
        Self {
            flagged_score: FLAGGED_VERDICT_SCORE,
            safe_max: SAFE_SCORE_MAX,
        }
    }
}
