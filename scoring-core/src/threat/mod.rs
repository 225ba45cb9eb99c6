//! Threat Module - Heuristic Scoring & Reputation Fusion
//!
//! The decision layer above the model: the rule-based fallback scorer
//! used when no ensemble is loaded, and the fusion policy that merges
//! the model/heuristic score with the external reputation verdict.
//!
//! ## Structure
//! - `types`: Core types (ReputationVerdict, RiskResult, ScoreMethod)
//! - `rules`: Thresholds and constants
//! - `fallback`: Rule-based scoring when no model is available
//! - `fusion`: Final-score policy (external verdict only ever raises risk)

pub mod types;
pub mod rules;
pub mod fallback;
pub mod fusion;

// Re-export main types for convenience
pub use types::{ReputationVerdict, RiskResult, ScoreMethod, VerdictKind};
pub use rules::{FusionPolicy, HeuristicRules, FLAGGED_VERDICT_SCORE, SAFE_SCORE_MAX};
pub use fallback::{score as fallback_score, HeuristicScore};
pub use fusion::fuse;
