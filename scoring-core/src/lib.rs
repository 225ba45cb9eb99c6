//! PhishGuard Core - URL Risk Scoring & Explanation Engine
//!
//! Scores a raw URL string for phishing risk by combining:
//! - a gradient-boosted decision-tree ensemble evaluated over lexical
//!   URL features (`model`)
//! - an exact per-feature attribution of that prediction (`explain`)
//! - an external URL-reputation verdict (`external_intel`)
//!
//! When no trained model is loaded, a deterministic rule-based scorer
//! takes over (`threat::fallback`). The fusion policy (`threat::fusion`)
//! merges the model/heuristic score with the reputation verdict into the
//! final 0-100 risk score.
//!
//! ## Structure
//! - `features/` - Lexical feature extraction from the URL string
//! - `model/` - Tree-ensemble artifact loading and inference
//! - `explain/` - Exact additive attribution + explanation formatting
//! - `threat/` - Heuristic fallback scorer and reputation fusion
//! - `external_intel/` - Reputation provider boundary
//! - `engine` - The `score_url` entry point

pub mod features;
pub mod model;
pub mod explain;
pub mod threat;
pub mod external_intel;
pub mod engine;

// Re-export the public surface
pub use engine::{ScoringEngine, ScoreError};
pub use features::{extract, FeatureVector, FEATURE_COUNT, FEATURE_LAYOUT};
pub use model::{Ensemble, EngineStatus, LinkFunction, ModelLoadError, Prediction};
pub use explain::{AttributionReport, Direction, ExplanationEntry};
pub use threat::{
    HeuristicRules, FusionPolicy, ReputationVerdict, RiskResult, ScoreMethod, VerdictKind,
};
pub use external_intel::{ReputationError, ReputationProvider, SafeBrowsingClient};
