//! Threat Types
//!
//! Data structures only - no scoring logic here.

use serde::{Deserialize, Serialize};

use crate::explain::ExplanationEntry;

// ============================================================================
// REPUTATION VERDICT
// ============================================================================

/// Tri-state external reputation signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictKind {
    /// No known threat listed for this URL
    Clean,
    /// Confirmed threat listed by the external service
    Flagged,
    /// Lookup unavailable, timed out, or not configured
    Unknown,
}

impl VerdictKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictKind::Clean => "clean",
            VerdictKind::Flagged => "flagged",
            VerdictKind::Unknown => "unknown",
        }
    }
}

/// Verdict plus optional threat-category labels, produced once per
/// request and never cached in the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReputationVerdict {
    pub kind: VerdictKind,
    /// Threat categories reported by the external service, if any
    pub categories: Vec<String>,
}

impl ReputationVerdict {
    pub fn clean() -> Self {
        Self {
            kind: VerdictKind::Clean,
            categories: Vec::new(),
        }
    }

    pub fn flagged(categories: Vec<String>) -> Self {
        Self {
            kind: VerdictKind::Flagged,
            categories,
        }
    }

    pub fn unknown() -> Self {
        Self {
            kind: VerdictKind::Unknown,
            categories: Vec::new(),
        }
    }

    pub fn is_flagged(&self) -> bool {
        self.kind == VerdictKind::Flagged
    }
}

// ============================================================================
// SCORE METHOD
// ============================================================================

/// How the pre-fusion score was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreMethod {
    /// Trained tree ensemble
    Model,
    /// Rule-based fallback (no model loaded)
    Heuristic,
}

impl ScoreMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreMethod::Model => "model",
            ScoreMethod::Heuristic => "heuristic",
        }
    }
}

// ============================================================================
// RISK RESULT
// ============================================================================

/// Final output of one scoring call. Request-scoped, created fresh per
/// URL, no persisted state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskResult {
    pub url: String,
    /// Composite risk score in [0, 100], after fusion
    pub risk_score: f64,
    pub is_safe: bool,
    pub method: ScoreMethod,
    /// Pre-link ensemble output (model path only)
    pub margin: Option<f64>,
    /// Link-transformed model output in [0, 1] (model path only)
    pub probability: Option<f64>,
    /// Ranked human-readable reasons; rule-based on the heuristic path
    pub reasons: Vec<String>,
    /// Ranked per-feature attribution entries (model path only)
    pub explanations: Vec<ExplanationEntry>,
    /// True when one or more trees had to be omitted from attribution
    pub partial_attribution: bool,
    /// External verdict echoed through
    pub reputation: ReputationVerdict,
}
