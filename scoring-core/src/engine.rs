//! Scoring Engine - The `score_url` Entry Point
//!
//! Per request: extract features, score with the published ensemble (or
//! the rule-based fallback when none is loaded), attribute the model's
//! prediction, run the reputation lookup under its timeout, and fuse.
//!
//! Guiding principle: scoring always produces a result for a non-empty
//! URL. Quality degrades (model -> heuristic, full -> partial
//! attribution, confirmed -> unknown verdict) rather than the call
//! failing. The only error is an empty URL, where there is nothing to
//! score.

use std::time::{Duration, Instant};

use crate::explain;
use crate::external_intel::ReputationProvider;
use crate::features;
use crate::model::{EngineStatus, Ensemble, ModelLoadError, ModelSlot};
use crate::threat::{
    fallback, fusion, FusionPolicy, HeuristicRules, ReputationVerdict, RiskResult, ScoreMethod,
};

/// Default ceiling on the reputation lookup
pub const DEFAULT_REPUTATION_TIMEOUT: Duration = Duration::from_secs(3);

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    /// The one non-degradable condition: nothing to score
    #[error("no URL provided")]
    InvalidInput,
}

// ============================================================================
// ENGINE
// ============================================================================

pub struct ScoringEngine<P> {
    model: ModelSlot,
    reputation: P,
    rules: HeuristicRules,
    policy: FusionPolicy,
    reputation_timeout: Duration,
}

impl<P: ReputationProvider> ScoringEngine<P> {
    pub fn new(reputation: P) -> Self {
        Self {
            model: ModelSlot::new(),
            reputation,
            rules: HeuristicRules::default(),
            policy: FusionPolicy::default(),
            reputation_timeout: DEFAULT_REPUTATION_TIMEOUT,
        }
    }

    pub fn with_reputation_timeout(mut self, timeout: Duration) -> Self {
        self.reputation_timeout = timeout;
        self
    }

    pub fn with_rules(mut self, rules: HeuristicRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_fusion_policy(mut self, policy: FusionPolicy) -> Self {
        self.policy = policy;
        self
    }

    // ------------------------------------------------------------------
    // Model lifecycle (delegates to the atomically published slot)
    // ------------------------------------------------------------------

    pub fn load_model(&self, path: &str) -> Result<(), ModelLoadError> {
        self.model.load_file(path)
    }

    pub fn install_model(&self, ensemble: Ensemble) {
        self.model.install(ensemble);
    }

    pub fn unload_model(&self) {
        self.model.unload();
    }

    pub fn model_status(&self) -> EngineStatus {
        self.model.status()
    }

    // ------------------------------------------------------------------
    // Scoring
    // ------------------------------------------------------------------

    /// Score one URL. Fails only for an empty/whitespace URL.
    pub async fn score_url(&self, url: &str) -> Result<RiskResult, ScoreError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ScoreError::InvalidInput);
        }

        let features = features::extract(url);

        // Model path when an ensemble is published, heuristic otherwise.
        // The Arc keeps the forest alive even if a reload lands mid-call.
        let model_part = match self.model.current() {
            Some(ensemble) => {
                let started = Instant::now();
                let prediction = ensemble.predict(&features);
                let report = explain::explain(&ensemble, &features);
                self.model.record_latency(started.elapsed());

                let entries = explain::format_entries(&features, &report.contributions);
                let reasons = entries.iter().map(|e| e.summary()).collect();
                ModelPart {
                    score: prediction.probability * 100.0,
                    method: ScoreMethod::Model,
                    margin: Some(prediction.margin),
                    probability: Some(prediction.probability),
                    reasons,
                    explanations: entries,
                    partial_attribution: report.partial,
                }
            }
            None => {
                let heuristic = fallback::score(&features, &self.rules);
                ModelPart {
                    score: heuristic.score,
                    method: ScoreMethod::Heuristic,
                    margin: None,
                    probability: None,
                    reasons: heuristic.reasons,
                    explanations: Vec::new(),
                    partial_attribution: false,
                }
            }
        };

        let verdict = self.check_reputation(url).await;
        let (risk_score, is_safe) = fusion::fuse(model_part.score, &verdict, &self.policy);

        Ok(RiskResult {
            url: url.to_string(),
            risk_score,
            is_safe,
            method: model_part.method,
            margin: model_part.margin,
            probability: model_part.probability,
            reasons: model_part.reasons,
            explanations: model_part.explanations,
            partial_attribution: model_part.partial_attribution,
            reputation: verdict,
        })
    }

    /// Reputation lookup under the configured ceiling. Timeouts and
    /// transport failures degrade to the `unknown` verdict; the core
    /// never retries.
    async fn check_reputation(&self, url: &str) -> ReputationVerdict {
        match tokio::time::timeout(self.reputation_timeout, self.reputation.check(url)).await {
            Ok(Ok(verdict)) => verdict,
            Ok(Err(err)) => {
                log::warn!("reputation lookup failed: {}", err);
                ReputationVerdict::unknown()
            }
            Err(_) => {
                log::warn!(
                    "reputation lookup exceeded {:?}, verdict unknown",
                    self.reputation_timeout
                );
                ReputationVerdict::unknown()
            }
        }
    }
}

/// Pre-fusion scoring output, one of the two paths
struct ModelPart {
    score: f64,
    method: ScoreMethod,
    margin: Option<f64>,
    probability: Option<f64>,
    reasons: Vec<String>,
    explanations: Vec<crate::explain::ExplanationEntry>,
    partial_attribution: bool,
}

// ============================================================================
// TESTS
// ============================================================================
