//! Request / Response DTOs

use serde::{Deserialize, Serialize};

use phishguard_core::{ExplanationEntry, ReputationVerdict, RiskResult, ScoreMethod};

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub url: String,
}

/// Analyze response. camelCase for the browser frontend.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub is_safe: bool,
    /// Composite risk score, 0-100
    pub risk_score: f64,
    pub message: String,
    pub method: ScoreMethod,
    pub reasons: Vec<String>,
    pub explanations: Vec<ExplanationEntry>,
    pub partial_attribution: bool,
    pub reputation: ReputationVerdict,
}

impl From<RiskResult> for AnalyzeResponse {
    fn from(result: RiskResult) -> Self {
        let message = match result.method {
            ScoreMethod::Model => "Analyzed using gradient-boosted tree model".to_string(),
            ScoreMethod::Heuristic => {
                "Analyzed using heuristic rules (no model loaded)".to_string()
            }
        };
        Self {
            is_safe: result.is_safe,
            risk_score: result.risk_score,
            message,
            method: result.method,
            reasons: result.reasons,
            explanations: result.explanations,
            partial_attribution: result.partial_attribution,
            reputation: result.reputation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_serializes_camel_case() {
        let response = AnalyzeResponse {
            is_safe: true,
            risk_score: 12.0,
            message: "ok".to_string(),
            method: ScoreMethod::Heuristic,
            reasons: vec!["Uses HTTPS".to_string()],
            explanations: vec![],
            partial_attribution: false,
            reputation: ReputationVerdict::unknown(),
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["isSafe"], true);
        assert_eq!(value["riskScore"], 12.0);
        assert_eq!(value["reputation"]["kind"], "unknown");
    }
}
