//! Tree Ensemble Representation & Inference
//!
//! Trees use index-based arena storage: nodes live in a flat vector and
//! children are referenced by index. That keeps deserialization and
//! bounds validation simple and rules out pointer cycles by construction.
//!
//! Immutable once built - reload swaps the whole structure, never
//! mutates it in place (see `slot.rs`).

use serde::{Deserialize, Serialize};

use crate::features::{FeatureVector, FEATURE_COUNT};

// ============================================================================
// NODES & TREES
// ============================================================================

/// One arena node. `cover` is the relative training population that
/// reached the node; it is required for exact attribution but not for
/// inference, so it stays optional here.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
        cover: Option<f64>,
    },
    Leaf {
        value: f64,
        cover: Option<f64>,
    },
}

impl Node {
    pub fn cover(&self) -> Option<f64> {
        match self {
            Node::Split { cover, .. } | Node::Leaf { cover, .. } => *cover,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

/// One regression tree of the boosted forest. Node 0 is the root.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTree {
    pub nodes: Vec<Node>,
}

impl DecisionTree {
    /// Route the feature vector to a leaf and return its value.
    /// Routing rule: left iff `x[feature] < threshold`, else right.
    /// Termination is guaranteed by the structural validation at load.
    pub fn evaluate(&self, features: &FeatureVector) -> f64 {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                Node::Leaf { value, .. } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    ..
                } => {
                    index = if features.values[*feature] < *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    /// True when every node carries a usable cover weight.
    /// Exact attribution is impossible for this tree otherwise.
    pub fn has_full_covers(&self) -> bool {
        self.nodes
            .iter()
            .all(|n| n.cover().map(|c| c > 0.0 && c.is_finite()).unwrap_or(false))
    }
}

// ============================================================================
// LINK FUNCTION
// ============================================================================

/// How the summed margin maps to the user-facing probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkFunction {
    /// Margin passed through (clamped to [0,1] for the probability)
    Identity,
    /// Standard sigmoid, for binary-logistic objectives
    Logistic,
}

impl LinkFunction {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkFunction::Identity => "identity",
            LinkFunction::Logistic => "logistic",
        }
    }
}

// ============================================================================
// ENSEMBLE
// ============================================================================

/// The full boosted forest: trees, base score and link function.
#[derive(Debug, Clone)]
pub struct Ensemble {
    pub(crate) trees: Vec<DecisionTree>,
    pub(crate) base_score: f64,
    pub(crate) link: LinkFunction,
}

/// Inference output. Attribution operates on the margin; the user-facing
/// 0-100 score derives from the probability.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Prediction {
    /// Pre-link raw summed score (base score + all leaf values)
    pub margin: f64,
    /// Link-transformed score in [0, 1]
    pub probability: f64,
}

impl Ensemble {
    pub fn new(trees: Vec<DecisionTree>, base_score: f64, link: LinkFunction) -> Self {
        Self {
            trees,
            base_score,
            link,
        }
    }

    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }

    pub fn base_score(&self) -> f64 {
        self.base_score
    }

    pub fn link(&self) -> LinkFunction {
        self.link
    }

    /// Evaluate every tree and combine. An empty forest returns the base
    /// score unchanged (0.5 probability under a logistic link with zero
    /// base).
    pub fn predict(&self, features: &FeatureVector) -> Prediction {
        debug_assert_eq!(features.values.len(), FEATURE_COUNT);

        let mut margin = self.base_score;
        for tree in &self.trees {
            margin += tree.evaluate(features);
        }

        let probability = match self.link {
            LinkFunction::Logistic => sigmoid(margin),
            LinkFunction::Identity => margin.clamp(0.0, 1.0),
        };

        Prediction {
            margin,
            probability,
        }
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

// ============================================================================
// TESTS
// ============================================================================
