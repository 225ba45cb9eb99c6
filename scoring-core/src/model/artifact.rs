//! Model Artifact - Serialized Ensemble Format & Validation
//!
//! The training pipeline exports the fitted forest as a JSON artifact:
//!
//! ```json
//! {
//!   "version": 1,
//!   "feature_names": ["url_length", "dot_count", ...],
//!   "base_score": 0.0,
//!   "link": "logistic",
//!   "num_trees": 2,
//!   "trees": [
//!     { "nodes": [
//!       { "feature": 4, "threshold": 0.5, "left": 1, "right": 2, "cover": 800.0 },
//!       { "leaf": 1.2, "cover": 440.0 },
//!       { "leaf": -0.8, "cover": 360.0 }
//!     ]}
//!   ]
//! }
//! ```
//!
//! Everything is validated at load: feature indices in range, child
//! indices in bounds, every non-root node referenced exactly once and
//! reachable from the root (which rules out cycles and sharing). A bad
//! artifact never produces a partially usable ensemble.

use serde::Deserialize;

use crate::features::{FEATURE_COUNT, FEATURE_LAYOUT};

use super::forest::{DecisionTree, Ensemble, LinkFunction, Node};

/// Artifact format version this build understands
pub const ARTIFACT_VERSION: u32 = 1;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ModelLoadError {
    #[error("model artifact not found: {0}")]
    NotFound(String),

    #[error("failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unsupported artifact version {0} (expected {ARTIFACT_VERSION})")]
    UnsupportedVersion(u32),

    #[error("feature layout mismatch: artifact was trained on {found:?}")]
    LayoutMismatch { found: Vec<String> },

    #[error("tree count metadata declares {declared} trees, artifact has {actual}")]
    TreeCountMismatch { declared: usize, actual: usize },

    #[error("tree {tree} has no nodes")]
    EmptyTree { tree: usize },

    #[error("tree {tree} node {node}: feature index {feature} out of range")]
    FeatureIndexOutOfRange {
        tree: usize,
        node: usize,
        feature: usize,
    },

    #[error("tree {tree} node {node}: child index {child} out of range")]
    ChildIndexOutOfRange {
        tree: usize,
        node: usize,
        child: usize,
    },

    #[error("tree {tree} node {node}: split threshold is not finite")]
    NonFiniteThreshold { tree: usize, node: usize },

    #[error("tree {tree}: invalid structure at node {node} (cycle, shared child, or unreachable node)")]
    MalformedStructure { tree: usize, node: usize },
}

// ============================================================================
// WIRE FORMAT
// ============================================================================

/// Top-level artifact as written by the exporter
#[derive(Debug, Deserialize)]
pub struct ModelArtifact {
    pub version: u32,
    pub feature_names: Vec<String>,
    pub base_score: f64,
    pub link: LinkFunction,
    /// Optional cross-check against `trees.len()`
    #[serde(default)]
    pub num_trees: Option<usize>,
    pub trees: Vec<TreeSpec>,
}

#[derive(Debug, Deserialize)]
pub struct TreeSpec {
    pub nodes: Vec<NodeSpec>,
}

/// A node is either a split or a leaf; the field set disambiguates.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum NodeSpec {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
        #[serde(default)]
        cover: Option<f64>,
    },
    Leaf {
        leaf: f64,
        #[serde(default)]
        cover: Option<f64>,
    },
}

// ============================================================================
// LOADING
// ============================================================================

impl Ensemble {
    /// Load and validate an artifact from disk.
    pub fn load_file(path: &str) -> Result<Self, ModelLoadError> {
        if !std::path::Path::new(path).exists() {
            return Err(ModelLoadError::NotFound(path.to_string()));
        }
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Parse and validate an artifact from its JSON text.
    pub fn from_json(raw: &str) -> Result<Self, ModelLoadError> {
        let artifact: ModelArtifact = serde_json::from_str(raw)?;
        Self::from_artifact(artifact)
    }

    /// Validate a parsed artifact and build the immutable ensemble.
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, ModelLoadError> {
        if artifact.version != ARTIFACT_VERSION {
            return Err(ModelLoadError::UnsupportedVersion(artifact.version));
        }

        let layout_matches = artifact.feature_names.len() == FEATURE_LAYOUT.len()
            && artifact
                .feature_names
                .iter()
                .zip(FEATURE_LAYOUT)
                .all(|(a, b)| a == b);
        if !layout_matches {
            return Err(ModelLoadError::LayoutMismatch {
                found: artifact.feature_names,
            });
        }

        if let Some(declared) = artifact.num_trees {
            if declared != artifact.trees.len() {
                return Err(ModelLoadError::TreeCountMismatch {
                    declared,
                    actual: artifact.trees.len(),
                });
            }
        }

        let mut trees = Vec::with_capacity(artifact.trees.len());
        for (tree_index, spec) in artifact.trees.into_iter().enumerate() {
            trees.push(build_tree(tree_index, spec)?);
        }

        Ok(Ensemble::new(trees, artifact.base_score, artifact.link))
    }
}

fn build_tree(tree_index: usize, spec: TreeSpec) -> Result<DecisionTree, ModelLoadError> {
    if spec.nodes.is_empty() {
        return Err(ModelLoadError::EmptyTree { tree: tree_index });
    }

    let count = spec.nodes.len();
    let mut nodes = Vec::with_capacity(count);

    for (node_index, node) in spec.nodes.into_iter().enumerate() {
        match node {
            NodeSpec::Split {
                feature,
                threshold,
                left,
                right,
                cover,
            } => {
                if feature >= FEATURE_COUNT {
                    return Err(ModelLoadError::FeatureIndexOutOfRange {
                        tree: tree_index,
                        node: node_index,
                        feature,
                    });
                }
                if !threshold.is_finite() {
                    return Err(ModelLoadError::NonFiniteThreshold {
                        tree: tree_index,
                        node: node_index,
                    });
                }
                for child in [left, right] {
                    if child >= count {
                        return Err(ModelLoadError::ChildIndexOutOfRange {
                            tree: tree_index,
                            node: node_index,
                            child,
                        });
                    }
                }
                nodes.push(Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    cover,
                });
            }
            NodeSpec::Leaf { leaf, cover } => nodes.push(Node::Leaf { value: leaf, cover }),
        }
    }

    validate_structure(tree_index, &nodes)?;

    Ok(DecisionTree { nodes })
}

/// Every non-root node must be referenced exactly once, the root never,
/// and all nodes must be reachable from the root. Together those imply a
/// single acyclic binary tree over the arena.
fn validate_structure(tree_index: usize, nodes: &[Node]) -> Result<(), ModelLoadError> {
    let mut in_degree = vec![0usize; nodes.len()];
    for node in nodes {
        if let Node::Split { left, right, .. } = node {
            in_degree[*left] += 1;
            in_degree[*right] += 1;
        }
    }

    if in_degree[0] != 0 {
        return Err(ModelLoadError::MalformedStructure {
            tree: tree_index,
            node: 0,
        });
    }
    for (index, &degree) in in_degree.iter().enumerate().skip(1) {
        if degree != 1 {
            return Err(ModelLoadError::MalformedStructure {
                tree: tree_index,
                node: index,
            });
        }
    }

    // in-degree alone admits disjoint cycles; the reachability sweep
    // closes that hole.
    let mut visited = vec![false; nodes.len()];
    let mut stack = vec![0usize];
    while let Some(index) = stack.pop() {
        if visited[index] {
            return Err(ModelLoadError::MalformedStructure {
                tree: tree_index,
                node: index,
            });
        }
        visited[index] = true;
        if let Node::Split { left, right, .. } = &nodes[index] {
            stack.push(*left);
            stack.push(*right);
        }
    }
    if let Some(unreached) = visited.iter().position(|&v| !v) {
        return Err(ModelLoadError::MalformedStructure {
            tree: tree_index,
            node: unreached,
        });
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
