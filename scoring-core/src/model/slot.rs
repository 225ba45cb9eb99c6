//! Model Slot - Atomically Published Ensemble Handle
//!
//! The one piece of shared mutable state in the crate: the "current
//! ensemble" reference. Readers clone an `Arc` out of the slot, so a
//! scoring call in flight during a reload sees either the entire old
//! forest or the entire new one, never a mix. Loading parses and
//! validates fully before the single swap, so a failed reload leaves the
//! previous model in place.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use super::artifact::ModelLoadError;
use super::forest::Ensemble;

// ============================================================================
// METADATA & STATUS
// ============================================================================

/// Metadata about the currently loaded model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_path: String,
    pub tree_count: usize,
    pub link: String,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

/// Engine status for the status endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    pub model_loaded: bool,
    pub model_path: String,
    pub tree_count: usize,
    pub avg_latency_us: f64,
    pub prediction_count: u64,
    pub loaded_at: Option<chrono::DateTime<chrono::Utc>>,
}

// ============================================================================
// SLOT
// ============================================================================

pub struct ModelSlot {
    current: RwLock<Option<Arc<Ensemble>>>,
    metadata: RwLock<Option<ModelMetadata>>,
    latency_sum_us: AtomicU64,
    prediction_count: AtomicU64,
}

impl ModelSlot {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(None),
            metadata: RwLock::new(None),
            latency_sum_us: AtomicU64::new(0),
            prediction_count: AtomicU64::new(0),
        }
    }

    /// Load (or reload) the model artifact at `path`. Validation happens
    /// entirely before the swap; on error the slot is untouched.
    pub fn load_file(&self, path: &str) -> Result<(), ModelLoadError> {
        log::info!("Loading model artifact from: {}", path);
        let ensemble = Ensemble::load_file(path)?;

        let metadata = ModelMetadata {
            model_path: path.to_string(),
            tree_count: ensemble.trees().len(),
            link: ensemble.link().as_str().to_string(),
            loaded_at: chrono::Utc::now(),
        };

        self.publish(ensemble, Some(metadata));
        log::info!("Model artifact loaded successfully");
        Ok(())
    }

    /// Install an already-built ensemble (tests, embedded models).
    pub fn install(&self, ensemble: Ensemble) {
        let metadata = ModelMetadata {
            model_path: "<in-memory>".to_string(),
            tree_count: ensemble.trees().len(),
            link: ensemble.link().as_str().to_string(),
            loaded_at: chrono::Utc::now(),
        };
        self.publish(ensemble, Some(metadata));
    }

    fn publish(&self, ensemble: Ensemble, metadata: Option<ModelMetadata>) {
        *self.current.write() = Some(Arc::new(ensemble));
        *self.metadata.write() = metadata;
    }

    /// The currently published ensemble, if any. The returned `Arc`
    /// stays valid across concurrent reloads.
    pub fn current(&self) -> Option<Arc<Ensemble>> {
        self.current.read().clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.current.read().is_some()
    }

    /// Drop the model; scoring falls back to the heuristic afterwards.
    pub fn unload(&self) {
        *self.current.write() = None;
        *self.metadata.write() = None;
        log::info!("Model unloaded");
    }

    /// Record one prediction's latency for the status counters.
    pub fn record_latency(&self, elapsed: Duration) {
        self.latency_sum_us
            .fetch_add(elapsed.as_micros() as u64, Ordering::Relaxed);
        self.prediction_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn status(&self) -> EngineStatus {
        let metadata = self.metadata.read();
        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        let count = self.prediction_count.load(Ordering::Relaxed);
        let avg = if count > 0 {
            sum as f64 / count as f64
        } else {
            0.0
        };

        match metadata.as_ref() {
            Some(meta) => EngineStatus {
                model_loaded: true,
                model_path: meta.model_path.clone(),
                tree_count: meta.tree_count,
                avg_latency_us: avg,
                prediction_count: count,
                loaded_at: Some(meta.loaded_at),
            },
            None => EngineStatus {
                model_loaded: false,
                model_path: "None".to_string(),
                tree_count: 0,
                avg_latency_us: avg,
                prediction_count: count,
                loaded_at: None,
            },
        }
    }
}

impl Default for ModelSlot {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::extract;
    use crate::model::forest::{DecisionTree, LinkFunction, Node};

    fn tiny_ensemble() -> Ensemble {
        Ensemble::new(
            vec![DecisionTree {
                nodes: vec![Node::Leaf {
                    value: 0.4,
                    cover: Some(10.0),
                }],
            }],
            0.0,
            LinkFunction::Identity,
        )
    }

    #[test]
    fn starts_unloaded() {
        let slot = ModelSlot::new();
        assert!(!slot.is_loaded());
        assert!(slot.current().is_none());
        assert!(!slot.status().model_loaded);
    }

    #[test]
    fn install_publishes_atomically() {
        let slot = ModelSlot::new();
        slot.install(tiny_ensemble());
        assert!(slot.is_loaded());

        let status = slot.status();
        assert!(status.model_loaded);
        assert_eq!(status.tree_count, 1);
    }

    #[test]
    fn failed_load_keeps_previous_model() {
        let slot = ModelSlot::new();
        slot.install(tiny_ensemble());
        assert!(slot.load_file("/nonexistent/model.json").is_err());
        // old model still published
        assert!(slot.is_loaded());
    }

    #[test]
    fn readers_keep_the_old_forest_across_reload() {
        let slot = ModelSlot::new();
        slot.install(tiny_ensemble());
        let held = slot.current().unwrap();

        slot.unload();
        // The Arc we hold still evaluates, the slot itself is empty.
        assert_eq!(held.predict(&extract("http://a.com")).margin, 0.4);
        assert!(slot.current().is_none());
    }

    #[test]
    fn reload_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let raw = serde_json::json!({
            "version": 1,
            "feature_names": ["url_length", "dot_count", "hyphen_count", "has_at_symbol", "has_https"],
            "base_score": 0.1,
            "link": "logistic",
            "trees": [
                { "nodes": [
                    { "feature": 4, "threshold": 0.5, "left": 1, "right": 2, "cover": 100.0 },
                    { "leaf": 0.9, "cover": 60.0 },
                    { "leaf": -0.7, "cover": 40.0 }
                ]}
            ]
        })
        .to_string();
        std::fs::write(&path, raw).unwrap();

        let slot = ModelSlot::new();
        let features = extract("http://verify-login.example.com");

        slot.load_file(path.to_str().unwrap()).unwrap();
        let first = slot.current().unwrap().predict(&features);

        slot.load_file(path.to_str().unwrap()).unwrap();
        let second = slot.current().unwrap().predict(&features);

        assert_eq!(first.margin, second.margin);
        assert_eq!(first.probability, second.probability);
    }
}
