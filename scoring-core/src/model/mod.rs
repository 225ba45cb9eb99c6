//! Model Module - Tree Ensemble Inference Engine
//!
//! Loads the serialized, already-trained gradient-boosted forest and
//! evaluates it. Training stays offline; only the artifact is consumed.
//!
//! ## Structure
//! - `forest`: In-memory tree/ensemble representation + inference
//! - `artifact`: Serialized JSON artifact format, loading, validation
//! - `slot`: Atomically published model handle (load / reload / unload)

pub mod forest;
pub mod artifact;
pub mod slot;

// Re-export common types
pub use forest::{DecisionTree, Ensemble, LinkFunction, Node, Prediction};
pub use artifact::{ModelArtifact, ModelLoadError, ARTIFACT_VERSION};
pub use slot::{EngineStatus, ModelMetadata, ModelSlot};
