//! Features Module - Lexical URL Feature Extraction
//!
//! Turns a raw URL string into the fixed 5-feature vector the model,
//! the attribution engine and the fallback scorer all share.
//!
//! The layout (names, order, count) lives in `layout.rs` and must never
//! change without bumping the feature version.

pub mod layout;
pub mod vector;
pub mod extract;


// Re-export common types
pub use layout::{feature_index, feature_name, layout_hash, FEATURE_COUNT, FEATURE_LAYOUT};
pub use vector::FeatureVector;
pub use extract::extract;
