//! Feature Vector - Core data structure for model input
//!
//! A fixed-size array of feature values in the order defined by
//! `layout::FEATURE_LAYOUT`. Request-scoped: built once per URL and
//! discarded after scoring.

use serde::{Deserialize, Serialize};

use super::layout::{feature_index, FEATURE_COUNT, FEATURE_LAYOUT};

/// Feature values in the order defined by FEATURE_LAYOUT
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureVector {
    pub values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    /// Create from raw values
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self { values }
    }

    /// Get values as array reference
    pub fn as_array(&self) -> &[f64; FEATURE_COUNT] {
        &self.values
    }

    /// Get feature by index
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Get feature by name
    pub fn get_by_name(&self, name: &str) -> Option<f64> {
        feature_index(name).and_then(|i| self.get(i))
    }

    // Named accessors, in layout order

    pub fn url_length(&self) -> f64 {
        self.values[0]
    }

    pub fn dot_count(&self) -> f64 {
        self.values[1]
    }

    pub fn hyphen_count(&self) -> f64 {
        self.values[2]
    }

    pub fn has_at_symbol(&self) -> bool {
        self.values[3] != 0.0
    }

    pub fn has_https(&self) -> bool {
        self.values[4] != 0.0
    }

    /// Feature names for this vector
    pub fn feature_names(&self) -> &'static [&'static str] {
        FEATURE_LAYOUT
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f64; FEATURE_COUNT]) -> Self {
        Self::from_values(values)
    }
}
