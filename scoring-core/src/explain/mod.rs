//! Explain Module - Exact Additive Attribution
//!
//! Decomposes the ensemble's margin output into one signed contribution
//! per feature such that `expected_value + sum(contributions)` equals
//! the margin exactly. Computed per tree with a cover-weighted path
//! traversal (Shapley values for trees), then summed across trees -
//! polynomial in tree size, never an enumeration of feature subsets.
//!
//! ## Structure
//! - `engine`: The per-tree weighted traversal and the ensemble driver
//! - `format`: Ranked, human-readable explanation entries

pub mod engine;
pub mod format;

// Re-export common types
pub use engine::{explain, AttributionError, AttributionReport};
pub use format::{format_entries, Direction, ExplanationEntry};
