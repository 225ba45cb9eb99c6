//! Feature Layout - Centralized Feature Definition
//!
//! **This file controls the feature schema.**
//!
//! Rules:
//! 1. Add feature -> increment FEATURE_VERSION
//! 2. Change order -> increment FEATURE_VERSION
//! 3. Remove feature -> increment FEATURE_VERSION
//!
//! The extractor, the model artifact and the attribution engine all
//! index features by position, so the order here is load-bearing.

use crc32fast::Hasher;

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Feature names in the exact order they appear in the vector.
/// This is the SINGLE SOURCE OF TRUTH for feature layout.
pub const FEATURE_LAYOUT: &[&str] = &[
    "url_length",    // 0: Character count of the raw URL string
    "dot_count",     // 1: Number of '.' characters
    "hyphen_count",  // 2: Number of '-' characters
    "has_at_symbol", // 3: 1 if the string contains '@', else 0
    "has_https",     // 4: 1 if the string starts with "https://" (case-insensitive)
];

/// Total number of features.
/// IMPORTANT: Must match FEATURE_LAYOUT.len()!
pub const FEATURE_COUNT: usize = 5;

// ============================================================================
// LOOKUPS
// ============================================================================

/// Index of a feature by name
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}

/// Name of a feature by index
pub fn feature_name(index: usize) -> Option<&'static str> {
    FEATURE_LAYOUT.get(index).copied()
}

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// CRC32 hash over the versioned layout, used to detect schema drift
/// between the extractor and a serialized model artifact.
pub fn layout_hash() -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(&[FEATURE_VERSION]);
    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }
    hasher.finalize()
}
