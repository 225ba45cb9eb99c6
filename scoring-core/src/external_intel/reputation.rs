//! Reputation Provider Boundary
//!
//! `checkReputation(url) -> verdict` is the entire contract. The engine
//! wraps every call in a bounded timeout and degrades any failure to
//! the `unknown` verdict, so providers are free to fail loudly.

use std::future::Future;

use crate::threat::ReputationVerdict;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ReputationError {
    #[error("reputation request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("reputation service returned HTTP status {0}")]
    Status(u16),
}

// ============================================================================
// PROVIDER TRAIT
// ============================================================================

/// Capability the scoring engine holds: one reputation lookup per URL.
pub trait ReputationProvider: Send + Sync {
    fn check(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<ReputationVerdict, ReputationError>> + Send;
}

// ============================================================================
// DISABLED PROVIDER
// ============================================================================

/// Provider used when no reputation service is configured; every lookup
/// resolves to the `unknown` verdict without network I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledReputation;

impl ReputationProvider for DisabledReputation {
    fn check(
        &self,
        _url: &str,
    ) -> impl Future<Output = Result<ReputationVerdict, ReputationError>> + Send {
        std::future::ready(Ok(ReputationVerdict::unknown()))
    }
}
