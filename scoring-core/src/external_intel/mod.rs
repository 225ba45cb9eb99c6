//! External Intelligence Module - URL Reputation Boundary
//!
//! The core only ever sees the `ReputationProvider` capability: one
//! lookup per scoring call, tri-state verdict plus optional threat
//! categories. Transport, authentication and retries live behind the
//! provider implementation.
//!
//! ## Structure
//! - `reputation`: Provider trait + errors + a disabled stand-in
//! - `safebrowsing`: Google Safe Browsing v4 lookup client

pub mod reputation;
pub mod safebrowsing;

// Re-export common types
pub use reputation::{DisabledReputation, ReputationError, ReputationProvider};
pub use safebrowsing::SafeBrowsingClient;
