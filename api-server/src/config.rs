//! Configuration module

use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Path to the serialized model artifact
    pub model_path: String,

    /// Google Safe Browsing API key (reputation lookups disabled if unset)
    pub safe_browsing_api_key: Option<String>,

    /// Ceiling on the reputation lookup, in milliseconds
    pub reputation_timeout_ms: u64,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),

            model_path: env::var("MODEL_PATH")
                .unwrap_or_else(|_| "phishing_model.json".to_string()),

            safe_browsing_api_key: env::var("SAFE_BROWSING_API_KEY")
                .ok()
                .filter(|k| !k.is_empty()),

            reputation_timeout_ms: env::var("REPUTATION_TIMEOUT_MS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(3000),

            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
