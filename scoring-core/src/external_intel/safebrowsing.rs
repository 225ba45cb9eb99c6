//! Google Safe Browsing Integration
//!
//! Queries the Safe Browsing v4 `threatMatches:find` endpoint for a
//! single URL. Without an API key the client stays disabled and every
//! lookup resolves to the `unknown` verdict - scoring never depends on
//! the external service being reachable or configured.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::threat::ReputationVerdict;

use super::reputation::{ReputationError, ReputationProvider};

// ============================================================================
// CONSTANTS
// ============================================================================

const SB_API_BASE: &str = "https://safebrowsing.googleapis.com/v4/threatMatches:find";

const THREAT_TYPES: &[&str] = &[
    "MALWARE",
    "SOCIAL_ENGINEERING",
    "UNWANTED_SOFTWARE",
    "POTENTIALLY_HARMFUL_APPLICATION",
];

// ============================================================================
// CLIENT
// ============================================================================

pub struct SafeBrowsingClient {
    http: reqwest::Client,
    api_key: Option<String>,
    endpoint: String,
}

impl SafeBrowsingClient {
    /// `api_key = None` leaves the client disabled: lookups return the
    /// `unknown` verdict immediately.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.filter(|k| !k.is_empty()),
            endpoint: SB_API_BASE.to_string(),
        }
    }

    /// Point the client at a different endpoint (tests, proxies).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn lookup(&self, url: &str, api_key: &str) -> Result<ReputationVerdict, ReputationError> {
        let request = LookupRequest::for_url(url);
        let response = self
            .http
            .post(format!("{}?key={}", self.endpoint, api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReputationError::Status(status.as_u16()));
        }

        let body: LookupResponse = response.json().await?;
        Ok(parse_response(body))
    }
}

impl ReputationProvider for SafeBrowsingClient {
    fn check(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<ReputationVerdict, ReputationError>> + Send {
        async move {
            match self.api_key.as_deref() {
                None => {
                    log::debug!("Safe Browsing not configured, verdict unknown");
                    Ok(ReputationVerdict::unknown())
                }
                Some(key) => self.lookup(url, key).await,
            }
        }
    }
}

// ============================================================================
// API TYPES (wire format)
// ============================================================================

#[derive(Debug, Serialize)]
struct LookupRequest {
    client: ClientInfo,
    #[serde(rename = "threatInfo")]
    threat_info: ThreatInfo,
}

#[derive(Debug, Serialize)]
struct ClientInfo {
    #[serde(rename = "clientId")]
    client_id: &'static str,
    #[serde(rename = "clientVersion")]
    client_version: &'static str,
}

#[derive(Debug, Serialize)]
struct ThreatInfo {
    #[serde(rename = "threatTypes")]
    threat_types: Vec<&'static str>,
    #[serde(rename = "platformTypes")]
    platform_types: Vec<&'static str>,
    #[serde(rename = "threatEntryTypes")]
    threat_entry_types: Vec<&'static str>,
    #[serde(rename = "threatEntries")]
    threat_entries: Vec<ThreatEntry>,
}

#[derive(Debug, Serialize)]
struct ThreatEntry {
    url: String,
}

impl LookupRequest {
    fn for_url(url: &str) -> Self {
        Self {
            client: ClientInfo {
                client_id: "phishguard",
                client_version: env!("CARGO_PKG_VERSION"),
            },
            threat_info: ThreatInfo {
                threat_types: THREAT_TYPES.to_vec(),
                platform_types: vec!["ANY_PLATFORM"],
                threat_entry_types: vec!["URL"],
                threat_entries: vec![ThreatEntry {
                    url: url.to_string(),
                }],
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    matches: Vec<ThreatMatch>,
}

#[derive(Debug, Deserialize)]
struct ThreatMatch {
    #[serde(rename = "threatType")]
    threat_type: String,
}

// ============================================================================
// PARSE RESPONSE
// ============================================================================

fn parse_response(body: LookupResponse) -> ReputationVerdict {
    if body.matches.is_empty() {
        return ReputationVerdict::clean();
    }

    let mut categories: Vec<String> = body
        .matches
        .into_iter()
        .map(|m| m.threat_type)
        .collect();
    categories.sort();
    categories.dedup();

    ReputationVerdict::flagged(categories)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::threat::VerdictKind;

    #[test]
    fn no_matches_means_clean() {
        let verdict = parse_response(LookupResponse { matches: vec![] });
        assert_eq!(verdict.kind, VerdictKind::Clean);
        assert!(verdict.categories.is_empty());
    }

    #[test]
    fn matches_flag_with_deduplicated_categories() {
        let verdict = parse_response(LookupResponse {
            matches: vec![
                ThreatMatch {
                    threat_type: "SOCIAL_ENGINEERING".to_string(),
                },
                ThreatMatch {
                    threat_type: "MALWARE".to_string(),
                },
                ThreatMatch {
                    threat_type: "SOCIAL_ENGINEERING".to_string(),
                },
            ],
        });
        assert_eq!(verdict.kind, VerdictKind::Flagged);
        assert_eq!(verdict.categories, vec!["MALWARE", "SOCIAL_ENGINEERING"]);
    }

    #[test]
    fn empty_response_body_deserializes() {
        // the API returns `{}` when nothing matches
        let body: LookupResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(parse_response(body).kind, VerdictKind::Clean);
    }

    #[tokio::test]
    async fn unconfigured_client_returns_unknown() {
        let client = SafeBrowsingClient::new(None);
        assert!(!client.is_configured());
        let verdict = client.check("http://example.com").await.unwrap();
        assert_eq!(verdict.kind, VerdictKind::Unknown);
    }

    #[test]
    fn empty_api_key_counts_as_unconfigured() {
        let client = SafeBrowsingClient::new(Some(String::new()));
        assert!(!client.is_configured());
    }
}
