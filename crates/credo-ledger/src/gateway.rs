//! # Ledger Gateway Client
//!
//! Typed HTTP client implementing [`LedgerReader`] against a ledger
//! indexer service — the deployment shape where raw chain logs are
//! pre-indexed off-chain and served over REST.
//!
//! ## API Path Convention
//!
//! All paths are relative to `{base_url}/ledger/api/v1`:
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET | `/events/issued?issuer=0x…` | Issuance events, optionally scoped |
//! | GET | `/events/verified` | All verification events |
//! | GET | `/events/revoked?issuer=0x…` | Revocation events, optionally scoped |
//! | GET | `/records/{hash}` | Per-hash record (404 → absent) |
//! | GET | `/records/{hash}/revoked` | Revocation flag for one hash |
//! | GET | `/watermark` | Highest indexed ledger position |

use std::time::Duration;

use serde::Deserialize;
use url::Url;

use credo_core::{AccountAddress, DocumentHash};

use crate::event::{IssuedEvent, RevokedEvent, VerifiedEvent};
use crate::reader::{LedgerError, LedgerReader};
use crate::record::DocumentRecord;

/// API version path segment for the ledger indexer service.
const API_PREFIX: &str = "ledger/api/v1";

/// Configuration for connecting to a ledger indexer service.
///
/// Custom `Debug` implementation redacts the `api_token` field to
/// prevent credential leakage in log output.
#[derive(Clone)]
pub struct GatewayConfig {
    /// Base URL of the indexer service.
    pub base_url: Url,
    /// Bearer token for API authentication.
    pub api_token: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `CREDO_LEDGER_URL` (required)
    /// - `CREDO_LEDGER_TOKEN` (required)
    /// - `CREDO_LEDGER_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, GatewayConfigError> {
        let raw_url =
            std::env::var("CREDO_LEDGER_URL").map_err(|_| GatewayConfigError::MissingUrl)?;
        let base_url = Url::parse(&raw_url)
            .map_err(|e| GatewayConfigError::InvalidUrl(raw_url, e.to_string()))?;
        let api_token =
            std::env::var("CREDO_LEDGER_TOKEN").map_err(|_| GatewayConfigError::MissingToken)?;

        Ok(Self {
            base_url,
            api_token,
            timeout_secs: std::env::var("CREDO_LEDGER_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        })
    }

    /// Create a configuration pointing to a local mock server (for testing).
    ///
    /// # Errors
    ///
    /// Returns `GatewayConfigError::InvalidUrl` if the localhost URL cannot
    /// be parsed (should not occur for valid port numbers, but avoids
    /// `expect()`).
    pub fn local_mock(port: u16, token: &str) -> Result<Self, GatewayConfigError> {
        let raw = format!("http://127.0.0.1:{port}");
        let base_url = Url::parse(&raw)
            .map_err(|e| GatewayConfigError::InvalidUrl(raw, e.to_string()))?;
        Ok(Self {
            base_url,
            api_token: token.to_string(),
            timeout_secs: 5,
        })
    }
}

/// Gateway configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum GatewayConfigError {
    /// `CREDO_LEDGER_URL` was not set.
    #[error("CREDO_LEDGER_URL environment variable is required")]
    MissingUrl,
    /// `CREDO_LEDGER_TOKEN` was not set.
    #[error("CREDO_LEDGER_TOKEN environment variable is required")]
    MissingToken,
    /// A URL failed to parse.
    #[error("invalid URL \"{0}\": {1}")]
    InvalidUrl(String, String),
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),
}

/// Revocation flag response body.
#[derive(Debug, Deserialize)]
struct RevokedFlagResponse {
    revoked: bool,
}

/// Watermark response body.
#[derive(Debug, Deserialize)]
struct WatermarkResponse {
    watermark: u64,
}

/// Typed client for the ledger indexer service.
#[derive(Debug, Clone)]
pub struct LedgerGateway {
    http: reqwest::Client,
    base_url: Url,
}

impl LedgerGateway {
    /// Create a gateway client from configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayConfigError> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::AUTHORIZATION,
            reqwest::header::HeaderValue::from_str(&format!("Bearer {}", config.api_token))
                .map_err(|_| GatewayConfigError::MissingToken)?,
        );
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| GatewayConfigError::ClientBuild(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// GET a JSON payload from `{base_url}/{API_PREFIX}/{path}`.
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: Option<(&str, &str)>,
    ) -> Result<T, LedgerError> {
        let endpoint = format!("GET /{path}");
        let url = format!("{}{API_PREFIX}/{path}", self.base_url);

        let resp = crate::retry::retry_send(|| {
            let mut req = self.http.get(&url);
            if let Some((key, value)) = query {
                req = req.query(&[(key, value)]);
            }
            req.send()
        })
        .await
        .map_err(|e| LedgerError::Http {
            endpoint: endpoint.clone(),
            source: e,
        })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(LedgerError::Api {
                endpoint,
                status,
                body,
            });
        }

        resp.json().await.map_err(|e| LedgerError::Deserialization {
            endpoint,
            source: e,
        })
    }
}

#[async_trait::async_trait]
impl LedgerReader for LedgerGateway {
    async fn query_issued_events(
        &self,
        issuer: Option<&AccountAddress>,
    ) -> Result<Vec<IssuedEvent>, LedgerError> {
        let query = issuer.map(|i| ("issuer", i.as_str()));
        self.get_json("events/issued", query).await
    }

    async fn query_verified_events(&self) -> Result<Vec<VerifiedEvent>, LedgerError> {
        self.get_json("events/verified", None).await
    }

    async fn query_revoked_events(
        &self,
        issuer: Option<&AccountAddress>,
    ) -> Result<Vec<RevokedEvent>, LedgerError> {
        let query = issuer.map(|i| ("issuer", i.as_str()));
        self.get_json("events/revoked", query).await
    }

    async fn fetch_record(
        &self,
        hash: &DocumentHash,
    ) -> Result<Option<DocumentRecord>, LedgerError> {
        let path = format!("records/{hash}");
        let endpoint = format!("GET /{path}");
        let url = format!("{}{API_PREFIX}/{path}", self.base_url);

        let resp = crate::retry::retry_send(|| self.http.get(&url).send())
            .await
            .map_err(|e| LedgerError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(LedgerError::Api {
                endpoint,
                status,
                body,
            });
        }

        resp.json()
            .await
            .map(Some)
            .map_err(|e| LedgerError::Deserialization {
                endpoint,
                source: e,
            })
    }

    async fn fetch_revoked_flag(&self, hash: &DocumentHash) -> Result<bool, LedgerError> {
        let resp: RevokedFlagResponse = self
            .get_json(&format!("records/{hash}/revoked"), None)
            .await?;
        Ok(resp.revoked)
    }

    async fn watermark(&self) -> Result<u64, LedgerError> {
        let resp: WatermarkResponse = self.get_json("watermark", None).await?;
        Ok(resp.watermark)
    }
}
