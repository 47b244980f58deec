//! REST client for the Sea-Seq inventory service
//!
//! Endpoints used:
//! - GET    /targets                - candidate IP addresses
//! - GET    /targets/:ip/websites   - hostnames served by one IP
//! - POST   /checks/:name           - remote check execution (optional)
//!
//! Enrichment is best-effort: any transport, status or body problem is
//! logged and turned into an empty list. Delegated checks that fail are
//! reported as failed outcomes for that check only.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::{debug, info, warn};

use seaseq_checks::LocalExecutor;
use seaseq_common::RemoteConfig;
use seaseq_core::{CheckExecutor, CheckOutcome, Inventory, ValidationTarget};
use seaseq_ingest::{dedupe_domains, dedupe_valid_ips};

// ── Client Errors ────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response body: {0}")]
    UnexpectedBody(String),

    #[error("Invalid API key: {0}")]
    InvalidCredential(String),

    #[error("Not configured: {0}")]
    NotConfigured(String),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

// ── Inventory Client ─────────────────────────────────────────────────────────

/// Remote inventory client that can also stand in as the check executor
pub struct InventoryClient {
    base_url: Option<Url>,
    http: Client,
    delegate_checks: bool,
    local: LocalExecutor,
}

impl InventoryClient {
    /// Build a client from the `[remote]` configuration.
    ///
    /// Checks are delegated only when `delegate_checks` is set and a base URL
    /// exists; otherwise they run on `local`.
    pub fn new(config: &RemoteConfig, local: LocalExecutor) -> Result<Self, InventoryError> {
        let mut headers = HeaderMap::new();
        if let Some(key) = config.api_key.as_deref().filter(|k| !k.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", key))
                .map_err(|e| InventoryError::InvalidCredential(e.to_string()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()?;

        let base_url = match config.base_url.as_deref().filter(|url| !url.is_empty()) {
            Some(raw) => {
                let url = Url::parse(raw)
                    .map_err(|e| InventoryError::InvalidBaseUrl(format!("{}: {}", raw, e)))?;
                if url.cannot_be_a_base() {
                    return Err(InventoryError::InvalidBaseUrl(raw.to_string()));
                }
                Some(url)
            }
            None => None,
        };

        let delegate_checks = config.delegate_checks && base_url.is_some();
        if config.delegate_checks && !delegate_checks {
            warn!("Check delegation requested without a base URL; running checks locally");
        }

        Ok(Self {
            base_url,
            http,
            delegate_checks,
            local,
        })
    }

    /// Whether a remote inventory is configured at all
    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    /// Whether checks are forwarded to the remote service
    pub fn delegates_checks(&self) -> bool {
        self.delegate_checks
    }

    /// Base URL extended with percent-encoded path segments
    fn url(&self, segments: &[&str]) -> Result<Url, InventoryError> {
        let mut url = self
            .base_url
            .clone()
            .ok_or_else(|| InventoryError::NotConfigured("base_url is not set".into()))?;
        url.path_segments_mut()
            .map_err(|_| InventoryError::InvalidBaseUrl("cannot be a base".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // ── Enrichment ───────────────────────────────────────────────────────

    /// Fetch a JSON array and keep its string entries
    async fn fetch_strings(&self, segments: &[&str]) -> Result<Vec<String>, InventoryError> {
        let url = self.url(segments)?;
        debug!("GET {}", url);

        let res = self.http.get(url.clone()).send().await?;
        if !res.status().is_success() {
            let status = res.status().as_u16();
            let text = res.text().await.unwrap_or_default();
            return Err(InventoryError::Api {
                status,
                message: text,
            });
        }

        let body: serde_json::Value = res.json().await?;
        let items = body.as_array().ok_or_else(|| {
            InventoryError::UnexpectedBody(format!("expected a JSON array from {}", url.path()))
        })?;

        Ok(items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect())
    }

    /// Candidate IPs from `GET /targets`, validated and deduplicated
    pub async fn fetch_targets(&self) -> Result<Vec<String>, InventoryError> {
        let raw = self.fetch_strings(&["targets"]).await?;
        let ips = dedupe_valid_ips(&raw);
        info!("Inventory returned {} targets", ips.len());
        Ok(ips)
    }

    /// Hostnames from `GET /targets/:ip/websites`, deduplicated
    pub async fn fetch_websites(&self, ip: &str) -> Result<Vec<String>, InventoryError> {
        let raw = self.fetch_strings(&["targets", ip, "websites"]).await?;
        Ok(dedupe_domains(&raw))
    }

    // ── Delegation ───────────────────────────────────────────────────────

    /// Run a check on the remote service via `POST /checks/:name`
    pub async fn delegate_check(
        &self,
        name: &str,
        target: &ValidationTarget,
    ) -> Result<CheckOutcome, InventoryError> {
        let url = self.url(&["checks", name])?;
        debug!("POST {} for {}", url, target);

        let res = self.http.post(url).json(target).send().await?;
        if !res.status().is_success() {
            let status = res.status().as_u16();
            let text = res.text().await.unwrap_or_default();
            return Err(InventoryError::Api {
                status,
                message: text,
            });
        }

        Ok(res.json::<CheckOutcome>().await?)
    }
}

#[async_trait::async_trait]
impl Inventory for InventoryClient {
    async fn list_targets(&self) -> Vec<String> {
        if !self.is_configured() {
            return Vec::new();
        }
        self.fetch_targets().await.unwrap_or_else(|e| {
            warn!("Inventory target lookup failed: {}", e);
            Vec::new()
        })
    }

    async fn list_websites(&self, ip: &str) -> Vec<String> {
        if !self.is_configured() {
            return Vec::new();
        }
        self.fetch_websites(ip).await.unwrap_or_else(|e| {
            warn!("Inventory website lookup for {} failed: {}", ip, e);
            Vec::new()
        })
    }
}

#[async_trait::async_trait]
impl CheckExecutor for InventoryClient {
    async fn run_check(&self, name: &str, target: &ValidationTarget) -> CheckOutcome {
        if !self.delegate_checks {
            return self.local.run_check(name, target).await;
        }

        match self.delegate_check(name, target).await {
            Ok(outcome) => outcome,
            Err(e) => {
                debug!("Delegated check '{}' failed: {}", name, e);
                CheckOutcome::fail(format!("Remote check failed: {}", e))
            }
        }
    }
}
