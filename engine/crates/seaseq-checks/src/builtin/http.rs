//! Plain HTTP reachability check

use super::{url_host, HTTP_REACHABLE};
use seaseq_core::{Check, CheckOutcome, ValidationTarget};
use std::time::Duration;
use tracing::debug;

/// Issues `GET http://<host>/` directly (no proxy); passes on any 2xx or 3xx status
pub struct HttpReachabilityCheck {
    port: u16,
    timeout: Duration,
}

impl HttpReachabilityCheck {
    pub fn new(timeout: Duration) -> Self {
        Self { port: 80, timeout }
    }

    /// Target a non-standard port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    fn url_for(&self, host: &str) -> String {
        if self.port == 80 {
            format!("http://{}", url_host(host))
        } else {
            format!("http://{}:{}", url_host(host), self.port)
        }
    }
}

/// Reachable means the server answered with a success or redirect status
pub fn is_reachable_status(status: u16) -> bool {
    (200..400).contains(&status)
}

impl Check for HttpReachabilityCheck {
    fn name(&self) -> &str {
        HTTP_REACHABLE
    }

    fn description(&self) -> &str {
        "Plain HTTP GET answers with a 2xx/3xx status"
    }

    fn run(&self, target: &ValidationTarget) -> CheckOutcome {
        let url = self.url_for(target.host());

        let client = match reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .no_proxy()
            .user_agent(format!("SeaSeqCLI/{}", env!("CARGO_PKG_VERSION")))
            .build()
        {
            Ok(client) => client,
            Err(e) => return CheckOutcome::fail(format!("HTTP client error: {}", e)),
        };

        debug!("GET {}", url);
        match client.get(&url).send() {
            Ok(response) => {
                let status = response.status().as_u16();
                CheckOutcome::new(
                    is_reachable_status(status),
                    format!("HTTP {} for {}", status, url),
                )
            }
            Err(e) => CheckOutcome::fail(format!("HTTP error for {}: {}", url, e)),
        }
    }
}
