//! Built-in reference checks
//!
//! Each check is a blocking function of the target. Timeouts come from
//! `ChecksConfig` so a slow network never stalls a worker indefinitely.

pub mod dns;
pub mod http;
pub mod policy;
pub mod ports;
pub mod tls;

pub use dns::DnsResolveCheck;
pub use http::HttpReachabilityCheck;
pub use policy::PolicyPlaceholderCheck;
pub use ports::PortProbeCheck;
pub use tls::TlsHandshakeCheck;

use crate::registry::CheckRegistry;
use seaseq_common::ChecksConfig;
use std::sync::Arc;
use std::time::Duration;

pub const DNS_RESOLVES: &str = "dns_resolves";
pub const HTTP_REACHABLE: &str = "http_reachable";
pub const TLS_VALIDITY: &str = "tls_validity";
pub const PORT_SCAN_TOP: &str = "port_scan_top";
pub const SEASEQ_POLICY: &str = "seaseq_policy";

/// Register every built-in check
pub fn register_builtin(registry: &mut CheckRegistry, config: &ChecksConfig) {
    registry.register(Arc::new(DnsResolveCheck::new()));
    registry.register(Arc::new(HttpReachabilityCheck::new(Duration::from_secs(
        config.http_timeout_seconds,
    ))));
    registry.register(Arc::new(TlsHandshakeCheck::new(Duration::from_secs(
        config.tls_timeout_seconds,
    ))));
    registry.register(Arc::new(PortProbeCheck::new(
        config.probe_ports.clone(),
        config.probe_timeout(),
    )));
    registry.register(Arc::new(PolicyPlaceholderCheck));
}

/// Format a host for use in a URL or socket string (brackets IPv6 literals)
pub(crate) fn url_host(host: &str) -> String {
    if host.contains(':') {
        format!("[{}]", host)
    } else {
        host.to_string()
    }
}
