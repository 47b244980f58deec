//! Name resolution check

use super::DNS_RESOLVES;
use seaseq_core::{Check, CheckOutcome, ValidationTarget};
use std::net::ToSocketAddrs;
use tracing::trace;

/// Resolves the target's website (or IP) through the system resolver
#[derive(Debug, Default)]
pub struct DnsResolveCheck;

impl DnsResolveCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Check for DnsResolveCheck {
    fn name(&self) -> &str {
        DNS_RESOLVES
    }

    fn description(&self) -> &str {
        "Website or IP resolves to at least one address"
    }

    fn run(&self, target: &ValidationTarget) -> CheckOutcome {
        let host = target.host();
        trace!("Resolving {}", host);

        match (host, 80).to_socket_addrs() {
            Ok(addrs) => {
                let count = addrs.count();
                if count == 0 {
                    CheckOutcome::fail(format!("DNS failed for {}: no addresses", host))
                } else {
                    CheckOutcome::pass(format!("Resolved {} ({} addresses)", host, count))
                }
            }
            Err(e) => CheckOutcome::fail(format!("DNS failed for {}: {}", host, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_ip_resolves() {
        let outcome = DnsResolveCheck::new().run(&ValidationTarget::new("127.0.0.1"));
        assert!(outcome.ok);
        assert_eq!(outcome.message, "Resolved 127.0.0.1 (1 addresses)");
    }

    #[test]
    fn test_ipv6_literal_resolves() {
        let outcome = DnsResolveCheck::new().run(&ValidationTarget::new("::1"));
        assert!(outcome.ok);
    }
}
