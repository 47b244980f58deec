//! Target extraction - pulls IP addresses and domain names out of free text

use regex::Regex;
use seaseq_core::is_ip;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Longest domain name accepted (RFC 1035 presentation form)
pub const MAX_DOMAIN_LEN: usize = 253;

/// Dotted-quad IPv4, each octet 0-255 written with 1-3 digits
const IP_PATTERN: &str =
    r"\b(?:(?:25[0-5]|2[0-4]\d|1?\d{1,2})\.){3}(?:25[0-5]|2[0-4]\d|1?\d{1,2})\b";

/// One or more `label.` segments followed by an alphabetic top-level label.
/// Lenient on the TLD so internal and government zones are still caught.
const DOMAIN_PATTERN: &str =
    r"\b(?:[a-zA-Z0-9](?:[a-zA-Z0-9\-]{0,61}[a-zA-Z0-9])?\.)+[a-zA-Z]{2,63}\b";

fn ip_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(IP_PATTERN).expect("IP pattern is valid"))
}

fn domain_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(DOMAIN_PATTERN).expect("domain pattern is valid"))
}

/// IPs and domains found in one input, each in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedTargets {
    /// Syntactically valid IP addresses
    pub ips: Vec<String>,
    /// Lower-cased domain names
    pub domains: Vec<String>,
}

impl ExtractedTargets {
    pub fn is_empty(&self) -> bool {
        self.ips.is_empty() && self.domains.is_empty()
    }
}

/// Accumulates matches across many text fragments (cells, pages, values)
/// while keeping first-occurrence order.
#[derive(Debug, Default)]
pub struct TargetCollector {
    ips: Vec<String>,
    domains: Vec<String>,
    seen_ips: HashSet<String>,
    seen_domains: HashSet<String>,
}

impl TargetCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan one fragment of text; `None` and empty text add nothing
    pub fn scan<'a>(&mut self, text: impl Into<Option<&'a str>>) {
        let Some(text) = text.into() else {
            return;
        };
        if text.is_empty() {
            return;
        }

        for m in ip_regex().find_iter(text) {
            self.push_ip(m.as_str().trim());
        }

        for m in domain_regex().find_iter(text) {
            let domain = m.as_str().trim();
            if domain.len() <= MAX_DOMAIN_LEN {
                self.push_domain(domain);
            }
        }
    }

    /// Add an IP if it parses strictly and has not been seen
    pub fn push_ip(&mut self, ip: &str) {
        if is_ip(ip) && self.seen_ips.insert(ip.to_string()) {
            self.ips.push(ip.to_string());
        }
    }

    /// Add a domain (lower-cased) if it has not been seen
    pub fn push_domain(&mut self, domain: &str) {
        let domain = domain.to_lowercase();
        if self.seen_domains.insert(domain.clone()) {
            self.domains.push(domain);
        }
    }

    pub fn finish(self) -> ExtractedTargets {
        ExtractedTargets {
            ips: self.ips,
            domains: self.domains,
        }
    }
}

/// Extract candidate targets from arbitrary text.
///
/// Never fails: empty or absent text yields empty lists.
pub fn extract_targets<'a>(text: impl Into<Option<&'a str>>) -> ExtractedTargets {
    let mut collector = TargetCollector::new();
    collector.scan(text);
    collector.finish()
}

/// Keep strictly valid IPs, dropping duplicates after the first occurrence
pub fn dedupe_valid_ips<I, S>(ips: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut collector = TargetCollector::new();
    for ip in ips {
        collector.push_ip(ip.as_ref().trim());
    }
    collector.finish().ips
}

/// Lower-case and drop duplicate domains after the first occurrence
pub fn dedupe_domains<I, S>(domains: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut collector = TargetCollector::new();
    for domain in domains {
        let domain = domain.as_ref().trim();
        if !domain.is_empty() {
            collector.push_domain(domain);
        }
    }
    collector.finish().domains
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_scenario() {
        let result = extract_targets("Server at 10.0.0.5 and 999.999.999.999, site example.com");
        assert_eq!(result.ips, vec!["10.0.0.5"]);
        assert_eq!(result.domains, vec!["example.com"]);
    }

    #[test]
    fn test_valid_ips_in_first_seen_order() {
        let text = "hosts: 192.168.1.20, 10.1.1.1; 256.1.1.1 192.168.1.20 \
                    then 172.16.0.9 and 300.300.300.300 and 10.1.1.1";
        let result = extract_targets(text);
        assert_eq!(result.ips, vec!["192.168.1.20", "10.1.1.1", "172.16.0.9"]);
    }

    #[test]
    fn test_domains_lowercased_and_deduped() {
        let result = extract_targets("Portal.Agency.GOV and portal.agency.gov, mail.example.org");
        assert_eq!(result.domains, vec!["portal.agency.gov", "mail.example.org"]);
    }

    #[test]
    fn test_domain_label_rules() {
        // Single labels and numeric TLDs are not domains
        let result = extract_targets("localhost intranet 10.0.0.1 host.123");
        assert!(result.domains.is_empty());

        let result = extract_targets("api-v2.service.example.io");
        assert_eq!(result.domains, vec!["api-v2.service.example.io"]);
    }

    #[test]
    fn test_overlong_domain_dropped() {
        let label = "a".repeat(63);
        let long = format!("{l}.{l}.{l}.{l}.com", l = label);
        assert!(long.len() > MAX_DOMAIN_LEN);
        assert!(extract_targets(long.as_str()).domains.is_empty());
    }

    #[test]
    fn test_empty_and_absent_text() {
        assert!(extract_targets("").is_empty());
        assert!(extract_targets(None).is_empty());
        assert!(extract_targets("no targets in here").ips.is_empty());
    }

    #[test]
    fn test_idempotent() {
        let text = "10.0.0.1 b.example.com 10.0.0.2 a.example.com 10.0.0.1";
        assert_eq!(extract_targets(text), extract_targets(text));
    }

    #[test]
    fn test_collector_spans_fragments() {
        let mut collector = TargetCollector::new();
        collector.scan("10.0.0.1");
        collector.scan(None);
        collector.scan("example.com 10.0.0.2");
        collector.scan("10.0.0.1 EXAMPLE.com");
        let result = collector.finish();
        assert_eq!(result.ips, vec!["10.0.0.1", "10.0.0.2"]);
        assert_eq!(result.domains, vec!["example.com"]);
    }

    #[test]
    fn test_dedupe_helpers() {
        let ips = dedupe_valid_ips(["1.1.1.1", "bogus", "2001:db8::1", "1.1.1.1"]);
        assert_eq!(ips, vec!["1.1.1.1", "2001:db8::1"]);

        let domains = dedupe_domains(["A.com", "a.com", "", "b.com"]);
        assert_eq!(domains, vec!["a.com", "b.com"]);
    }
}
