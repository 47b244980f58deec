//! Target repository - merges locally extracted targets with inventory data

use crate::extract::{dedupe_domains, dedupe_valid_ips, ExtractedTargets};
use seaseq_core::Inventory;
use std::sync::Arc;
use tracing::{debug, info};

/// Merge two IP lists: local first, then remote, first occurrence kept,
/// anything that is not a valid IP dropped
pub fn merge_ips(local: &[String], remote: &[String]) -> Vec<String> {
    dedupe_valid_ips(local.iter().chain(remote.iter()))
}

/// Merge two domain lists: local first, then remote, lower-cased, first occurrence kept
pub fn merge_domains(local: &[String], remote: &[String]) -> Vec<String> {
    dedupe_domains(local.iter().chain(remote.iter()))
}

/// Candidates available for selection after merging
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateTargets {
    /// Local IPs followed by inventory IPs
    pub ips: Vec<String>,
    /// Domains found in the local input
    pub domains: Vec<String>,
}

/// Result of target discovery
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discovery {
    /// At least one IP or domain is available
    Targets(CandidateTargets),
    /// Neither the input nor the inventory produced anything to validate
    NoTargets,
}

impl Discovery {
    pub fn is_empty(&self) -> bool {
        matches!(self, Discovery::NoTargets)
    }
}

/// Lives for one run; owns nothing but a handle to the inventory
pub struct TargetRepository {
    inventory: Arc<dyn Inventory>,
}

impl TargetRepository {
    pub fn new(inventory: Arc<dyn Inventory>) -> Self {
        Self { inventory }
    }

    /// Merge local extraction with the inventory's target list
    pub async fn discover(&self, local: &ExtractedTargets) -> Discovery {
        let remote = self.inventory.list_targets().await;
        debug!("Inventory returned {} targets", remote.len());

        let ips = merge_ips(&local.ips, &remote);
        let domains = dedupe_domains(&local.domains);

        if ips.is_empty() && domains.is_empty() {
            info!("No targets found in input or inventory");
            return Discovery::NoTargets;
        }

        info!(
            "Discovered {} IPs ({} from inventory) and {} domains",
            ips.len(),
            ips.len().saturating_sub(local.ips.len()),
            domains.len()
        );
        Discovery::Targets(CandidateTargets { ips, domains })
    }

    /// Website choices for a selected IP: inventory sites first, then local domains
    pub async fn websites_for(&self, ip: Option<&str>, local_domains: &[String]) -> Vec<String> {
        let remote = match ip {
            Some(ip) => self.inventory.list_websites(ip).await,
            None => Vec::new(),
        };
        merge_domains(&remote, local_domains)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seaseq_core::EmptyInventory;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    struct StaticInventory {
        targets: Vec<String>,
        websites: Vec<String>,
    }

    #[async_trait::async_trait]
    impl Inventory for StaticInventory {
        async fn list_targets(&self) -> Vec<String> {
            self.targets.clone()
        }

        async fn list_websites(&self, _ip: &str) -> Vec<String> {
            self.websites.clone()
        }
    }

    #[test]
    fn test_merge_order_first_occurrence() {
        let merged = merge_ips(
            &strings(&["1.1.1.1", "2.2.2.2"]),
            &strings(&["2.2.2.2", "3.3.3.3"]),
        );
        assert_eq!(merged, strings(&["1.1.1.1", "2.2.2.2", "3.3.3.3"]));
    }

    #[test]
    fn test_merge_revalidates() {
        let merged = merge_ips(&strings(&["10.0.0.1"]), &strings(&["not-an-ip", "::1"]));
        assert_eq!(merged, strings(&["10.0.0.1", "::1"]));
    }

    #[test]
    fn test_merge_domains() {
        let merged = merge_domains(&strings(&["A.example.com"]), &strings(&["a.example.com", "b.example.com"]));
        assert_eq!(merged, strings(&["a.example.com", "b.example.com"]));
    }

    #[tokio::test]
    async fn test_no_targets() {
        let repo = TargetRepository::new(Arc::new(EmptyInventory));
        let discovery = repo.discover(&ExtractedTargets::default()).await;
        assert_eq!(discovery, Discovery::NoTargets);
        assert!(discovery.is_empty());
    }

    #[tokio::test]
    async fn test_domains_alone_are_targets() {
        let repo = TargetRepository::new(Arc::new(EmptyInventory));
        let local = ExtractedTargets {
            ips: vec![],
            domains: strings(&["example.com"]),
        };
        match repo.discover(&local).await {
            Discovery::Targets(candidates) => {
                assert!(candidates.ips.is_empty());
                assert_eq!(candidates.domains, strings(&["example.com"]));
            }
            Discovery::NoTargets => panic!("domains should count as targets"),
        }
    }

    #[tokio::test]
    async fn test_inventory_enrichment() {
        let repo = TargetRepository::new(Arc::new(StaticInventory {
            targets: strings(&["10.0.0.2", "10.0.0.1", "garbage"]),
            websites: strings(&["portal.example.com"]),
        }));
        let local = ExtractedTargets {
            ips: strings(&["10.0.0.1"]),
            domains: strings(&["example.com"]),
        };

        let Discovery::Targets(candidates) = repo.discover(&local).await else {
            panic!("expected targets");
        };
        assert_eq!(candidates.ips, strings(&["10.0.0.1", "10.0.0.2"]));

        let sites = repo.websites_for(Some("10.0.0.1"), &candidates.domains).await;
        assert_eq!(sites, strings(&["portal.example.com", "example.com"]));

        let sites = repo.websites_for(None, &candidates.domains).await;
        assert_eq!(sites, strings(&["example.com"]));
    }

    #[tokio::test]
    async fn test_inventory_only_targets() {
        let repo = TargetRepository::new(Arc::new(StaticInventory {
            targets: strings(&["192.0.2.10"]),
            websites: vec![],
        }));
        let discovery = repo.discover(&ExtractedTargets::default()).await;
        assert!(!discovery.is_empty());
    }
}
