//! Inventory source interface (implemented in seaseq-transport)

/// A best-effort source of additional targets.
///
/// Implementations never fail: an unreachable or misconfigured source
/// yields empty lists.
#[async_trait::async_trait]
pub trait Inventory: Send + Sync {
    /// Candidate IP addresses known to the inventory
    async fn list_targets(&self) -> Vec<String>;

    /// Websites/hostnames associated with one IP
    async fn list_websites(&self, ip: &str) -> Vec<String>;
}

/// Inventory used when no remote endpoint is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyInventory;

#[async_trait::async_trait]
impl Inventory for EmptyInventory {
    async fn list_targets(&self) -> Vec<String> {
        Vec::new()
    }

    async fn list_websites(&self, _ip: &str) -> Vec<String> {
        Vec::new()
    }
}
