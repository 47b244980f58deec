//! Check registry - name to check mapping
//!
//! Registering under an existing name replaces the previous check and logs
//! a warning.

use seaseq_common::ChecksConfig;
use seaseq_core::{Check, CheckOutcome, ValidationTarget};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Registry of all available validation checks
pub struct CheckRegistry {
    /// Checks indexed by name
    checks: HashMap<String, Arc<dyn Check>>,
}

impl CheckRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            checks: HashMap::new(),
        }
    }

    /// Create a registry holding the built-in checks
    pub fn with_builtin(config: &ChecksConfig) -> Self {
        let mut registry = Self::new();
        crate::builtin::register_builtin(&mut registry, config);
        registry
    }

    /// Register a check, returning the check it replaced (if any)
    pub fn register(&mut self, check: Arc<dyn Check>) -> Option<Arc<dyn Check>> {
        let name = check.name().to_string();
        let replaced = self.checks.insert(name.clone(), check);
        if replaced.is_some() {
            warn!("Check '{}' re-registered; previous implementation replaced", name);
        } else {
            debug!("Registered check: {}", name);
        }
        replaced
    }

    /// Register a closure as a check
    pub fn register_fn<F>(&mut self, name: impl Into<String>, f: F) -> Option<Arc<dyn Check>>
    where
        F: Fn(&ValidationTarget) -> CheckOutcome + Send + Sync + 'static,
    {
        self.register(Arc::new(FnCheck::new(name, f)))
    }

    /// Get a check by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Check>> {
        self.checks.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.checks.contains_key(name)
    }

    /// All registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.checks.keys().cloned().collect();
        names.sort();
        names
    }

    /// Name/description pairs, sorted by name
    pub fn describe(&self) -> Vec<(String, String)> {
        self.names()
            .into_iter()
            .filter_map(|name| {
                let description = self.checks.get(&name)?.description().to_string();
                Some((name, description))
            })
            .collect()
    }

    /// Get number of registered checks
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

impl Default for CheckRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// A check backed by a closure
pub struct FnCheck<F> {
    name: String,
    f: F,
}

impl<F> FnCheck<F>
where
    F: Fn(&ValidationTarget) -> CheckOutcome + Send + Sync,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> Check for FnCheck<F>
where
    F: Fn(&ValidationTarget) -> CheckOutcome + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, target: &ValidationTarget) -> CheckOutcome {
        (self.f)(target)
    }
}
