//! Local check execution against the registry

use crate::registry::CheckRegistry;
use seaseq_core::{CheckExecutor, CheckOutcome, ValidationTarget};
use std::any::Any;
use std::sync::Arc;
use tracing::{debug, warn};

/// Runs registry checks on the blocking thread pool.
///
/// A check that panics is reported as a failed outcome for that check.
#[derive(Clone)]
pub struct LocalExecutor {
    registry: Arc<CheckRegistry>,
}

impl LocalExecutor {
    pub fn new(registry: Arc<CheckRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait::async_trait]
impl CheckExecutor for LocalExecutor {
    async fn run_check(&self, name: &str, target: &ValidationTarget) -> CheckOutcome {
        let Some(check) = self.registry.get(name) else {
            debug!("No check registered as '{}'", name);
            return CheckOutcome::unknown(name);
        };

        let target = target.clone();
        match tokio::task::spawn_blocking(move || check.run(&target)).await {
            Ok(outcome) => outcome,
            Err(e) if e.is_panic() => {
                let message = panic_message(e.into_panic().as_ref());
                warn!("Check '{}' panicked: {}", name, message);
                CheckOutcome::fail(format!("Check '{}' crashed: {}", name, message))
            }
            Err(e) => CheckOutcome::fail(format!("Check '{}' was cancelled: {}", name, e)),
        }
    }
}

/// Best-effort text of a panic payload
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        String::from("unknown panic")
    }
}
