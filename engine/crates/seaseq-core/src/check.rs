//! Check trait and result types - the interface all validation checks implement

use crate::target::ValidationTarget;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Outcome of a single check: pass/fail plus a human-readable detail.
///
/// This is also the wire shape of the check delegation surface
/// (`{"ok": bool, "message": string}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub ok: bool,
    pub message: String,
}

impl CheckOutcome {
    pub fn new(ok: bool, message: impl Into<String>) -> Self {
        Self {
            ok,
            message: message.into(),
        }
    }

    pub fn pass(message: impl Into<String>) -> Self {
        Self::new(true, message)
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self::new(false, message)
    }

    /// Outcome reported for a name with no registered check
    pub fn unknown(name: &str) -> Self {
        Self::fail(format!("Unknown check: {}", name))
    }
}

/// The trait that all validation checks must implement.
///
/// Checks run on a blocking worker thread and may perform blocking network
/// I/O. They receive the target by reference and must not retain it.
pub trait Check: Send + Sync {
    /// Unique registry key (e.g., "dns_resolves")
    fn name(&self) -> &str;

    /// Short description for listings
    fn description(&self) -> &str {
        ""
    }

    /// Execute the check against the target
    fn run(&self, target: &ValidationTarget) -> CheckOutcome;
}

/// Something that can execute a named check against a target.
///
/// The local registry and a remote validation service both sit behind this
/// seam; the runner only ever talks to an executor.
#[async_trait::async_trait]
pub trait CheckExecutor: Send + Sync {
    async fn run_check(&self, name: &str, target: &ValidationTarget) -> CheckOutcome;
}

/// Result of one check invocation as recorded by the runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Check name
    #[serde(rename = "test")]
    pub name: String,
    pub ok: bool,
    /// Always present, including on failure
    pub message: String,
    /// Wall-clock time of this single check
    #[serde(rename = "duration_s")]
    pub duration_seconds: f64,
}

impl CheckResult {
    pub fn new(name: impl Into<String>, outcome: CheckOutcome, elapsed: Duration) -> Self {
        Self {
            name: name.into(),
            ok: outcome.ok,
            message: outcome.message,
            duration_seconds: elapsed.as_secs_f64(),
        }
    }

    pub fn status_str(&self) -> &'static str {
        if self.ok {
            "PASS"
        } else {
            "FAIL"
        }
    }
}
