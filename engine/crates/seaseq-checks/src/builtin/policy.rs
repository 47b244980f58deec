//! Policy suite placeholder
//!
//! The slot where a compliance/policy test suite plugs in. Register a check
//! under the same name to replace it.

use super::SEASEQ_POLICY;
use seaseq_core::{Check, CheckOutcome, ValidationTarget};

#[derive(Debug, Default)]
pub struct PolicyPlaceholderCheck;

impl Check for PolicyPlaceholderCheck {
    fn name(&self) -> &str {
        SEASEQ_POLICY
    }

    fn description(&self) -> &str {
        "Placeholder for the Sea-Seq policy suite"
    }

    fn run(&self, _target: &ValidationTarget) -> CheckOutcome {
        CheckOutcome::pass("Policy checks placeholder (wire to Sea-Seq policy suite)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_always_passes() {
        let outcome = PolicyPlaceholderCheck.run(&ValidationTarget::new("0.0.0.0"));
        assert!(outcome.ok);
        assert!(outcome.message.starts_with("Policy checks placeholder"));
    }
}
