//! Sea-Seq Core - Foundation types, traits, and error handling
//!
//! This crate provides the core abstractions used throughout the Sea-Seq engine:
//! - `ValidationTarget`: an IP address with an optional website/SNI value
//! - `Check`: the trait that all validation checks implement
//! - `CheckExecutor`: the seam between the runner and local or remote execution
//! - `Inventory`: a best-effort remote source of extra targets
//! - `CheckOutcome`, `CheckResult`: what a check reports and what the runner records

pub mod check;
pub mod error;
pub mod inventory;
pub mod target;

// Re-export commonly used types at crate root
pub use check::{Check, CheckExecutor, CheckOutcome, CheckResult};
pub use error::{Error, Result};
pub use inventory::{EmptyInventory, Inventory};
pub use target::{is_ip, ValidationTarget, UNSPECIFIED_IP};
