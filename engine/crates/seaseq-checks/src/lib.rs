//! Sea-Seq Checks - check registry, built-in checks and the validation runner
//!
//! This crate provides:
//! - `CheckRegistry`: name to check mapping, pre-loaded with the built-ins
//! - `LocalExecutor`: runs registry checks off the async runtime
//! - `ValidationRunner`: bounded, fault-isolated concurrent execution

pub mod builtin;
pub mod executor;
pub mod registry;
pub mod runner;

pub use executor::LocalExecutor;
pub use registry::{CheckRegistry, FnCheck};
pub use runner::{run_checks, RunReport, ValidationRunner, MAX_WORKERS};
