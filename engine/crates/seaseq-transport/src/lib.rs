//! Sea-Seq Transport - HTTP/JSON client for the remote inventory service
//!
//! This crate provides:
//! - `InventoryClient`: best-effort target and website enrichment
//! - Optional forwarding of check execution to the remote service, with the
//!   local registry as the fallback executor

pub mod inventory;

pub use inventory::{InventoryClient, InventoryError};
