//! Sea-Seq Ingest - Target discovery from unstructured input
//!
//! This crate provides:
//! - Extraction of IP addresses and domain names from free text
//! - Loaders for CSV, JSON and plain-text input documents
//! - The target repository that merges local results with a remote inventory
//!
//! # Example
//!
//! ```no_run
//! use seaseq_core::EmptyInventory;
//! use seaseq_ingest::{load_targets, Discovery, TargetRepository};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> seaseq_core::Result<()> {
//!     let local = load_targets("issues.csv").await?;
//!     let repo = TargetRepository::new(Arc::new(EmptyInventory));
//!
//!     match repo.discover(&local).await {
//!         Discovery::Targets(candidates) => println!("{} IPs", candidates.ips.len()),
//!         Discovery::NoTargets => println!("nothing to validate"),
//!     }
//!     Ok(())
//! }
//! ```

pub mod extract;
pub mod formats;
pub mod repository;

pub use extract::{
    dedupe_domains, dedupe_valid_ips, extract_targets, ExtractedTargets, TargetCollector,
};
pub use formats::{load_targets, InputFormat};
pub use repository::{merge_domains, merge_ips, CandidateTargets, Discovery, TargetRepository};
