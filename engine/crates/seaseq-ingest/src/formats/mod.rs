//! Input document loaders
//!
//! Each loader turns a document into raw text fragments for the extractor.
//! PDF and spreadsheet text extraction belong to external tooling; their
//! output can be fed in as plain text.

pub mod csv;
pub mod json;

pub use self::csv::{scan_csv, scan_csv_file};
pub use self::json::{scan_json, scan_json_file};

use crate::extract::{extract_targets, ExtractedTargets};
use seaseq_core::{Error, Result};
use std::path::Path;
use tracing::info;

/// Supported input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Json,
    Text,
}

impl InputFormat {
    /// Detect the format from a file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "csv" => Ok(InputFormat::Csv),
            "json" => Ok(InputFormat::Json),
            "txt" | "text" | "log" => Ok(InputFormat::Text),
            _ => Err(Error::UnsupportedFormat { extension }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InputFormat::Csv => "csv",
            InputFormat::Json => "json",
            InputFormat::Text => "text",
        }
    }
}

/// Load an input document and extract deduplicated targets from it
pub async fn load_targets(path: impl AsRef<Path>) -> Result<ExtractedTargets> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(Error::InputNotFound {
            path: path.display().to_string(),
        });
    }

    let format = InputFormat::from_path(path)?;
    let targets = match format {
        InputFormat::Csv => scan_csv_file(path).await?,
        InputFormat::Json => scan_json_file(path).await?,
        InputFormat::Text => {
            let bytes = tokio::fs::read(path).await?;
            let text = String::from_utf8(bytes).map_err(|e| Error::MalformedInput {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
            extract_targets(text.as_str())
        }
    };

    info!(
        "Loaded {} IPs and {} domains from {} ({})",
        targets.ips.len(),
        targets.domains.len(),
        path.display(),
        format.as_str()
    );
    Ok(targets)
}
