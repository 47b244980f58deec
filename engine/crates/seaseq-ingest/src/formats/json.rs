//! JSON input: every string value in the document
//!
//! Object keys are field names, not data, and are skipped.

use crate::extract::{ExtractedTargets, TargetCollector};
use seaseq_core::{Error, Result};
use serde_json::Value;
use std::path::Path;
use tracing::info;

/// Scan a JSON file for targets
pub async fn scan_json_file(path: impl AsRef<Path>) -> Result<ExtractedTargets> {
    let path = path.as_ref();

    info!("Scanning JSON file: {}", path.display());

    let source = path.display().to_string();
    let bytes = tokio::fs::read(path).await?;
    let content = String::from_utf8(bytes).map_err(|e| Error::MalformedInput {
        path: source.clone(),
        message: e.to_string(),
    })?;
    scan_json(&content, &source)
}

/// Scan JSON content
pub fn scan_json(content: &str, source: &str) -> Result<ExtractedTargets> {
    let value: Value = serde_json::from_str(content).map_err(|e| Error::MalformedInput {
        path: source.to_string(),
        message: e.to_string(),
    })?;

    let mut collector = TargetCollector::new();
    walk(&value, &mut collector);
    Ok(collector.finish())
}

fn walk(value: &Value, collector: &mut TargetCollector) {
    match value {
        Value::String(s) => collector.scan(s.as_str()),
        Value::Array(items) => {
            for item in items {
                walk(item, collector);
            }
        }
        Value::Object(map) => {
            for item in map.values() {
                walk(item, collector);
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}
