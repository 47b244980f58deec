//! CSV input: every cell of every row, header row included

use crate::extract::{ExtractedTargets, TargetCollector};
use csv::ReaderBuilder;
use seaseq_core::{Error, Result};
use std::path::Path;
use tracing::{debug, info};

/// Scan a CSV file for targets
pub async fn scan_csv_file(path: impl AsRef<Path>) -> Result<ExtractedTargets> {
    let path = path.as_ref();

    info!("Scanning CSV file: {}", path.display());

    let content = tokio::fs::read(path).await?;
    scan_csv(&content, &path.display().to_string())
}

/// Scan CSV content. Headers are treated as data and rows may be ragged;
/// an undecodable record fails the whole input.
pub fn scan_csv(content: &[u8], source: &str) -> Result<ExtractedTargets> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content);

    let mut collector = TargetCollector::new();
    let mut rows = 0usize;

    for result in reader.records() {
        let record = result.map_err(|e| Error::MalformedInput {
            path: source.to_string(),
            message: format!("row {}: {}", rows + 1, e),
        })?;
        rows += 1;

        for cell in record.iter() {
            collector.scan(cell);
        }
    }

    let targets = collector.finish();
    debug!(
        "CSV scan complete: {} rows, {} IPs, {} domains",
        rows,
        targets.ips.len(),
        targets.domains.len()
    );
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_every_cell() {
        let csv = "Issue,Host,Notes\n\
                   Open RDP,10.0.0.1,seen on portal.example.gov\n\
                   Weak TLS,10.0.0.2\n\
                   Duplicate,10.0.0.1,PORTAL.example.gov also 10.0.0.3\n";

        let result = scan_csv(csv.as_bytes(), "issues.csv").unwrap();
        assert_eq!(result.ips, vec!["10.0.0.1", "10.0.0.2", "10.0.0.3"]);
        assert_eq!(result.domains, vec!["portal.example.gov"]);
    }

    #[test]
    fn test_header_cells_are_scanned() {
        let csv = "hosts for 192.168.0.1,other\nnothing,here\n";
        let result = scan_csv(csv.as_bytes(), "issues.csv").unwrap();
        assert_eq!(result.ips, vec!["192.168.0.1"]);
    }

    #[test]
    fn test_invalid_utf8_is_malformed() {
        let bytes = b"host\n\xff\xfe10.0.0.1\n";
        let err = scan_csv(bytes, "bad.csv").unwrap_err();
        assert!(matches!(err, Error::MalformedInput { .. }));
        assert!(err.is_input_error());
    }

    #[test]
    fn test_empty_csv() {
        let result = scan_csv(b"", "empty.csv").unwrap();
        assert!(result.is_empty());
    }
}
