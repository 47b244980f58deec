//! Run summary, result table and JSON export

use chrono::{DateTime, Utc};
use colored::*;
use seaseq_checks::RunReport;
use seaseq_core::{CheckResult, ValidationTarget};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

pub fn print_summary(target: &ValidationTarget, checks: &[String]) {
    let sep = "══════════════════".bright_black();
    println!("{} {} {}", sep, "Run Summary".bold(), sep);
    println!("Target IP: {}", target.ip());
    println!("Website:   {}", target.website().unwrap_or("-"));
    println!("Checks:    {}", checks.join(", "));
    println!();
}

pub fn print_report(report: &RunReport) {
    let name_width = report
        .results
        .iter()
        .map(|r| r.name.len())
        .max()
        .unwrap_or(0)
        .max("Check".len());

    println!("{}", "Sea-Seq Validation Report".bold());
    println!(
        "{:<width$}  {:<6}  {:>8}  {}",
        "Check",
        "Status",
        "Time (s)",
        "Message",
        width = name_width
    );
    println!("{}", "─".repeat(name_width + 28).bright_black());

    for result in &report.results {
        let status = if result.ok {
            result.status_str().green().bold()
        } else {
            result.status_str().red().bold()
        };
        println!(
            "{:<width$}  {:<6}  {:>8.2}  {}",
            result.name.bold(),
            status,
            result.duration_seconds,
            result.message,
            width = name_width
        );
    }

    println!();
    println!(
        "{}",
        format!(
            "Completed {} checks in {:.2}s",
            report.results.len(),
            report.total_seconds()
        )
        .dimmed()
    );
}

/// On-disk shape of a saved run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub ip: String,
    pub website: Option<String>,
    pub total_duration_s: f64,
    pub results: Vec<CheckResult>,
}

impl JsonReport {
    pub fn new(target: &ValidationTarget, report: &RunReport) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            ip: target.ip().to_string(),
            website: target.website().map(str::to_string),
            total_duration_s: report.total_seconds(),
            results: report.results.clone(),
        }
    }
}

/// Write the report as pretty-printed JSON
pub fn save_json(path: impl AsRef<Path>, report: &JsonReport) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use seaseq_core::CheckOutcome;
    use std::time::Duration;

    fn sample() -> RunReport {
        RunReport {
            results: vec![
                CheckResult::new(
                    "dns_resolves",
                    CheckOutcome::pass("Resolved example.com (2 addresses)"),
                    Duration::from_millis(120),
                ),
                CheckResult::new(
                    "missing_check",
                    CheckOutcome::unknown("missing_check"),
                    Duration::ZERO,
                ),
            ],
            total_duration: Duration::from_millis(150),
        }
    }

    #[test]
    fn test_save_json_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let target = ValidationTarget::with_website("10.0.0.1", "example.com");

        save_json(&path, &JsonReport::new(&target, &sample())).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["ip"], "10.0.0.1");
        assert_eq!(value["website"], "example.com");
        assert_eq!(value["total_duration_s"], 0.15);
        assert!(value["run_id"].is_string());
        assert!(value["generated_at"].is_string());

        let results = value["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["test"], "dns_resolves");
        assert_eq!(results[0]["ok"], true);
        assert_eq!(results[0]["duration_s"], 0.12);
        assert_eq!(results[1]["message"], "Unknown check: missing_check");
    }

    #[test]
    fn test_website_absent_is_null() {
        let report = JsonReport::new(&ValidationTarget::new("10.0.0.1"), &sample());
        let value = serde_json::to_value(&report).unwrap();
        assert!(value["website"].is_null());
    }

    #[test]
    fn test_save_json_bad_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("report.json");
        let report = JsonReport::new(&ValidationTarget::new("10.0.0.1"), &sample());

        assert!(save_json(&path, &report).is_err());
    }
}
