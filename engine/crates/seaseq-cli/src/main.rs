//! Sea-Seq Validation CLI
//!
//! Loads candidate targets from an input document, enriches them from the
//! remote inventory, lets the operator pick one target and runs the selected
//! checks against it.

mod report;
mod select;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info};

use seaseq_checks::{CheckRegistry, LocalExecutor, ValidationRunner};
use seaseq_common::logging::{init_logging_with_config, LogConfig};
use seaseq_common::Config;
use seaseq_core::CheckExecutor;
use seaseq_ingest::{load_targets, Discovery, ExtractedTargets, TargetRepository};
use seaseq_transport::InventoryClient;

use report::JsonReport;
use select::{
    resolve_target, select_blocking, website_choices, PresetSelector, PromptSelector, Selector,
};

/// Sea-Seq Security Validation CLI
#[derive(Parser, Debug)]
#[command(name = "seaseq")]
#[command(author = "Sea-Seq Engineering")]
#[command(version)]
#[command(about = "Validate IP and website targets found in issue lists", long_about = None)]
struct Args {
    /// CSV, JSON or text file with the issues (IPs/domains inside)
    #[arg(short, long, required_unless_present = "list_checks")]
    input: Option<PathBuf>,

    /// Inventory API base URL (or env SEA_SEQ_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Inventory API key (or env SEA_SEQ_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Subset of checks to run (default: all)
    #[arg(long, num_args = 1..)]
    checks: Vec<String>,

    /// Target IP; skips the interactive prompts
    #[arg(long)]
    ip: Option<String>,

    /// Target website/host; skips the interactive prompts
    #[arg(long)]
    website: Option<String>,

    /// Write a JSON report to this path
    #[arg(long)]
    json: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Log format (pretty, json, compact)
    #[arg(long)]
    log_format: Option<String>,

    /// Print the registered checks and exit
    #[arg(long)]
    list_checks: bool,
}

/// Process exit status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Success = 0,
    NothingToValidate = 1,
    InputError = 2,
    ReportWriteFailed = 3,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        ExitCode::from(status as u8)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(args).await {
        Ok(status) => status.into(),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            Status::InputError.into()
        }
    }
}

/// File, then environment, then command-line flags
fn load_config(args: &Args) -> Result<Config> {
    load_config_with(args, |key| std::env::var(key).ok())
}

/// `load_config` with an explicit variable lookup in place of the environment
fn load_config_with(args: &Args, lookup: impl Fn(&str) -> Option<String>) -> Result<Config> {
    let config = match &args.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };
    let mut config = config.merge_vars(lookup);

    if let Some(url) = &args.api_url {
        config.remote.base_url = Some(url.clone());
    }
    if let Some(key) = &args.api_key {
        config.remote.api_key = Some(key.clone());
    }
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    if let Some(format) = &args.log_format {
        config.logging.format = format.clone();
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}

/// Extract targets from the input document; any failure is an input error
async fn load_input(path: &Path) -> std::result::Result<ExtractedTargets, Status> {
    match load_targets(path).await {
        Ok(local) => {
            info!(
                "Input yielded {} IPs and {} domains",
                local.ips.len(),
                local.domains.len()
            );
            Ok(local)
        }
        Err(e) => {
            debug!("Input stage failed ({})", e.code());
            eprintln!("{} {}", "Input error:".red(), e);
            Err(Status::InputError)
        }
    }
}

async fn run(args: Args) -> Result<Status> {
    let config = load_config(&args)?;

    init_logging_with_config(LogConfig::from(&config.logging));

    info!("Sea-Seq CLI v{}", env!("CARGO_PKG_VERSION"));

    let registry = Arc::new(CheckRegistry::with_builtin(&config.checks));

    if args.list_checks {
        for (name, description) in registry.describe() {
            println!("{:<16} {}", name.bold(), description);
        }
        return Ok(Status::Success);
    }

    let Some(input) = args.input.as_ref() else {
        eprintln!("{} --input is required", "Input error:".red());
        return Ok(Status::InputError);
    };

    let local = match load_input(input).await {
        Ok(local) => local,
        Err(status) => return Ok(status),
    };

    let client = Arc::new(
        InventoryClient::new(&config.remote, LocalExecutor::new(registry.clone()))
            .context("building inventory client")?,
    );

    let checks = if !args.checks.is_empty() {
        args.checks.clone()
    } else if !config.checks.default_checks.is_empty() {
        config.checks.default_checks.clone()
    } else {
        registry.names()
    };

    // --ip/--website make the run non-interactive
    let selector: Box<dyn Selector> = if args.ip.is_some() || args.website.is_some() {
        Box::new(PresetSelector::new([args.ip.clone(), args.website.clone()]))
    } else {
        Box::new(PromptSelector::stdio())
    };

    let workflow = Workflow {
        repository: TargetRepository::new(client.clone()),
        executor: client,
        runner: ValidationRunner::with_max_workers(config.checks.max_workers),
        checks,
        json: args.json.clone(),
    };
    workflow.run(&local, selector).await
}

/// Discovery, selection, the check run and reporting for one loaded input
struct Workflow {
    repository: TargetRepository,
    executor: Arc<dyn CheckExecutor>,
    runner: ValidationRunner,
    checks: Vec<String>,
    json: Option<PathBuf>,
}

impl Workflow {
    async fn run(&self, local: &ExtractedTargets, selector: Box<dyn Selector>) -> Result<Status> {
        let candidates = match self.repository.discover(local).await {
            Discovery::Targets(candidates) => candidates,
            Discovery::NoTargets => {
                println!("{}", "No targets found in file or inventory.".yellow());
                return Ok(Status::NothingToValidate);
            }
        };

        let (selector, chosen_ip) =
            select_blocking(selector, "Select an IP target", candidates.ips.clone()).await?;
        if chosen_ip.is_none() {
            println!("{}", "No IP selected; attempting domain-only workflow.".yellow());
        }

        let sites = self
            .repository
            .websites_for(chosen_ip.as_deref(), &candidates.domains)
            .await;
        let (_, chosen_site) = select_blocking(
            selector,
            "Select a website/host (optional)",
            website_choices(&sites),
        )
        .await?;

        let Some(target) = resolve_target(chosen_ip, chosen_site) else {
            println!("{}", "You must select at least an IP or a website.".red());
            return Ok(Status::NothingToValidate);
        };

        if self.checks.is_empty() {
            println!("{}", "No checks selected.".yellow());
            return Ok(Status::NothingToValidate);
        }

        report::print_summary(&target, &self.checks);

        let outcome = self
            .runner
            .run(self.executor.clone(), &target, &self.checks)
            .await;
        report::print_report(&outcome);

        if let Some(path) = &self.json {
            let document = JsonReport::new(&target, &outcome);
            if let Err(e) = report::save_json(path, &document) {
                eprintln!("{} {:#}", "Failed to write JSON:".red(), e);
                return Ok(Status::ReportWriteFailed);
            }
            println!("{} {}", "Saved JSON report:".green(), path.display());
        }

        Ok(Status::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seaseq_core::{CheckOutcome, EmptyInventory, ValidationTarget};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn no_vars(_: &str) -> Option<String> {
        None
    }

    /// Passes every check and counts the calls
    #[derive(Default)]
    struct CountingExecutor {
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl CheckExecutor for CountingExecutor {
        async fn run_check(&self, name: &str, _target: &ValidationTarget) -> CheckOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            CheckOutcome::pass(format!("{} ok", name))
        }
    }

    fn workflow(executor: Arc<CountingExecutor>, json: Option<PathBuf>) -> Workflow {
        Workflow {
            repository: TargetRepository::new(Arc::new(EmptyInventory)),
            executor,
            runner: ValidationRunner::new(),
            checks: vec!["dns_resolves".into(), "port_scan_top".into()],
            json,
        }
    }

    fn local_ip() -> ExtractedTargets {
        ExtractedTargets {
            ips: vec!["10.0.0.1".into()],
            domains: Vec::new(),
        }
    }

    fn preset(ip: Option<&str>, website: Option<&str>) -> Box<dyn Selector> {
        Box::new(PresetSelector::new([
            ip.map(str::to_string),
            website.map(str::to_string),
        ]))
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "seaseq",
            "--input",
            "issues.csv",
            "--checks",
            "dns_resolves",
            "tls_validity",
            "--ip",
            "10.0.0.1",
        ])
        .unwrap();

        assert_eq!(args.input, Some(PathBuf::from("issues.csv")));
        assert_eq!(args.checks, vec!["dns_resolves", "tls_validity"]);
        assert_eq!(args.ip.as_deref(), Some("10.0.0.1"));
        assert!(!args.list_checks);
    }

    #[test]
    fn test_input_required_unless_listing() {
        assert!(Args::try_parse_from(["seaseq"]).is_err());
        assert!(Args::try_parse_from(["seaseq", "--list-checks"]).is_ok());
    }

    #[test]
    fn test_flags_override_config() {
        let args = Args::try_parse_from([
            "seaseq",
            "-i",
            "issues.csv",
            "--api-url",
            "https://inventory.example.com",
            "--log-level",
            "debug",
        ])
        .unwrap();

        let env = |key: &str| match key {
            "SEA_SEQ_API_URL" => Some("https://env.example.com".to_string()),
            "SEA_SEQ_MAX_WORKERS" => Some("2".to_string()),
            _ => None,
        };
        let config = load_config_with(&args, env).unwrap();
        assert_eq!(
            config.remote.base_url.as_deref(),
            Some("https://inventory.example.com")
        );
        assert_eq!(config.checks.max_workers, 2);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_config_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seaseq.toml");
        std::fs::write(&path, "[checks]\nmax_workers = 3\n").unwrap();

        let args = Args::try_parse_from([
            "seaseq",
            "-i",
            "issues.csv",
            "--config",
            path.to_str().unwrap(),
        ])
        .unwrap();

        assert_eq!(load_config_with(&args, no_vars).unwrap().checks.max_workers, 3);
    }

    #[test]
    fn test_bad_api_url_rejected() {
        let args =
            Args::try_parse_from(["seaseq", "-i", "issues.csv", "--api-url", "ftp://inventory"])
                .unwrap();
        assert!(load_config_with(&args, no_vars).is_err());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(Status::Success as u8, 0);
        assert_eq!(Status::NothingToValidate as u8, 1);
        assert_eq!(Status::InputError as u8, 2);
        assert_eq!(Status::ReportWriteFailed as u8, 3);
    }

    #[tokio::test]
    async fn test_input_errors_exit_with_input_status() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = dir.path().join("issues.pdf");
        std::fs::write(&pdf, b"%PDF-1.7").unwrap();
        let garbled = dir.path().join("issues.json");
        std::fs::write(&garbled, b"[\"10.0.0.1 \xff\"]").unwrap();

        for path in [dir.path().join("missing.csv"), pdf, garbled] {
            assert_eq!(load_input(&path).await, Err(Status::InputError));
        }
    }

    #[tokio::test]
    async fn test_load_input_extracts_targets() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("issues.txt");
        std::fs::write(&path, "Weak cipher on 10.0.0.1 (www.example.com)").unwrap();

        let local = load_input(&path).await.unwrap();
        assert_eq!(local.ips, vec!["10.0.0.1"]);
        assert_eq!(local.domains, vec!["www.example.com"]);
    }

    #[tokio::test]
    async fn test_no_targets_never_runs_checks() {
        let executor = Arc::new(CountingExecutor::default());
        let status = workflow(executor.clone(), None)
            .run(&ExtractedTargets::default(), preset(Some("10.0.0.1"), None))
            .await
            .unwrap();

        assert_eq!(status, Status::NothingToValidate);
        assert_eq!(executor.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_no_selection_is_nothing_to_validate() {
        let executor = Arc::new(CountingExecutor::default());
        let status = workflow(executor.clone(), None)
            .run(&local_ip(), preset(None, None))
            .await
            .unwrap();

        assert_eq!(status, Status::NothingToValidate);
        assert_eq!(executor.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_successful_run_writes_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let executor = Arc::new(CountingExecutor::default());

        let status = workflow(executor.clone(), Some(path.clone()))
            .run(&local_ip(), preset(Some("10.0.0.1"), Some("example.com")))
            .await
            .unwrap();

        assert_eq!(status, Status::Success);
        assert_eq!(executor.calls.load(Ordering::SeqCst), 2);

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["ip"], "10.0.0.1");
        assert_eq!(value["website"], "example.com");
        assert_eq!(value["results"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_domain_only_run() {
        let executor = Arc::new(CountingExecutor::default());
        let status = workflow(executor.clone(), None)
            .run(&local_ip(), preset(None, Some("example.com")))
            .await
            .unwrap();

        assert_eq!(status, Status::Success);
        assert_eq!(executor.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_report_write_failure_status() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("report.json");
        let executor = Arc::new(CountingExecutor::default());

        let status = workflow(executor.clone(), Some(path))
            .run(&local_ip(), preset(Some("10.0.0.1"), None))
            .await
            .unwrap();

        assert_eq!(status, Status::ReportWriteFailed);
        assert_eq!(executor.calls.load(Ordering::SeqCst), 2);
    }
}
