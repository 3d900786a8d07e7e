// SPDX-License-Identifier: GPL-3.0-only

//! check-filer - monitoring plugin for storage appliances
//!
//! Prints exactly one status line (or a JSON report with `--json`) on stdout
//! and exits with the plugin protocol code. Diagnostics go to stderr.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use check_filer::{CheckError, CheckRequest, Metric, Report, check};
use clap::{Parser, ValueEnum};
use filer_sys::{HostMap, NetSnmpCli, SessionConfig, SnmpVersion};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum VersionArg {
    #[value(name = "1")]
    V1,
    #[value(name = "2c")]
    V2c,
}

impl From<VersionArg> for SnmpVersion {
    fn from(version: VersionArg) -> Self {
        match version {
            VersionArg::V1 => SnmpVersion::V1,
            VersionArg::V2c => SnmpVersion::V2c,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "check-filer", version)]
#[command(about = "Check capacity, quota and health metrics of a storage appliance")]
struct Cli {
    /// Appliance host name or address (remapped through --hostmap)
    #[arg(short = 'H', long)]
    hostname: String,

    /// Read community
    #[arg(short = 'C', long)]
    community: String,

    #[arg(short, long, value_enum)]
    metric: Metric,

    /// Warning range, e.g. 80 or @10:20
    #[arg(short, long, allow_hyphen_values = true)]
    warning: Option<String>,

    /// Critical range
    #[arg(short, long, allow_hyphen_values = true)]
    critical: Option<String>,

    #[arg(long, default_value_t = 161)]
    port: u16,

    #[arg(long, value_enum, default_value = "2c")]
    snmp_version: VersionArg,

    /// Per-request timeout in seconds
    #[arg(short, long, default_value_t = 30)]
    timeout: u64,

    /// Skip an entity by exact name (repeatable)
    #[arg(short = 'x', long)]
    exclude: Vec<String>,

    #[arg(long, default_value = "/etc/check-filer/hosts.ini")]
    hostmap: PathBuf,

    /// Print the full report as JSON
    #[arg(long)]
    json: bool,

    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "check_filer=debug,filer_sys=debug,warn"
    } else {
        "warn"
    };
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: &Cli) -> Result<Report> {
    let hosts = HostMap::load(&cli.hostmap)
        .map_err(|e| CheckError::Configuration(e.to_string()))
        .context("loading host map")?;
    let target = hosts.resolve(&cli.hostname).to_string();
    tracing::debug!("Resolved {} to {}", cli.hostname, target);

    let request = CheckRequest {
        metric: cli.metric,
        warning: cli.warning.clone(),
        critical: cli.critical.clone(),
        exclude: cli.exclude.clone(),
    };

    // Validate before locating tools so configuration errors win.
    if let Err(error) = request.context() {
        return Ok(Report::from_error(&error));
    }

    let transport = match NetSnmpCli::new(SessionConfig {
        target,
        port: cli.port,
        community: cli.community.clone(),
        version: cli.snmp_version.into(),
        timeout: Duration::from_secs(cli.timeout),
    }) {
        Ok(transport) => transport,
        Err(error) => return Ok(Report::from_error(&CheckError::from(error))),
    };

    Ok(check(&transport, &request).await)
}

/// Usage errors are configuration errors: one UNKNOWN line, exit 3.
fn usage_report(error: &clap::Error) -> Report {
    let rendered = error.to_string();
    let reason = rendered
        .lines()
        .map(str::trim)
        .take_while(|line| !line.is_empty() && !line.starts_with("Usage:"))
        .collect::<Vec<_>>()
        .join(" ");
    let reason = reason.strip_prefix("error: ").unwrap_or(&reason);
    Report::from_error(&CheckError::Configuration(reason.to_string()))
}

fn emit(report: &Report, json: bool) {
    if json {
        match serde_json::to_string_pretty(report) {
            Ok(text) => println!("{text}"),
            Err(e) => println!("UNKNOWN - failed to serialise report: {e}"),
        }
    } else {
        println!("{}", report.render());
    }
}

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) if !error.use_stderr() => error.exit(),
        Err(error) => {
            let report = usage_report(&error);
            emit(&report, false);
            std::process::exit(report.exit_code);
        }
    };
    init_logging(cli.verbose);

    let report = match run(&cli).await {
        Ok(report) => report,
        Err(error) => {
            tracing::warn!("{:#}", error);
            let error = match error.downcast::<CheckError>() {
                Ok(error) => error,
                Err(other) => CheckError::Configuration(format!("{other:#}")),
            };
            Report::from_error(&error)
        }
    };

    emit(&report, cli.json);
    std::process::exit(report.exit_code);
}
