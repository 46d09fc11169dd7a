//! CLI entry point for verguard.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and
//! exit codes. All business logic lives in the `verguard-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use verguard_app::{run_check, runtime_error_report, serialize_report, verdict_exit_code, CheckInput};
use verguard_settings::Overrides;
use verguard_types::{ArtifactCoordinate, ReportEnvelope, Severity};

#[derive(Parser, Debug)]
#[command(
    name = "verguard",
    version,
    about = "Version policy guard for resolved dependency sets"
)]
struct Cli {
    /// Path to verguard config TOML.
    #[arg(long, default_value = "verguard.toml")]
    config: Utf8PathBuf,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate a resolved artifact set against the published version policy.
    Check {
        /// File with one group:artifact:version line per resolved dependency
        /// (blank lines and `#` comments ignored).
        #[arg(long)]
        artifacts: Utf8PathBuf,

        /// Candidate repository base, highest priority first (repeatable).
        #[arg(long = "repo")]
        repos: Vec<String>,

        /// Group the policy artifact is published under.
        #[arg(long)]
        policy_group: Option<String>,

        /// Artifact id the policy is published under.
        #[arg(long)]
        policy_artifact: Option<String>,

        /// Direct policy document address, bypassing repository discovery.
        #[arg(long)]
        policy_url: Option<String>,

        /// Comma-separated group allow-list; only these groups are checked.
        #[arg(long)]
        check_groups: Option<String>,

        /// HTTP fetch timeout in seconds.
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/verguard/report.json")]
        report_out: Utf8PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Check {
            ref artifacts,
            ref repos,
            ref policy_group,
            ref policy_artifact,
            ref policy_url,
            ref check_groups,
            timeout_secs,
            ref report_out,
        } => cmd_check(
            &cli.config,
            artifacts,
            Overrides {
                repositories: repos.clone(),
                policy_group: policy_group.clone(),
                policy_artifact: policy_artifact.clone(),
                policy_url: policy_url.clone(),
                check_groups: check_groups.clone(),
                timeout_secs,
            },
            report_out,
        ),
    }
}

fn cmd_check(
    config_path: &Utf8Path,
    artifacts_path: &Utf8Path,
    overrides: Overrides,
    report_out: &Utf8Path,
) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<i32> {
        // Missing config file is allowed (defaults apply; CLI flags may carry everything).
        let config_text = std::fs::read_to_string(config_path).unwrap_or_default();

        let artifacts = read_artifact_list(artifacts_path)
            .with_context(|| format!("read artifact list: {artifacts_path}"))?;

        let output = run_check(CheckInput {
            config_text: &config_text,
            overrides,
            artifacts,
        })?;

        write_report_file(report_out, &output.report).context("write report json")?;

        for probe in &output.report.data.probes {
            eprintln!("verguard probe: {probe}");
        }
        for finding in &output.report.findings {
            match finding.severity {
                Severity::Error => eprintln!("verguard error: {}", finding.message),
                Severity::Warning => eprintln!("verguard warning: {}", finding.message),
                Severity::Info => {}
            }
        }

        Ok(verdict_exit_code(output.report.verdict))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            let report = runtime_error_report(&format!("{err:#}"));
            let _ = write_report_file(report_out, &report);
            eprintln!("verguard error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn read_artifact_list(path: &Utf8Path) -> anyhow::Result<Vec<ArtifactCoordinate>> {
    let text = std::fs::read_to_string(path)?;
    let mut artifacts = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        artifacts.push(ArtifactCoordinate::parse_spec(line)?);
    }
    Ok(artifacts)
}

fn write_report_file(path: &Utf8Path, report: &ReportEnvelope) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    let data = serialize_report(report)?;
    std::fs::write(path, data).with_context(|| format!("write report: {path}"))?;
    Ok(())
}
