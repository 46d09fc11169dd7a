//! The `check` use case: locate the policy, evaluate artifacts, produce a report.

use anyhow::Context;
use thiserror::Error;
use time::OffsetDateTime;
use verguard_repo::{locate_policy, parse_policy, DefaultFetcher, Fetcher};
use verguard_settings::{Overrides, PolicySource, ResolvedConfig};
use verguard_types::{
    ArtifactCoordinate, ReportEnvelope, RunData, ToolMeta, Verdict, SCHEMA_REPORT_V1,
};

/// No configured repository yielded a usable policy document. Fatal: the run
/// aborts before any evaluation occurs.
#[derive(Debug, Error)]
#[error("policy not located: no configured repository yielded a usable policy document")]
pub struct PolicyNotLocated;

/// Input for the check use case.
#[derive(Clone, Debug)]
pub struct CheckInput<'a> {
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
    /// The finalized artifact set from the build-resolution collaborator.
    pub artifacts: Vec<ArtifactCoordinate>,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    /// The generated report.
    pub report: ReportEnvelope,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
}

/// Run the check use case: resolve config, locate and parse the policy,
/// evaluate the artifact set, produce the report envelope.
pub fn run_check(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    let started_at = OffsetDateTime::now_utc();

    // Parse config (empty is allowed, defaults apply).
    let cfg = if input.config_text.trim().is_empty() {
        verguard_settings::VerguardConfigV1::default()
    } else {
        verguard_settings::parse_config_toml(input.config_text).context("parse config")?
    };
    let resolved =
        verguard_settings::resolve_config(cfg, input.overrides.clone()).context("resolve config")?;

    let fetcher = DefaultFetcher::new(resolved.timeout).context("build fetcher")?;

    let (policy_text, policy_source, policy_version, probes) = match &resolved.policy {
        PolicySource::Url(url) => {
            let body = fetcher
                .fetch(url)
                .with_context(|| format!("fetch policy document from {url}"))?;
            let text = String::from_utf8(body)
                .with_context(|| format!("policy document from {url} is not valid UTF-8"))?;
            (text, url.clone(), None, Vec::new())
        }
        PolicySource::Coordinates { group, artifact } => {
            let outcome = locate_policy(&fetcher, &resolved.repositories, group, artifact);
            match outcome.located {
                Some(located) => (
                    located.text,
                    located.address,
                    Some(located.version.as_str().to_string()),
                    outcome.probes,
                ),
                None => {
                    return Err(anyhow::Error::new(PolicyNotLocated)
                        .context(format!("probed: {}", outcome.probes.join("; "))));
                }
            }
        }
    };

    // Format errors are fatal here: this is the final, located document.
    let policy = parse_policy(&policy_text, &policy_source)?;

    let domain_report =
        verguard_domain::evaluate(&input.artifacts, &policy, resolved.group_filter.as_ref());

    let finished_at = OffsetDateTime::now_utc();
    let findings_total = domain_report.findings.len() as u32;

    let report = ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "verguard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at,
        verdict: domain_report.verdict,
        findings: domain_report.findings,
        data: RunData {
            policy_source: Some(policy_source),
            policy_version,
            artifacts_checked: domain_report.artifacts_checked,
            artifacts_skipped: domain_report.artifacts_skipped,
            findings_total,
            probes,
        },
    };

    Ok(CheckOutput {
        report,
        resolved_config: resolved,
    })
}

/// Map verdict to exit code: 0 = pass/warn, 2 = fail (blocking violation).
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Warn => 0,
        Verdict::Fail => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn write_file(path: &Path, contents: &str) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(path, contents).expect("write file");
    }

    fn publish_policy(repo_root: &Path, version: &str, policy_xml: &str) {
        let dir = repo_root.join("com/example/policy/version-policy");
        write_file(
            &dir.join("maven-metadata.xml"),
            &format!(
                "<metadata><versioning><release>{version}</release></versioning></metadata>"
            ),
        );
        write_file(
            &dir.join(version)
                .join(format!("version-policy-{version}.xml")),
            policy_xml,
        );
    }

    const POLICY: &str = r#"<dependencyVersionPolicy>
  <dependency>
    <groupId>org.forced</groupId>
    <artifactId>forced-artifact</artifactId>
    <minSafeVersion>2.0.0</minSafeVersion>
    <forceUpdate>true</forceUpdate>
    <message>Must upgrade</message>
  </dependency>
</dependencyVersionPolicy>"#;

    fn overrides_for(repo: &Path) -> Overrides {
        Overrides {
            repositories: vec![repo.to_str().unwrap().to_string()],
            policy_group: Some("com.example.policy".to_string()),
            policy_artifact: Some("version-policy".to_string()),
            ..Overrides::default()
        }
    }

    #[test]
    fn forced_breach_fails_the_run() {
        let tmp = tempfile::tempdir().expect("temp dir");
        publish_policy(tmp.path(), "1.0.0", POLICY);

        let output = run_check(CheckInput {
            config_text: "",
            overrides: overrides_for(tmp.path()),
            artifacts: vec![ArtifactCoordinate::new("org.forced", "forced-artifact", "1.0.0")],
        })
        .expect("run_check");

        assert_eq!(output.report.verdict, Verdict::Fail);
        assert_eq!(output.report.data.policy_version.as_deref(), Some("1.0.0"));
        assert_eq!(output.report.data.artifacts_checked, 1);
        assert!(output.report.findings[0].message.contains("Must upgrade"));
    }

    #[test]
    fn empty_repository_list_is_policy_not_located() {
        let overrides = Overrides {
            policy_group: Some("com.example.policy".to_string()),
            policy_artifact: Some("version-policy".to_string()),
            ..Overrides::default()
        };
        let err = run_check(CheckInput {
            config_text: "",
            overrides,
            artifacts: Vec::new(),
        })
        .unwrap_err();
        assert!(err.chain().any(|e| e.is::<PolicyNotLocated>()));
    }

    #[test]
    fn malformed_located_policy_is_fatal() {
        let tmp = tempfile::tempdir().expect("temp dir");
        publish_policy(tmp.path(), "1.0.0", "<somethingElse/>");

        let err = run_check(CheckInput {
            config_text: "",
            overrides: overrides_for(tmp.path()),
            artifacts: Vec::new(),
        })
        .unwrap_err();
        assert!(err.to_string().contains("malformed policy document"));
    }

    #[test]
    fn direct_policy_url_bypasses_discovery() {
        let tmp = tempfile::tempdir().expect("temp dir");
        let policy_path = tmp.path().join("policy.xml");
        write_file(&policy_path, POLICY);

        let overrides = Overrides {
            policy_url: Some(policy_path.to_str().unwrap().to_string()),
            ..Overrides::default()
        };
        let output = run_check(CheckInput {
            config_text: "",
            overrides,
            artifacts: vec![ArtifactCoordinate::new("org.forced", "forced-artifact", "2.0.0")],
        })
        .expect("run_check");

        assert_eq!(output.report.verdict, Verdict::Pass);
        assert!(output.report.data.policy_version.is_none());
    }

    #[test]
    fn verdict_exit_codes() {
        assert_eq!(verdict_exit_code(Verdict::Pass), 0);
        assert_eq!(verdict_exit_code(Verdict::Warn), 0);
        assert_eq!(verdict_exit_code(Verdict::Fail), 2);
    }
}
