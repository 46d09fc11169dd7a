use crate::policy::PolicyDocument;
use crate::report::{DomainReport, SeverityCounts};
use serde_json::json;
use std::collections::BTreeSet;
use verguard_types::{ids, ArtifactCoordinate, Finding, Severity, Verdict, Version};

/// Group allow-list: when present, artifacts outside it are skipped before
/// any rule lookup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GroupFilter {
    groups: BTreeSet<String>,
}

impl GroupFilter {
    pub fn new(groups: impl IntoIterator<Item = String>) -> Self {
        Self {
            groups: groups.into_iter().collect(),
        }
    }

    pub fn contains(&self, group: &str) -> bool {
        self.groups.contains(group)
    }
}

/// Evaluate a resolved artifact set against a policy document.
///
/// Never short-circuits: every artifact is processed even after a blocking
/// violation, so a single run surfaces the complete diagnosis. Input order
/// does not affect the outcome; findings are sorted deterministically.
pub fn evaluate(
    artifacts: &[ArtifactCoordinate],
    policy: &PolicyDocument,
    filter: Option<&GroupFilter>,
) -> DomainReport {
    let mut findings: Vec<Finding> = Vec::new();
    let mut checked: u32 = 0;
    let mut skipped: u32 = 0;

    for artifact in artifacts {
        if let Some(f) = filter
            && !f.contains(&artifact.group)
        {
            skipped += 1;
            continue;
        }
        checked += 1;

        let Some(rule) = policy.find(&artifact.group, &artifact.artifact) else {
            findings.push(Finding {
                severity: Severity::Info,
                check_id: ids::CHECK_DEPS_MIN_SAFE_VERSION.to_string(),
                code: ids::CODE_NO_RULE_DEFINED.to_string(),
                message: format!(
                    "dependency {}:{} version {} has no version rule defined",
                    artifact.group, artifact.artifact, artifact.version
                ),
                data: json!({
                    "group": artifact.group,
                    "artifact": artifact.artifact,
                    "resolved": artifact.version,
                }),
            });
            continue;
        };

        let resolved = Version::parse(&artifact.version);
        let min_safe = Version::parse(&rule.min_safe_version);
        if resolved >= min_safe {
            continue;
        }

        let (severity, code) = if rule.force_update {
            (Severity::Error, ids::CODE_BELOW_MIN_SAFE_FORCED)
        } else {
            (Severity::Warning, ids::CODE_BELOW_MIN_SAFE)
        };

        let mut message = format!(
            "dependency {}:{} version {} is below minimum safe version {}",
            artifact.group, artifact.artifact, artifact.version, rule.min_safe_version
        );
        if !rule.message.is_empty() {
            message.push_str(". ");
            message.push_str(&rule.message);
        }

        findings.push(Finding {
            severity,
            check_id: ids::CHECK_DEPS_MIN_SAFE_VERSION.to_string(),
            code: code.to_string(),
            message,
            data: json!({
                "group": artifact.group,
                "artifact": artifact.artifact,
                "resolved": artifact.version,
                "min_safe_version": rule.min_safe_version,
                "force_update": rule.force_update,
            }),
        });
    }

    // Deterministic ordering regardless of input order.
    findings.sort_by(compare_findings);

    let verdict = compute_verdict(&findings);
    let counts = SeverityCounts::from_findings(&findings);

    DomainReport {
        verdict,
        findings,
        counts,
        artifacts_checked: checked,
        artifacts_skipped: skipped,
    }
}

fn compute_verdict(findings: &[Finding]) -> Verdict {
    if findings.iter().any(|f| f.severity == Severity::Error) {
        return Verdict::Fail;
    }
    if findings.iter().any(|f| f.severity == Severity::Warning) {
        return Verdict::Warn;
    }
    Verdict::Pass
}

fn compare_findings(a: &Finding, b: &Finding) -> std::cmp::Ordering {
    // Ordering priority: severity (error -> warning -> info), then code,
    // then message (which embeds group:artifact).
    let severity_rank = |sev: Severity| match sev {
        Severity::Error => 0,
        Severity::Warning => 1,
        Severity::Info => 2,
    };
    severity_rank(a.severity)
        .cmp(&severity_rank(b.severity))
        .then(a.code.cmp(&b.code))
        .then(a.message.cmp(&b.message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{PolicyDocument, Rule};

    fn rule(group: &str, artifact: &str, min: &str, force: bool, message: &str) -> Rule {
        Rule {
            group: group.to_string(),
            artifact: artifact.to_string(),
            min_safe_version: min.to_string(),
            force_update: force,
            message: message.to_string(),
        }
    }

    fn artifact(group: &str, artifact_id: &str, version: &str) -> ArtifactCoordinate {
        ArtifactCoordinate::new(group, artifact_id, version)
    }

    #[test]
    fn forced_breach_is_blocking() {
        let policy = PolicyDocument::new(vec![rule(
            "com.example",
            "lib",
            "2.0.0",
            true,
            "CVE-2024-0001, upgrade now",
        )]);
        let report = evaluate(&[artifact("com.example", "lib", "1.0.0")], &policy, None);

        assert_eq!(report.verdict, Verdict::Fail);
        assert_eq!(report.findings.len(), 1);
        let f = &report.findings[0];
        assert_eq!(f.severity, Severity::Error);
        assert_eq!(f.code, ids::CODE_BELOW_MIN_SAFE_FORCED);
        assert!(f.message.contains("CVE-2024-0001"));
    }

    #[test]
    fn unforced_breach_is_advisory_only() {
        let policy = PolicyDocument::new(vec![rule("com.example", "lib", "2.0.0", false, "")]);
        let report = evaluate(&[artifact("com.example", "lib", "1.0.0")], &policy, None);

        assert_eq!(report.verdict, Verdict::Warn);
        assert_eq!(report.findings[0].severity, Severity::Warning);
        assert_eq!(report.findings[0].code, ids::CODE_BELOW_MIN_SAFE);
    }

    #[test]
    fn compliant_artifact_yields_no_finding() {
        let policy = PolicyDocument::new(vec![rule("com.example", "lib", "2.0.0", true, "")]);
        let report = evaluate(&[artifact("com.example", "lib", "2.0.0")], &policy, None);
        assert_eq!(report.verdict, Verdict::Pass);
        assert!(report.findings.is_empty());
        assert_eq!(report.artifacts_checked, 1);
    }

    #[test]
    fn no_rule_records_info_finding() {
        let policy = PolicyDocument::default();
        let report = evaluate(&[artifact("com.example", "lib", "1.0.0")], &policy, None);
        assert_eq!(report.verdict, Verdict::Pass);
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].severity, Severity::Info);
        assert_eq!(report.findings[0].code, ids::CODE_NO_RULE_DEFINED);
    }

    #[test]
    fn group_filter_skips_before_rule_lookup() {
        let policy = PolicyDocument::new(vec![rule("com.other", "lib", "2.0.0", true, "")]);
        let filter = GroupFilter::new(["com.example".to_string()]);
        let report = evaluate(
            &[artifact("com.other", "lib", "1.0.0")],
            &policy,
            Some(&filter),
        );

        assert_eq!(report.verdict, Verdict::Pass);
        assert!(report.findings.is_empty());
        assert_eq!(report.artifacts_checked, 0);
        assert_eq!(report.artifacts_skipped, 1);
    }

    #[test]
    fn blocking_and_advisory_both_reported() {
        let policy = PolicyDocument::new(vec![
            rule("com.example", "lib", "2.0.0", true, "forced"),
            rule("com.example", "helper", "3.0.0", false, ""),
        ]);
        let report = evaluate(
            &[
                artifact("com.example", "helper", "2.5.0"),
                artifact("com.example", "lib", "1.0.0"),
            ],
            &policy,
            None,
        );

        assert_eq!(report.verdict, Verdict::Fail);
        assert_eq!(report.findings.len(), 2);
        // Errors sort first.
        assert_eq!(report.findings[0].severity, Severity::Error);
        assert_eq!(report.findings[1].severity, Severity::Warning);
        assert_eq!(report.counts.error, 1);
        assert_eq!(report.counts.warning, 1);
    }

    #[test]
    fn outcome_is_input_order_independent() {
        let policy = PolicyDocument::new(vec![
            rule("a.group", "one", "2.0.0", false, ""),
            rule("b.group", "two", "2.0.0", true, ""),
        ]);
        let forward = vec![
            artifact("a.group", "one", "1.0.0"),
            artifact("b.group", "two", "1.0.0"),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();

        let r1 = evaluate(&forward, &policy, None);
        let r2 = evaluate(&reversed, &policy, None);
        assert_eq!(r1.verdict, r2.verdict);
        assert_eq!(r1.findings, r2.findings);
    }
}
