use anyhow::Context;
use time::OffsetDateTime;
use verguard_types::{
    ids, Finding, ReportEnvelope, RunData, Severity, ToolMeta, Verdict, SCHEMA_REPORT_V1,
};

pub fn serialize_report(report: &ReportEnvelope) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

/// A report for runs that died before (or instead of) evaluating: config
/// errors, `PolicyNotLocated`, a malformed located policy.
pub fn runtime_error_report(message: &str) -> ReportEnvelope {
    let now = OffsetDateTime::now_utc();
    ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "verguard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at: now,
        finished_at: now,
        verdict: Verdict::Fail,
        findings: vec![Finding {
            severity: Severity::Error,
            check_id: ids::CHECK_TOOL_RUNTIME.to_string(),
            code: ids::CODE_RUNTIME_ERROR.to_string(),
            message: message.to_string(),
            data: serde_json::Value::Null,
        }],
        data: RunData {
            findings_total: 1,
            ..RunData::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_error_report_round_trips_as_json() {
        let report = runtime_error_report("boom");
        let bytes = serialize_report(&report).expect("serialize");
        let parsed: ReportEnvelope = serde_json::from_slice(&bytes).expect("parse");
        assert_eq!(parsed.verdict, Verdict::Fail);
        assert_eq!(parsed.findings[0].code, ids::CODE_RUNTIME_ERROR);
        assert_eq!(parsed.schema, SCHEMA_REPORT_V1);
    }
}
