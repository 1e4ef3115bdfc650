use anyhow::Context;
use regaudit_render::{
    RenderableAudit, RenderableFinding, RenderableRecommendation, RenderableReport,
    RenderableVerdictStatus,
};
use regaudit_types::{
    AuditData, ReportEnvelope, RunMeta, SCHEMA_REPORT_V1, ToolMeta, Verdict, VerdictCounts,
    VerdictStatus, ids,
};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

pub(crate) fn tool_meta() -> ToolMeta {
    ToolMeta {
        name: "regaudit".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

/// Parse a report file: a single envelope or an array of envelopes.
pub fn parse_report_json(text: &str) -> anyhow::Result<Vec<ReportEnvelope>> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let items = match value {
        serde_json::Value::Array(items) => items,
        other => vec![other],
    };

    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| {
            let schema = item
                .get("schema")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string();
            if schema != SCHEMA_REPORT_V1 {
                anyhow::bail!("report #{idx}: unknown report schema: {schema:?}");
            }
            serde_json::from_value(item).with_context(|| format!("parse report #{idx}"))
        })
        .collect()
}

/// One envelope serializes as an object; several as an array.
pub fn serialize_reports(reports: &[ReportEnvelope]) -> anyhow::Result<Vec<u8>> {
    match reports {
        [single] => serde_json::to_vec_pretty(single).context("serialize report"),
        many => serde_json::to_vec_pretty(many).context("serialize reports"),
    }
}

/// Envelope written when the run itself failed (bad config, unreadable evidence, ...).
pub fn runtime_error_report(message: &str, profile: &str) -> ReportEnvelope {
    let now = OffsetDateTime::now_utc();

    ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        run: RunMeta {
            started_at: now,
            ended_at: Some(now),
            duration_ms: Some(0),
        },
        verdict: Verdict {
            status: VerdictStatus::Fail,
            counts: VerdictCounts::default(),
            reasons: vec![ids::REASON_TOOL_ERROR.to_string()],
        },
        audit: None,
        report: None,
        error: Some(message.to_string()),
        data: AuditData {
            profile: profile.to_string(),
            ..AuditData::default()
        },
    }
}

pub fn to_renderable(report: &ReportEnvelope) -> RenderableReport {
    let audit = report.audit.as_ref().map(|record| {
        let recommendations = report
            .report
            .as_ref()
            .map(|r| {
                r.recommendations
                    .iter()
                    .map(|rec| RenderableRecommendation {
                        code: rec.code.clone(),
                        action: rec.action.clone(),
                        priority: rec.priority.as_str().to_string(),
                        deadline: format_date(rec.deadline),
                    })
                    .collect()
            })
            .unwrap_or_default();

        RenderableAudit {
            department: record.department.clone(),
            audit_date: format_date(record.audit_date),
            score: record.compliance_score.to_string(),
            compliant: report.verdict.counts.compliant,
            non_compliant: report.verdict.counts.non_compliant,
            findings: record
                .findings
                .iter()
                .map(|f| RenderableFinding {
                    regulator: f.regulator.to_string(),
                    code: f.code.clone(),
                    description: f.description.clone(),
                    compliant: f.status.is_compliant(),
                })
                .collect(),
            recommendations,
            next_audit_date: report
                .report
                .as_ref()
                .map(|r| format_date(r.next_audit_date))
                .unwrap_or_else(|| "-".to_string()),
        }
    });

    RenderableReport {
        verdict: match report.verdict.status {
            VerdictStatus::Pass => RenderableVerdictStatus::Pass,
            VerdictStatus::Fail => RenderableVerdictStatus::Fail,
            VerdictStatus::Skip => RenderableVerdictStatus::Skip,
        },
        reasons: report.verdict.reasons.clone(),
        error: report.error.clone(),
        audit,
    }
}

fn format_date(at: OffsetDateTime) -> String {
    at.format(&Rfc3339).unwrap_or_else(|_| at.to_string())
}
