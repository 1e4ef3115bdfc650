//! The `audit` use case: resolve config, load evidence, audit each department, produce reports.

use anyhow::Context;
use rayon::prelude::*;
use regaudit_catalog::RegulationCatalog;
use regaudit_domain::policy::EvaluatorKind;
use regaudit_domain::{ComplianceEvaluator, DomainReport, SampledEvaluator};
use regaudit_evidence::EvidenceIndex;
use regaudit_settings::{Overrides, ResolvedConfig};
use regaudit_types::{ReportEnvelope, RunMeta, SCHEMA_REPORT_V1, VerdictStatus};
use time::OffsetDateTime;

use crate::report::tool_meta;

/// Input for the audit use case.
#[derive(Clone, Debug)]
pub struct AuditInput<'a> {
    /// Departments to audit, in output order.
    pub departments: &'a [String],
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// Evidence file contents, if one was supplied.
    pub evidence_text: Option<&'a str>,
    /// CLI overrides.
    pub overrides: Overrides,
}

/// Output from the audit use case.
#[derive(Clone, Debug)]
pub struct AuditOutput {
    /// One envelope per requested department, in request order.
    pub reports: Vec<ReportEnvelope>,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
}

/// Run the audit use case against the compiled-in catalog.
pub fn run_audit(input: AuditInput<'_>) -> anyhow::Result<AuditOutput> {
    run_audit_with_catalog(input, &RegulationCatalog::standard())
}

pub(crate) fn run_audit_with_catalog(
    input: AuditInput<'_>,
    catalog: &RegulationCatalog,
) -> anyhow::Result<AuditOutput> {
    let started_at = OffsetDateTime::now_utc();

    if input.departments.is_empty() {
        anyhow::bail!("at least one department is required");
    }
    if let Some(blank) = input.departments.iter().find(|d| d.trim().is_empty()) {
        anyhow::bail!("department name must not be blank: {blank:?}");
    }

    // Parse config (empty is allowed, defaults apply).
    let cfg = if input.config_text.trim().is_empty() {
        regaudit_settings::RegauditConfigV1::default()
    } else {
        regaudit_settings::parse_config_toml(input.config_text).context("parse config")?
    };

    let resolved = regaudit_settings::resolve_config(cfg, input.overrides.clone())
        .context("resolve config")?;

    let evaluator = build_evaluator(
        resolved.effective.evaluator,
        input.evidence_text,
        input.departments,
    )?;

    tracing::info!(
        departments = input.departments.len(),
        profile = %resolved.effective.profile,
        evaluator = resolved.effective.evaluator.as_str(),
        "starting audit"
    );

    // One timestamp for the whole run: every department shares the audit date.
    let audit_date = started_at;
    let domain_reports: Vec<DomainReport> = input
        .departments
        .par_iter()
        .map(|department| {
            regaudit_domain::evaluate(
                catalog,
                &*evaluator,
                department,
                &resolved.effective,
                audit_date,
            )
        })
        .collect();

    let finished_at = OffsetDateTime::now_utc();
    let duration_ms = (finished_at - started_at).whole_milliseconds().max(0) as u64;

    let reports = domain_reports
        .into_iter()
        .map(|domain| {
            let DomainReport {
                verdict,
                record,
                report,
                data,
            } = domain;

            tracing::info!(
                department = %record.department,
                score = %record.compliance_score,
                critical = report.critical_findings.len(),
                verdict = ?verdict.status,
                "audit finished"
            );

            ReportEnvelope {
                schema: SCHEMA_REPORT_V1.to_string(),
                tool: tool_meta(),
                run: RunMeta {
                    started_at,
                    ended_at: Some(finished_at),
                    duration_ms: Some(duration_ms),
                },
                verdict,
                audit: Some(record),
                report: Some(report),
                error: None,
                data,
            }
        })
        .collect();

    Ok(AuditOutput {
        reports,
        resolved_config: resolved,
    })
}

fn build_evaluator(
    kind: EvaluatorKind,
    evidence_text: Option<&str>,
    departments: &[String],
) -> anyhow::Result<Box<dyn ComplianceEvaluator>> {
    match kind {
        EvaluatorKind::Evidence => {
            let index = match evidence_text {
                Some(text) => EvidenceIndex::parse(text).context("parse evidence")?,
                None => {
                    tracing::warn!(
                        "no evidence supplied; every requirement will be reported non-compliant"
                    );
                    EvidenceIndex::default()
                }
            };
            tracing::debug!(
                records = index.len(),
                departments = index.departments().count(),
                "loaded evidence"
            );
            if evidence_text.is_some() {
                for department in departments_without_evidence(&index, departments) {
                    tracing::warn!(
                        department,
                        "no evidence records for department; every requirement will be reported non-compliant"
                    );
                }
            }
            Ok(Box::new(index))
        }
        EvaluatorKind::Sampled { rate } => {
            if evidence_text.is_some() {
                tracing::warn!("evidence file ignored by the sampled evaluator");
            }
            tracing::warn!(rate, "sampled evaluator produces synthetic verdicts");
            Ok(Box::new(SampledEvaluator::new(rate)))
        }
    }
}

/// Requested departments with no record in the evidence file. Names match exactly.
fn departments_without_evidence<'a>(
    index: &EvidenceIndex,
    departments: &'a [String],
) -> Vec<&'a str> {
    departments
        .iter()
        .map(String::as_str)
        .filter(|d| !index.departments().any(|known| known == *d))
        .collect()
}

/// Map verdict to exit code: 0 = pass/skip, 2 = fail.
pub fn verdict_exit_code(status: VerdictStatus) -> i32 {
    match status {
        VerdictStatus::Pass => 0,
        VerdictStatus::Skip => 0,
        VerdictStatus::Fail => 2,
    }
}

/// Worst exit code across a multi-department run.
pub fn exit_code(reports: &[ReportEnvelope]) -> i32 {
    reports
        .iter()
        .map(|r| verdict_exit_code(r.verdict.status))
        .max()
        .unwrap_or(0)
}
