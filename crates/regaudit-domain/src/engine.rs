use crate::evaluator::ComplianceEvaluator;
use crate::policy::EffectiveConfig;
use crate::report::build_report;
use crate::runner::run_audit;
use crate::scope::select_catalog;
use regaudit_catalog::RegulationCatalog;
use regaudit_types::{
    AuditData, AuditRecord, ComplianceReport, Verdict, VerdictCounts, VerdictStatus, ids,
};
use time::OffsetDateTime;

#[derive(Clone, Debug)]
pub struct DomainReport {
    pub verdict: Verdict,
    pub record: AuditRecord,
    pub report: ComplianceReport,
    pub data: AuditData,
}

/// Select, audit, report and judge one department.
pub fn evaluate<E>(
    catalog: &RegulationCatalog,
    evaluator: &E,
    department: &str,
    cfg: &EffectiveConfig,
    audit_date: OffsetDateTime,
) -> DomainReport
where
    E: ComplianceEvaluator + ?Sized,
{
    let selected = select_catalog(catalog, cfg);
    let record = run_audit(&selected, evaluator, department, audit_date);
    let report = build_report(&record, &cfg.report);
    let verdict = compute_verdict(&record, cfg.fail_under);

    let data = AuditData {
        profile: cfg.profile.clone(),
        evaluator: cfg.evaluator.as_str().to_string(),
        regulators_evaluated: selected.regulators().map(|r| r.to_string()).collect(),
        requirements_evaluated: record.findings.len() as u32,
        fail_under: cfg.fail_under,
    };

    DomainReport {
        verdict,
        record,
        report,
        data,
    }
}

fn compute_verdict(record: &AuditRecord, fail_under: Option<f64>) -> Verdict {
    let counts = VerdictCounts {
        compliant: record.compliant_count() as u32,
        non_compliant: record.non_compliant_count() as u32,
    };

    let Some(score) = record.compliance_score.hundredths() else {
        return Verdict {
            status: VerdictStatus::Skip,
            counts,
            reasons: vec![ids::REASON_NO_REQUIREMENTS.to_string()],
        };
    };

    match fail_under {
        Some(threshold) if score < threshold_hundredths(threshold) => Verdict {
            status: VerdictStatus::Fail,
            counts,
            reasons: vec![ids::REASON_BELOW_THRESHOLD.to_string()],
        },
        _ => Verdict {
            status: VerdictStatus::Pass,
            counts,
            reasons: Vec::new(),
        },
    }
}

/// Thresholds compare at the score's own two-decimal precision.
fn threshold_hundredths(threshold: f64) -> u32 {
    (threshold * 100.0).round().clamp(0.0, 10_000.0) as u32
}
