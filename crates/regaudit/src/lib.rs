//! Library entry point for regaudit.
//!
//! ```
//! use regaudit::{RegulationCatalog, ReportPolicy, SampledEvaluator, build_report, run_audit};
//!
//! let catalog = RegulationCatalog::standard();
//! let record = run_audit(
//!     &catalog,
//!     &SampledEvaluator::default(),
//!     "chemistry",
//!     time::OffsetDateTime::UNIX_EPOCH,
//! );
//! let report = build_report(&record, &ReportPolicy::default());
//! assert_eq!(record.findings.len(), catalog.requirement_count());
//! assert_eq!(report.recommendations.len(), report.critical_findings.len());
//! ```

#![forbid(unsafe_code)]

pub use regaudit_catalog::{CatalogBuilder, CatalogError, RegulationCatalog, Requirement};
pub use regaudit_domain::policy::{EffectiveConfig, EvaluatorKind, RegulatorPolicy};
pub use regaudit_domain::{
    CRITICAL_DEADLINE_DAYS, ComplianceEvaluator, DomainReport, NEXT_AUDIT_INTERVAL_DAYS,
    ReportPolicy, SampledEvaluator, build_report, evaluate, run_audit,
};
pub use regaudit_evidence::{EvidenceError, EvidenceIndex};
pub use regaudit_types::{
    AuditFinding, AuditRecord, ComplianceReport, ComplianceScore, ComplianceStatus, Priority,
    Recommendation, Regulator, Verdict, VerdictStatus,
};

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn closure_evaluator_through_facade() {
        let catalog = CatalogBuilder::new()
            .requirement(Regulator::Cap, "A.1", "first")
            .requirement(Regulator::Clia, "B.1", "second")
            .build()
            .expect("catalog");
        let at = datetime!(2026-01-15 09:00:00 UTC);

        let record = run_audit(
            &catalog,
            &|_: &str, code: &str| ComplianceStatus::from_bool(code != "B.1"),
            "chemistry",
            at,
        );
        assert_eq!(record.compliance_score.to_string(), "50.00%");

        let report = build_report(&record, &ReportPolicy::default());
        assert_eq!(report.recommendations.len(), 1);
        assert_eq!(report.recommendations[0].priority, Priority::High);
        assert_eq!(
            report.recommendations[0].deadline,
            datetime!(2026-02-14 09:00:00 UTC)
        );
        assert_eq!(report.next_audit_date, datetime!(2026-04-15 09:00:00 UTC));
    }

    #[test]
    fn evaluate_gives_verdict() {
        let out = evaluate(
            &RegulationCatalog::empty(),
            &SampledEvaluator::default(),
            "chemistry",
            &EffectiveConfig::default(),
            datetime!(2026-01-15 09:00:00 UTC),
        );
        assert_eq!(out.verdict.status, VerdictStatus::Skip);
        assert_eq!(out.record.compliance_score, ComplianceScore::NotApplicable);
    }
}
