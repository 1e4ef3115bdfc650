//! Fuzz target for the audit engine with arbitrary catalogs and evaluator output.
//!
//! Checks the engine invariants hold for any input:
//! - one finding per requirement, in catalog order
//! - one recommendation per critical finding
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_audit
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use regaudit_catalog::CatalogBuilder;
use regaudit_domain::{ReportPolicy, SampledEvaluator, build_report, run_audit};

#[derive(Debug, Arbitrary)]
struct AuditInput {
    department: String,
    codes: Vec<(u8, String)>,
    rate: f64,
    critical_deadline_days: u16,
    next_audit_interval_days: u16,
    audit_seconds: i32,
}

fuzz_target!(|input: AuditInput| {
    let regulators = regaudit_types::Regulator::ALL;
    let builder = input
        .codes
        .iter()
        .fold(CatalogBuilder::new(), |b, (r, code)| {
            b.requirement(regulators[usize::from(*r) % regulators.len()], code.clone(), "fuzz")
        });
    let Ok(catalog) = builder.build() else {
        return;
    };

    let audit_date = time::OffsetDateTime::UNIX_EPOCH
        + time::Duration::seconds(i64::from(input.audit_seconds));
    let record = run_audit(
        &catalog,
        &SampledEvaluator::new(input.rate),
        &input.department,
        audit_date,
    );
    assert_eq!(record.findings.len(), catalog.requirement_count());

    let report = build_report(
        &record,
        &ReportPolicy {
            critical_deadline_days: u32::from(input.critical_deadline_days),
            next_audit_interval_days: u32::from(input.next_audit_interval_days),
        },
    );
    assert_eq!(report.recommendations.len(), report.critical_findings.len());
});
