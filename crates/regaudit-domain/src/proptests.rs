//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - finding count and order versus the catalog
//! - score arithmetic and formatting
//! - critical findings / recommendations correspondence
//! - report date offsets and determinism

use crate::evaluator::SampledEvaluator;
use crate::report::{ReportPolicy, build_report};
use crate::runner::run_audit;
use crate::test_support::{audit_time, fixed_evaluator};
use proptest::prelude::*;
use regaudit_catalog::{CatalogBuilder, RegulationCatalog};
use regaudit_types::{ComplianceStatus, Regulator};
use std::collections::BTreeSet;
use time::Duration;

// ============================================================================
// Strategies
// ============================================================================

fn arb_regulator() -> impl Strategy<Value = Regulator> {
    prop_oneof![
        Just(Regulator::Cap),
        Just(Regulator::Clia),
        Just(Regulator::Jcaho),
    ]
}

fn arb_code() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Z]{2,3}\\.[0-9]{1,5}").unwrap()
}

/// Catalog entries with `(regulator, code)` duplicates removed, plus a flag per
/// entry saying whether it should evaluate non-compliant.
fn arb_entries() -> impl Strategy<Value = Vec<(Regulator, String, bool)>> {
    prop::collection::vec((arb_regulator(), arb_code(), any::<bool>()), 0..40).prop_map(
        |entries| {
            let mut seen = BTreeSet::new();
            entries
                .into_iter()
                .filter(|(r, c, _)| seen.insert((*r, c.clone())))
                .collect()
        },
    )
}

fn catalog_from(entries: &[(Regulator, String, bool)]) -> RegulationCatalog {
    entries
        .iter()
        .fold(CatalogBuilder::new(), |b, (r, code, _)| {
            b.requirement(*r, code.clone(), format!("description of {code}"))
        })
        .build()
        .expect("deduplicated entries form a valid catalog")
}

/// Codes marked failing. A code shared across regulators fails everywhere if
/// any entry marks it, which matches an evaluator keyed by code.
fn failing_codes(entries: &[(Regulator, String, bool)]) -> Vec<String> {
    entries
        .iter()
        .filter(|(_, _, fail)| *fail)
        .map(|(_, c, _)| c.clone())
        .collect()
}

proptest! {
    #[test]
    fn score_rounding_holds_for_any_counts(compliant in 0usize..5_000, extra in 0usize..5_000) {
        let total = compliant + extra;
        let score = regaudit_types::ComplianceScore::from_counts(compliant, total);
        match score.hundredths() {
            None => prop_assert_eq!(total, 0),
            Some(h) => {
                let (h, c, t) = (i128::from(h), compliant as i128, total as i128);
                prop_assert!((2 * h - 1) * t <= 2 * c * 10_000);
                prop_assert!(2 * c * 10_000 < (2 * h + 1) * t);
            }
        }
    }

    #[test]
    fn findings_cover_every_requirement_in_order(
        entries in arb_entries(),
        department in ".{0,24}",
    ) {
        let catalog = catalog_from(&entries);
        let record = run_audit(&catalog, &fixed_evaluator(&[]), &department, audit_time());

        prop_assert_eq!(record.findings.len(), catalog.requirement_count());
        for (finding, req) in record.findings.iter().zip(catalog.requirements()) {
            prop_assert_eq!(finding.regulator, req.regulator);
            prop_assert_eq!(&finding.code, &req.code);
            prop_assert_eq!(&finding.description, &req.description);
        }
    }

    #[test]
    fn score_matches_formula(entries in arb_entries()) {
        let catalog = catalog_from(&entries);
        let failing = failing_codes(&entries);
        let failing_refs: Vec<&str> = failing.iter().map(String::as_str).collect();
        let record = run_audit(&catalog, &fixed_evaluator(&failing_refs), "lab", audit_time());

        let total = record.findings.len();
        let compliant = record
            .findings
            .iter()
            .filter(|f| f.status == ComplianceStatus::Compliant)
            .count();

        let text = record.compliance_score.to_string();
        if total == 0 {
            prop_assert_eq!(text, "N/A");
        } else {
            // h is the nearest hundredth, ties up:
            // (2h - 1) * total <= 2 * compliant * 10_000 < (2h + 1) * total
            let (whole, frac) = text
                .strip_suffix('%')
                .and_then(|n| n.split_once('.'))
                .expect("score has the form W.FF%");
            prop_assert_eq!(frac.len(), 2);
            let h = i128::from(whole.parse::<u32>().expect("whole")) * 100
                + i128::from(frac.parse::<u32>().expect("fraction"));
            let scaled = 2 * compliant as i128 * 10_000;
            let total = total as i128;
            prop_assert!((2 * h - 1) * total <= scaled, "{} rounds too high", text);
            prop_assert!(scaled < (2 * h + 1) * total, "{} rounds too low", text);
        }
    }

    #[test]
    fn critical_findings_are_the_non_compliant_subsequence(entries in arb_entries()) {
        let catalog = catalog_from(&entries);
        let failing = failing_codes(&entries);
        let failing_refs: Vec<&str> = failing.iter().map(String::as_str).collect();
        let record = run_audit(&catalog, &fixed_evaluator(&failing_refs), "lab", audit_time());
        let report = build_report(&record, &ReportPolicy::default());

        let expected: Vec<_> = record
            .findings
            .iter()
            .filter(|f| f.status == ComplianceStatus::NonCompliant)
            .cloned()
            .collect();
        prop_assert_eq!(&report.critical_findings, &expected);
        prop_assert_eq!(report.recommendations.len(), report.critical_findings.len());
        for (rec, finding) in report.recommendations.iter().zip(&report.critical_findings) {
            prop_assert_eq!(&rec.code, &finding.code);
        }
    }

    #[test]
    fn report_dates_are_fixed_offsets(
        entries in arb_entries(),
        deadline_days in 0u32..400,
        interval_days in 0u32..800,
    ) {
        let catalog = catalog_from(&entries);
        let record = run_audit(&catalog, &SampledEvaluator::default(), "lab", audit_time());
        let policy = ReportPolicy {
            critical_deadline_days: deadline_days,
            next_audit_interval_days: interval_days,
        };
        let report = build_report(&record, &policy);

        let at = record.audit_date;
        for rec in &report.recommendations {
            prop_assert_eq!(rec.deadline, at + Duration::days(i64::from(deadline_days)));
        }
        prop_assert_eq!(report.next_audit_date, at + Duration::days(i64::from(interval_days)));
    }

    #[test]
    fn sampled_audits_are_reproducible(entries in arb_entries(), department in "[a-z ]{1,16}") {
        let catalog = catalog_from(&entries);
        let eval = SampledEvaluator::default();
        let a = run_audit(&catalog, &eval, &department, audit_time());
        let b = run_audit(&catalog, &eval, &department, audit_time());
        prop_assert_eq!(&a, &b);

        let policy = ReportPolicy::default();
        prop_assert_eq!(build_report(&a, &policy), build_report(&a, &policy));
    }
}
