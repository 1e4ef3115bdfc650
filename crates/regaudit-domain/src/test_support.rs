use crate::evaluator::ComplianceEvaluator;
use regaudit_catalog::{CatalogBuilder, RegulationCatalog};
use regaudit_types::{ComplianceStatus, Regulator};
use std::collections::BTreeSet;
use time::OffsetDateTime;
use time::macros::datetime;

pub fn audit_time() -> OffsetDateTime {
    datetime!(2026-03-02 14:00:00 UTC)
}

/// CAP R.1, CAP R.2, JCAHO R.3.
pub fn three_requirement_catalog() -> RegulationCatalog {
    CatalogBuilder::new()
        .requirement(Regulator::Cap, "R.1", "requirement one")
        .requirement(Regulator::Cap, "R.2", "requirement two")
        .requirement(Regulator::Jcaho, "R.3", "requirement three")
        .build()
        .expect("valid test catalog")
}

/// Compliant for every code except the listed ones.
pub fn fixed_evaluator(non_compliant: &[&str]) -> impl ComplianceEvaluator + use<> {
    let failing: BTreeSet<String> = non_compliant.iter().map(|c| c.to_string()).collect();
    move |_department: &str, code: &str| ComplianceStatus::from_bool(!failing.contains(code))
}
