//! Pure audit evaluation (no IO).
//!
//! Input: a regulation catalog, an evaluator, a department and the audit timestamp.
//! Output: audit record + compliance report + verdict.

#![forbid(unsafe_code)]

pub mod evaluator;
pub mod policy;
pub mod report;
pub mod runner;
pub mod scope;

mod engine;

#[cfg(test)]
mod proptests;
#[cfg(test)]
mod test_support;

pub use engine::{DomainReport, evaluate};
pub use evaluator::{ComplianceEvaluator, SampledEvaluator};
pub use report::{
    CRITICAL_DEADLINE_DAYS, NEXT_AUDIT_INTERVAL_DAYS, ReportPolicy, build_report, remediation_action,
};
pub use runner::run_audit;
