//! Stable DTOs and IDs used across the regaudit workspace.
//!
//! This crate is intentionally boring:
//! - data types for audit records, compliance reports and the emitted envelope
//! - stable string IDs (schemas, verdict reasons)
//! - the regulator enumeration
//! - explain registry for regulator-level remediation guidance

#![forbid(unsafe_code)]

pub mod audit;
pub mod explain;
pub mod ids;
pub mod receipt;
pub mod regulator;

pub use audit::{
    AuditFinding, AuditRecord, ComplianceReport, ComplianceScore, ComplianceStatus,
    ParseScoreError, Priority, Recommendation,
};
pub use explain::{RegulatorExplanation, lookup_regulator};
pub use receipt::{
    AuditData, ReportEnvelope, RunMeta, SCHEMA_REPORT_V1, ToolMeta, Verdict, VerdictCounts,
    VerdictStatus,
};
pub use regulator::{Regulator, UnknownRegulator};
