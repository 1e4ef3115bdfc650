//! Use case orchestration for regaudit.
//!
//! This crate provides the application layer: use cases that coordinate the settings, evidence,
//! domain, and render layers. It is intentionally thin and delegates heavy lifting to the
//! appropriate layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod audit;
mod catalog;
mod explain;
mod render;
mod report;

pub use audit::{AuditInput, AuditOutput, exit_code, run_audit, verdict_exit_code};
pub use catalog::{format_catalog, run_catalog};
pub use explain::{
    ExplainOutput, RequirementExplanation, format_ambiguous, format_explanation,
    format_not_found, format_regulator, run_explain,
};
pub use render::run_markdown;
pub use report::{parse_report_json, runtime_error_report, serialize_reports, to_renderable};
