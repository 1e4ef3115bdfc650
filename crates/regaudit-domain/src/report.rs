use regaudit_types::{AuditRecord, ComplianceReport, Priority, Recommendation};
use time::Duration;

/// Days after the audit date by which a critical finding must be addressed.
pub const CRITICAL_DEADLINE_DAYS: u32 = 30;

/// Days after the audit date until the next scheduled audit.
pub const NEXT_AUDIT_INTERVAL_DAYS: u32 = 90;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReportPolicy {
    pub critical_deadline_days: u32,
    pub next_audit_interval_days: u32,
}

impl Default for ReportPolicy {
    fn default() -> Self {
        Self {
            critical_deadline_days: CRITICAL_DEADLINE_DAYS,
            next_audit_interval_days: NEXT_AUDIT_INTERVAL_DAYS,
        }
    }
}

/// Remediation text recommended for a non-compliant requirement.
pub fn remediation_action(description: &str) -> String {
    format!("Address {description} immediately")
}

/// Derive the compliance report for a completed audit.
///
/// All dates are offsets from `record.audit_date`, so the result depends only on
/// the record and the policy.
pub fn build_report(record: &AuditRecord, policy: &ReportPolicy) -> ComplianceReport {
    let deadline = record
        .audit_date
        .saturating_add(Duration::days(i64::from(policy.critical_deadline_days)));
    let next_audit_date = record
        .audit_date
        .saturating_add(Duration::days(i64::from(policy.next_audit_interval_days)));

    let critical_findings: Vec<_> = record.critical_findings().cloned().collect();

    let recommendations = critical_findings
        .iter()
        .map(|finding| Recommendation {
            code: finding.code.clone(),
            action: remediation_action(&finding.description),
            priority: Priority::High,
            deadline,
        })
        .collect();

    ComplianceReport {
        executive_summary: format!("Compliance Score: {}", record.compliance_score),
        critical_findings,
        recommendations,
        next_audit_date,
    }
}
