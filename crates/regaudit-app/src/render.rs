//! Render use case: markdown from in-memory reports.

use regaudit_types::ReportEnvelope;

use crate::report::to_renderable;

pub fn run_markdown(reports: &[ReportEnvelope]) -> String {
    let renderable: Vec<_> = reports.iter().map(to_renderable).collect();
    regaudit_render::render_markdown(&renderable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AuditInput, run_audit, runtime_error_report};
    use regaudit_settings::Overrides;

    #[test]
    fn markdown_for_audit_and_error() {
        let departments = vec!["chemistry".to_string()];
        let mut reports = run_audit(AuditInput {
            departments: &departments,
            config_text: "",
            evidence_text: None,
            overrides: Overrides::default(),
        })
        .expect("run_audit")
        .reports;
        reports.push(runtime_error_report("boom", "standard"));

        let markdown = run_markdown(&reports);
        assert!(markdown.contains("## Department: chemistry"));
        assert!(markdown.contains("Compliance Score: 0.00%"));
        assert!(markdown.contains("- [HIGH] `GEN.20316` Address Document retention - 2 years immediately"));
        assert!(markdown.contains("> Error: boom"));
    }
}
