use crate::{RenderableAudit, RenderableReport, RenderableVerdictStatus};

pub fn render_markdown(reports: &[RenderableReport]) -> String {
    let mut out = String::new();

    out.push_str("# Compliance audit report\n\n");

    if reports.is_empty() {
        out.push_str("No audits.\n");
        return out;
    }

    for (idx, report) in reports.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        render_one(&mut out, report);
    }

    out
}

fn render_one(out: &mut String, report: &RenderableReport) {
    let verdict = match report.verdict {
        RenderableVerdictStatus::Pass => "PASS",
        RenderableVerdictStatus::Fail => "FAIL",
        RenderableVerdictStatus::Skip => "SKIP",
    };

    let Some(audit) = &report.audit else {
        out.push_str("## Run error\n\n");
        out.push_str(&format!("- Verdict: **{verdict}**\n"));
        if let Some(err) = &report.error {
            out.push_str(&format!("\n> Error: {err}\n"));
        }
        return;
    };

    out.push_str(&format!("## Department: {}\n\n", audit.department));
    if report.reasons.is_empty() {
        out.push_str(&format!("- Verdict: **{verdict}**\n"));
    } else {
        out.push_str(&format!(
            "- Verdict: **{verdict}** ({})\n",
            report.reasons.join(", ")
        ));
    }
    out.push_str(&format!(
        "- Compliance Score: {}\n- Requirements: {} compliant / {} non-compliant\n- Audit date: {}\n- Next audit: {}\n\n",
        audit.score, audit.compliant, audit.non_compliant, audit.audit_date, audit.next_audit_date
    ));

    if audit.findings.is_empty() {
        out.push_str("No requirements evaluated.\n");
        return;
    }

    render_findings(out, audit);
    render_recommendations(out, audit);
}

fn render_findings(out: &mut String, audit: &RenderableAudit) {
    out.push_str("### Findings\n\n");
    out.push_str("| Regulator | Code | Description | Status |\n");
    out.push_str("|---|---|---|---|\n");
    for f in &audit.findings {
        let status = if f.compliant {
            "COMPLIANT"
        } else {
            "**NON_COMPLIANT**"
        };
        out.push_str(&format!(
            "| {} | `{}` | {} | {} |\n",
            f.regulator,
            f.code,
            escape_cell(&f.description),
            status
        ));
    }
    out.push('\n');
}

fn render_recommendations(out: &mut String, audit: &RenderableAudit) {
    if audit.recommendations.is_empty() {
        out.push_str("No critical findings.\n");
        return;
    }

    out.push_str("### Recommendations\n\n");
    for r in &audit.recommendations {
        out.push_str(&format!(
            "- [{}] `{}` {} (due {})\n",
            r.priority, r.code, r.action, r.deadline
        ));
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
