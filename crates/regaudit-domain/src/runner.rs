use crate::evaluator::ComplianceEvaluator;
use regaudit_catalog::RegulationCatalog;
use regaudit_types::{AuditFinding, AuditRecord, ComplianceScore};
use time::OffsetDateTime;

/// Audit one department against every requirement in `catalog`.
///
/// Regulators are visited in catalog order and requirements in section order, so
/// `findings` mirrors [`RegulationCatalog::requirements`]. One timestamp covers the
/// whole audit: every finding's `checked_at` equals the record's `audit_date`.
///
/// The department identifier is taken as-is; it is not validated.
pub fn run_audit<E>(
    catalog: &RegulationCatalog,
    evaluator: &E,
    department: &str,
    audit_date: OffsetDateTime,
) -> AuditRecord
where
    E: ComplianceEvaluator + ?Sized,
{
    let findings: Vec<AuditFinding> = catalog
        .requirements()
        .map(|req| AuditFinding {
            regulator: req.regulator,
            code: req.code.clone(),
            description: req.description.clone(),
            status: evaluator.evaluate(department, &req.code),
            checked_at: audit_date,
        })
        .collect();

    let compliant = findings.iter().filter(|f| f.status.is_compliant()).count();
    let compliance_score = ComplianceScore::from_counts(compliant, findings.len());

    AuditRecord {
        department: department.to_string(),
        audit_date,
        findings,
        compliance_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{audit_time, fixed_evaluator, three_requirement_catalog};
    use regaudit_types::{ComplianceStatus, Regulator};

    #[test]
    fn two_of_three_compliant_scores_66_67() {
        let catalog = three_requirement_catalog();
        let eval = fixed_evaluator(&["R.3"]);
        let record = run_audit(&catalog, &eval, "chemistry", audit_time());

        assert_eq!(record.findings.len(), 3);
        assert_eq!(record.compliance_score.to_string(), "66.67%");
        assert_eq!(record.compliant_count(), 2);
        assert_eq!(record.non_compliant_count(), 1);
    }

    #[test]
    fn findings_follow_catalog_order_and_share_timestamp() {
        let catalog = RegulationCatalog::standard();
        let at = audit_time();
        let record = run_audit(&catalog, &fixed_evaluator(&[]), "hematology", at);

        let expected: Vec<(Regulator, String)> = catalog
            .requirements()
            .map(|r| (r.regulator, r.code.clone()))
            .collect();
        let actual: Vec<(Regulator, String)> = record
            .findings
            .iter()
            .map(|f| (f.regulator, f.code.clone()))
            .collect();
        assert_eq!(actual, expected);
        assert!(record.findings.iter().all(|f| f.checked_at == at));
        assert_eq!(record.audit_date, at);
        assert_eq!(record.department, "hematology");
    }

    #[test]
    fn empty_catalog_scores_not_applicable() {
        let record = run_audit(
            &RegulationCatalog::empty(),
            &fixed_evaluator(&[]),
            "microbiology",
            audit_time(),
        );
        assert!(record.findings.is_empty());
        assert_eq!(record.compliance_score, ComplianceScore::NotApplicable);
        assert_eq!(record.compliance_score.to_string(), "N/A");
    }

    #[test]
    fn evaluator_sees_department_and_code() {
        let catalog = three_requirement_catalog();
        let eval = |department: &str, code: &str| {
            ComplianceStatus::from_bool(department == "blood bank" && code != "R.1")
        };
        let record = run_audit(&catalog, &eval, "blood bank", audit_time());
        let statuses: Vec<ComplianceStatus> = record.findings.iter().map(|f| f.status).collect();
        assert_eq!(
            statuses,
            vec![
                ComplianceStatus::NonCompliant,
                ComplianceStatus::Compliant,
                ComplianceStatus::Compliant,
            ]
        );
    }

    #[test]
    fn accepts_arbitrary_department_identifiers() {
        let catalog = three_requirement_catalog();
        let eval = fixed_evaluator(&[]);
        for dept in ["", "  ", "Lab #7 / Night shift", "微生物"] {
            let record = run_audit(&catalog, &eval, dept, audit_time());
            assert_eq!(record.department, dept);
            assert_eq!(record.findings.len(), 3);
        }
    }
}
