//! Explain registry for regulators.
//!
//! Maps each regulator to a human-readable explanation with remediation guidance.
//! Requirement-level text lives in the catalog; this registry covers the body itself.

use crate::Regulator;

/// Explanation entry for a regulator.
#[derive(Debug, Clone)]
pub struct RegulatorExplanation {
    /// Full name of the standards body.
    pub title: &'static str,
    /// What the body accredits or enforces.
    pub description: &'static str,
    /// How findings against this body are usually remediated.
    pub remediation: &'static str,
}

/// Look up the explanation for a regulator.
pub fn lookup_regulator(regulator: Regulator) -> RegulatorExplanation {
    match regulator {
        Regulator::Cap => explain_cap(),
        Regulator::Clia => explain_clia(),
        Regulator::Jcaho => explain_jcaho(),
    }
}

fn explain_cap() -> RegulatorExplanation {
    RegulatorExplanation {
        title: "College of American Pathologists (CAP)",
        description: "\
CAP accredits clinical laboratories through checklist-based inspections.
Requirements are grouped by discipline checklist (GEN = laboratory general,
CHM = chemistry and toxicology) and inspected on a two-year cycle.",
        remediation: "\
Document the corrective action against the checklist item, attach the
supporting records (policies, logs, proficiency testing results) and have the
laboratory director sign off before the next self-inspection.",
    }
}

fn explain_clia() -> RegulatorExplanation {
    RegulatorExplanation {
        title: "Clinical Laboratory Improvement Amendments (CLIA)",
        description: "\
CLIA sets federal quality standards for all laboratory testing performed on
human specimens. Requirements are sections of 42 CFR Part 493 and are enforced
through CMS surveys.",
        remediation: "\
Prepare a plan of correction referencing the 42 CFR 493 section, update the
affected procedure or control records, and retain evidence that the corrected
process has been followed since the fix.",
    }
}

fn explain_jcaho() -> RegulatorExplanation {
    RegulatorExplanation {
        title: "The Joint Commission (JCAHO)",
        description: "\
The Joint Commission accredits health care organizations. Standards are
organized by chapter (LD = leadership, IC = infection prevention and control)
and each carries elements of performance that surveyors verify on site.",
        remediation: "\
Submit evidence of standards compliance for each element of performance that
was not met, including the measure of success that will demonstrate sustained
compliance.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_regulator_has_an_explanation() {
        for regulator in Regulator::ALL {
            let exp = lookup_regulator(regulator);
            assert!(exp.title.contains(regulator.as_str()));
            assert!(!exp.description.is_empty());
            assert!(!exp.remediation.is_empty());
        }
    }
}
