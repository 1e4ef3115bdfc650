use crate::model::{RegulationCatalog, RegulatorSection, Requirement};
use regaudit_types::Regulator;

const CAP: &[(&str, &str)] = &[
    ("GEN.20316", "Document retention - 2 years"),
    ("GEN.20348", "Proficiency testing enrollment"),
    ("CHM.13250", "QC frequency requirements"),
];

const CLIA: &[(&str, &str)] = &[
    ("493.1251", "Standard: Procedure manual"),
    ("493.1256", "Standard: Control procedures"),
    ("493.1281", "Standard: Patient test management"),
];

const JCAHO: &[(&str, &str)] = &[
    ("LD.04.03.09", "Safety compliance"),
    ("IC.02.02.01", "Infection control program"),
];

impl RegulationCatalog {
    /// The compiled-in catalog: CAP, CLIA, then JCAHO.
    pub fn standard() -> Self {
        let sections = [
            (Regulator::Cap, CAP),
            (Regulator::Clia, CLIA),
            (Regulator::Jcaho, JCAHO),
        ]
        .into_iter()
        .map(|(regulator, entries)| RegulatorSection {
            regulator,
            requirements: entries
                .iter()
                .map(|(code, description)| Requirement {
                    regulator,
                    code: (*code).to_string(),
                    description: (*description).to_string(),
                })
                .collect(),
        })
        .collect();

        RegulationCatalog { sections }
    }
}
