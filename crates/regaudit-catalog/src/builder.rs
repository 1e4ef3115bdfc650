use crate::model::{RegulationCatalog, RegulatorSection, Requirement};
use regaudit_types::Regulator;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate requirement code {code} for regulator {regulator}")]
    DuplicateCode { regulator: Regulator, code: String },

    #[error("requirement code must not be empty (regulator {0})")]
    EmptyCode(Regulator),
}

/// Collects requirements and validates catalog invariants on [`CatalogBuilder::build`].
///
/// Regulator order is first-seen order; requirement order is insertion order.
#[derive(Clone, Debug, Default)]
pub struct CatalogBuilder {
    entries: Vec<Requirement>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requirement(
        mut self,
        regulator: Regulator,
        code: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.entries.push(Requirement {
            regulator,
            code: code.into(),
            description: description.into(),
        });
        self
    }

    pub fn build(self) -> Result<RegulationCatalog, CatalogError> {
        let mut sections: Vec<RegulatorSection> = Vec::new();

        for req in self.entries {
            if req.code.trim().is_empty() {
                return Err(CatalogError::EmptyCode(req.regulator));
            }

            let idx = match sections.iter().position(|s| s.regulator == req.regulator) {
                Some(idx) => idx,
                None => {
                    sections.push(RegulatorSection {
                        regulator: req.regulator,
                        requirements: Vec::new(),
                    });
                    sections.len() - 1
                }
            };

            let section = &mut sections[idx];
            if section.requirements.iter().any(|r| r.code == req.code) {
                return Err(CatalogError::DuplicateCode {
                    regulator: req.regulator,
                    code: req.code,
                });
            }
            section.requirements.push(req);
        }

        Ok(RegulationCatalog { sections })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_duplicate_code_within_regulator() {
        let err = CatalogBuilder::new()
            .requirement(Regulator::Cap, "GEN.1", "a")
            .requirement(Regulator::Cap, "GEN.1", "b")
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            CatalogError::DuplicateCode {
                regulator: Regulator::Cap,
                code: "GEN.1".to_string(),
            }
        );
        assert_eq!(
            err.to_string(),
            "duplicate requirement code GEN.1 for regulator CAP"
        );
    }

    #[test]
    fn allows_same_code_across_regulators() {
        let catalog = CatalogBuilder::new()
            .requirement(Regulator::Cap, "X", "cap x")
            .requirement(Regulator::Jcaho, "X", "jcaho x")
            .build()
            .expect("codes may repeat across regulators");
        assert_eq!(catalog.requirement_count(), 2);
    }

    #[test]
    fn interleaved_entries_group_by_first_seen_regulator() {
        let catalog = CatalogBuilder::new()
            .requirement(Regulator::Clia, "1", "one")
            .requirement(Regulator::Cap, "2", "two")
            .requirement(Regulator::Clia, "3", "three")
            .build()
            .expect("valid");
        let order: Vec<Regulator> = catalog.regulators().collect();
        assert_eq!(order, vec![Regulator::Clia, Regulator::Cap]);
        let clia: Vec<&str> = catalog.all_regulators()[0]
            .requirements
            .iter()
            .map(|r| r.code.as_str())
            .collect();
        assert_eq!(clia, vec!["1", "3"]);
    }

    #[test]
    fn rejects_blank_code() {
        let err = CatalogBuilder::new()
            .requirement(Regulator::Clia, "  ", "blank")
            .build()
            .unwrap_err();
        assert_eq!(err, CatalogError::EmptyCode(Regulator::Clia));
    }
}
