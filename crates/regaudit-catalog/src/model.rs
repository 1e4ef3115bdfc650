use regaudit_types::Regulator;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Requirement {
    pub regulator: Regulator,
    pub code: String,
    pub description: String,
}

/// One regulator's requirements, in catalog order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegulatorSection {
    pub regulator: Regulator,
    pub requirements: Vec<Requirement>,
}

/// Ordered regulator -> requirements mapping.
///
/// Invariants (enforced by [`crate::CatalogBuilder`]):
/// - each regulator appears at most once
/// - codes are unique within a regulator (they may repeat across regulators)
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RegulationCatalog {
    pub(crate) sections: Vec<RegulatorSection>,
}

impl RegulationCatalog {
    /// An empty catalog. Audits against it produce the `N/A` score.
    pub fn empty() -> Self {
        Self::default()
    }

    /// All regulators with their requirement sets, in catalog order.
    pub fn all_regulators(&self) -> &[RegulatorSection] {
        &self.sections
    }

    pub fn regulators(&self) -> impl Iterator<Item = Regulator> + '_ {
        self.sections.iter().map(|s| s.regulator)
    }

    /// Every requirement, regulators first then codes, in catalog order.
    pub fn requirements(&self) -> impl Iterator<Item = &Requirement> {
        self.sections.iter().flat_map(|s| s.requirements.iter())
    }

    pub fn requirement_count(&self) -> usize {
        self.sections.iter().map(|s| s.requirements.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.requirement_count() == 0
    }

    pub fn section(&self, regulator: Regulator) -> Option<&RegulatorSection> {
        self.sections.iter().find(|s| s.regulator == regulator)
    }

    pub fn requirement(&self, regulator: Regulator, code: &str) -> Option<&Requirement> {
        self.section(regulator)?
            .requirements
            .iter()
            .find(|r| r.code == code)
    }

    /// All requirements carrying `code`, across regulators.
    pub fn find_code<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a Requirement> + 'a {
        self.requirements().filter(move |r| r.code == code)
    }

    /// Filtered copy keeping only the requirements `keep` accepts.
    ///
    /// Sections left without requirements are dropped. Order is preserved.
    pub fn retain<F>(&self, mut keep: F) -> RegulationCatalog
    where
        F: FnMut(&Requirement) -> bool,
    {
        let sections = self
            .sections
            .iter()
            .filter_map(|s| {
                let requirements: Vec<Requirement> =
                    s.requirements.iter().filter(|r| keep(r)).cloned().collect();
                (!requirements.is_empty()).then(|| RegulatorSection {
                    regulator: s.regulator,
                    requirements,
                })
            })
            .collect();
        RegulationCatalog { sections }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CatalogBuilder;

    fn sample() -> RegulationCatalog {
        CatalogBuilder::new()
            .requirement(Regulator::Cap, "A.1", "first")
            .requirement(Regulator::Cap, "A.2", "second")
            .requirement(Regulator::Clia, "A.1", "shared code")
            .build()
            .expect("valid catalog")
    }

    #[test]
    fn requirements_follow_catalog_order() {
        let catalog = sample();
        let codes: Vec<(Regulator, &str)> = catalog
            .requirements()
            .map(|r| (r.regulator, r.code.as_str()))
            .collect();
        assert_eq!(
            codes,
            vec![
                (Regulator::Cap, "A.1"),
                (Regulator::Cap, "A.2"),
                (Regulator::Clia, "A.1"),
            ]
        );
    }

    #[test]
    fn identity_is_regulator_and_code() {
        let catalog = sample();
        assert_eq!(
            catalog
                .requirement(Regulator::Clia, "A.1")
                .map(|r| r.description.as_str()),
            Some("shared code")
        );
        assert_eq!(catalog.find_code("A.1").count(), 2);
        assert!(catalog.requirement(Regulator::Jcaho, "A.1").is_none());
    }

    #[test]
    fn retain_drops_empty_sections() {
        let catalog = sample().retain(|r| r.code == "A.2");
        assert_eq!(catalog.requirement_count(), 1);
        assert_eq!(catalog.regulators().collect::<Vec<_>>(), vec![Regulator::Cap]);

        let none = sample().retain(|_| false);
        assert!(none.is_empty());
        assert!(none.all_regulators().is_empty());
    }

    #[test]
    fn empty_catalog_has_no_requirements() {
        let catalog = RegulationCatalog::empty();
        assert!(catalog.is_empty());
        assert_eq!(catalog.requirement_count(), 0);
    }
}
