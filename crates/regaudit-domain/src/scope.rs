//! Narrow a catalog to the regulators and codes the effective config audits.

use crate::policy::EffectiveConfig;
use globset::{Glob, GlobSet, GlobSetBuilder};
use regaudit_catalog::RegulationCatalog;
use regaudit_types::Regulator;
use std::collections::BTreeMap;

/// Catalog restricted to enabled regulators, minus excluded codes.
///
/// Catalog order is preserved. Exclusion patterns that fail to compile are
/// ignored here; settings resolution rejects them before they reach the engine.
pub fn select_catalog(catalog: &RegulationCatalog, cfg: &EffectiveConfig) -> RegulationCatalog {
    let excludes: BTreeMap<Regulator, GlobSet> = catalog
        .regulators()
        .filter_map(|r| {
            cfg.regulator_policy(r)
                .map(|p| (r, build_globset(&p.exclude)))
        })
        .collect();

    catalog.retain(|req| {
        excludes
            .get(&req.regulator)
            .is_some_and(|set| !set.is_match(&req.code))
    })
}

fn build_globset(patterns: &[String]) -> GlobSet {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        if let Ok(glob) = Glob::new(pattern) {
            builder.add(glob);
        }
    }
    builder.build().unwrap_or_else(|_| GlobSet::empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::RegulatorPolicy;

    #[test]
    fn default_config_keeps_everything() {
        let catalog = RegulationCatalog::standard();
        let selected = select_catalog(&catalog, &EffectiveConfig::default());
        assert_eq!(selected, catalog);
    }

    #[test]
    fn disabled_regulator_is_dropped() {
        let mut cfg = EffectiveConfig::default();
        cfg.regulators
            .insert(Regulator::Clia, RegulatorPolicy::disabled());
        let selected = select_catalog(&RegulationCatalog::standard(), &cfg);
        assert_eq!(
            selected.regulators().collect::<Vec<_>>(),
            vec![Regulator::Cap, Regulator::Jcaho]
        );
        assert_eq!(selected.requirement_count(), 5);
    }

    #[test]
    fn missing_regulator_policy_means_not_audited() {
        let mut cfg = EffectiveConfig::default();
        cfg.regulators.remove(&Regulator::Jcaho);
        let selected = select_catalog(&RegulationCatalog::standard(), &cfg);
        assert!(selected.section(Regulator::Jcaho).is_none());
    }

    #[test]
    fn exclude_globs_apply_per_regulator() {
        let mut cfg = EffectiveConfig::default();
        cfg.regulators.insert(
            Regulator::Cap,
            RegulatorPolicy {
                enabled: true,
                exclude: vec!["GEN.*".to_string()],
            },
        );
        let selected = select_catalog(&RegulationCatalog::standard(), &cfg);
        let cap: Vec<&str> = selected
            .section(Regulator::Cap)
            .map(|s| s.requirements.iter().map(|r| r.code.as_str()).collect())
            .unwrap_or_default();
        assert_eq!(cap, vec!["CHM.13250"]);
        assert_eq!(selected.requirement_count(), 6);
    }

    #[test]
    fn everything_excluded_yields_empty_catalog() {
        let mut cfg = EffectiveConfig::default();
        for policy in cfg.regulators.values_mut() {
            policy.exclude = vec!["*".to_string()];
        }
        let selected = select_catalog(&RegulationCatalog::standard(), &cfg);
        assert!(selected.is_empty());
    }
}
