use regaudit_domain::policy::EffectiveConfig;
use regaudit_types::ids;

/// Preset profiles are opinionated defaults.
///
/// Keep these small and readable. Anything complex should go into repo config.
pub fn preset(profile: &str) -> Option<EffectiveConfig> {
    match profile {
        ids::PROFILE_STANDARD => Some(standard_profile()),
        ids::PROFILE_STRICT => Some(strict_profile()),
        ids::PROFILE_ADVISORY => Some(advisory_profile()),
        _ => None,
    }
}

fn standard_profile() -> EffectiveConfig {
    EffectiveConfig::default()
}

fn strict_profile() -> EffectiveConfig {
    // Every requirement must hold.
    EffectiveConfig {
        profile: ids::PROFILE_STRICT.to_string(),
        fail_under: Some(100.0),
        ..EffectiveConfig::default()
    }
}

fn advisory_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: ids::PROFILE_ADVISORY.to_string(),
        fail_under: None,
        ..EffectiveConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_profiles() {
        assert_eq!(preset("standard").map(|p| p.fail_under), Some(Some(80.0)));
        assert_eq!(preset("strict").map(|p| p.fail_under), Some(Some(100.0)));
        assert_eq!(preset("advisory").map(|p| p.fail_under), Some(None));
        assert!(preset("lenient").is_none());
    }

    #[test]
    fn presets_audit_every_regulator() {
        for name in ["standard", "strict", "advisory"] {
            let cfg = preset(name).expect("known profile");
            assert_eq!(cfg.profile, name);
            assert_eq!(cfg.regulators.len(), 3);
            assert!(cfg.regulators.values().all(|p| p.enabled));
        }
    }
}
