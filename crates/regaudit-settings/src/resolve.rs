use crate::{model::RegauditConfigV1, presets};
use anyhow::Context;
use globset::Glob;
use regaudit_domain::evaluator::DEFAULT_SAMPLE_RATE;
use regaudit_domain::policy::{EffectiveConfig, EvaluatorKind, RegulatorPolicy};
use regaudit_types::{Regulator, ids};
use std::collections::BTreeSet;

/// Upper bound for report offsets; keeps computed dates far from calendar overflow.
const MAX_OFFSET_DAYS: u32 = 3650;

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub fail_under: Option<f64>,
    pub evaluator: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
}

pub fn resolve_config(
    cfg: RegauditConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    if let Some(schema) = cfg.schema.as_deref()
        && schema != ids::SCHEMA_CONFIG_V1
    {
        anyhow::bail!(
            "unsupported config schema: {schema} (expected {})",
            ids::SCHEMA_CONFIG_V1
        );
    }

    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| ids::PROFILE_STANDARD.to_string());

    let mut effective = presets::preset(&profile).with_context(|| {
        format!("unknown profile: {profile} (expected standard|strict|advisory)")
    })?;

    // Threshold
    if let Some(threshold) = overrides.fail_under.or(cfg.fail_under) {
        effective.fail_under = Some(validate_fail_under(threshold)?);
    }

    // Evaluator
    if let Some(kind) = overrides.evaluator.as_deref().or(cfg.evaluator.as_deref()) {
        effective.evaluator = parse_evaluator(kind, cfg.sample_rate)?;
    } else if cfg.sample_rate.is_some() {
        anyhow::bail!("sample_rate requires evaluator = \"sampled\"");
    }

    // Report offsets
    if let Some(days) = cfg.report.critical_deadline_days {
        effective.report.critical_deadline_days =
            validate_days(days).context("invalid report.critical_deadline_days")?;
    }
    if let Some(days) = cfg.report.next_audit_interval_days {
        effective.report.next_audit_interval_days =
            validate_days(days).context("invalid report.next_audit_interval_days")?;
    }

    // Per-regulator overrides
    let mut seen = BTreeSet::new();
    for (name, rc) in cfg.regulators.iter() {
        let regulator: Regulator = name
            .parse()
            .with_context(|| format!("invalid [regulators.{name}] table"))?;
        if !seen.insert(regulator) {
            anyhow::bail!(
                "invalid [regulators.{name}] table: {regulator} is already configured under another spelling"
            );
        }

        let entry = effective
            .regulators
            .entry(regulator)
            .or_insert_with(RegulatorPolicy::disabled);

        if let Some(enabled) = rc.enabled {
            entry.enabled = enabled;
        }
        if !rc.exclude.is_empty() {
            validate_excludes(regulator, &rc.exclude)?;
            entry.exclude = rc.exclude.clone();
        }
    }

    Ok(ResolvedConfig { effective })
}

fn validate_excludes(regulator: Regulator, patterns: &[String]) -> anyhow::Result<()> {
    for pattern in patterns {
        Glob::new(pattern)
            .with_context(|| format!("invalid exclude glob for {regulator}: {pattern}"))?;
    }
    Ok(())
}

fn validate_fail_under(v: f64) -> anyhow::Result<f64> {
    if !(0.0..=100.0).contains(&v) {
        anyhow::bail!("fail_under must be between 0 and 100, got {v}");
    }
    Ok(v)
}

fn validate_days(v: u32) -> anyhow::Result<u32> {
    if v > MAX_OFFSET_DAYS {
        anyhow::bail!("offset must be at most {MAX_OFFSET_DAYS} days, got {v}");
    }
    Ok(v)
}

fn parse_evaluator(v: &str, sample_rate: Option<f64>) -> anyhow::Result<EvaluatorKind> {
    match v {
        ids::EVALUATOR_EVIDENCE => {
            if sample_rate.is_some() {
                anyhow::bail!("sample_rate requires evaluator = \"sampled\"");
            }
            Ok(EvaluatorKind::Evidence)
        }
        ids::EVALUATOR_SAMPLED => {
            let rate = sample_rate.unwrap_or(DEFAULT_SAMPLE_RATE);
            if !(0.0..=1.0).contains(&rate) {
                anyhow::bail!("sample_rate must be between 0.0 and 1.0, got {rate}");
            }
            Ok(EvaluatorKind::Sampled { rate })
        }
        other => anyhow::bail!("unknown evaluator: {other} (expected evidence|sampled)"),
    }
}
