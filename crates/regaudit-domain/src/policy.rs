use crate::report::ReportPolicy;
use regaudit_types::{Regulator, ids};
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EvaluatorKind {
    /// Recorded evidence; requirements without evidence are non-compliant.
    Evidence,
    /// Deterministic demo verdicts (see [`crate::SampledEvaluator`]).
    Sampled { rate: f64 },
}

impl EvaluatorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvaluatorKind::Evidence => ids::EVALUATOR_EVIDENCE,
            EvaluatorKind::Sampled { .. } => ids::EVALUATOR_SAMPLED,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegulatorPolicy {
    pub enabled: bool,
    /// Glob patterns over requirement codes to leave out of the audit.
    pub exclude: Vec<String>,
}

impl RegulatorPolicy {
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            exclude: Vec::new(),
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            exclude: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EffectiveConfig {
    pub profile: String,
    /// Minimum passing score in percent; `None` never fails.
    pub fail_under: Option<f64>,
    pub evaluator: EvaluatorKind,
    pub report: ReportPolicy,
    pub regulators: BTreeMap<Regulator, RegulatorPolicy>,
}

impl EffectiveConfig {
    /// Policy for `regulator` if it takes part in the audit.
    pub fn regulator_policy(&self, regulator: Regulator) -> Option<&RegulatorPolicy> {
        self.regulators.get(&regulator).filter(|p| p.enabled)
    }
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        Self {
            profile: ids::PROFILE_STANDARD.to_string(),
            fail_under: Some(80.0),
            evaluator: EvaluatorKind::Evidence,
            report: ReportPolicy::default(),
            regulators: Regulator::ALL
                .into_iter()
                .map(|r| (r, RegulatorPolicy::enabled()))
                .collect(),
        }
    }
}
