use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `regaudit.toml` schema v1.
///
/// This is a *user-facing* config model: it is intentionally permissive so forward-compat is easy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RegauditConfigV1 {
    /// Optional schema string for tooling (`regaudit.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// `standard` (default), `strict` or `advisory`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Minimum passing compliance score, in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_under: Option<f64>,

    /// `evidence` (default) or `sampled`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluator: Option<String>,

    /// Compliant share used by the `sampled` evaluator (0.0 - 1.0).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<f64>,

    #[serde(default)]
    pub report: ReportConfig,

    /// Map of regulator name (`CAP`, `CLIA`, `JCAHO`) -> config.
    #[serde(default)]
    pub regulators: BTreeMap<String, RegulatorConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReportConfig {
    /// Days after the audit by which critical findings must be addressed (default 30).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical_deadline_days: Option<u32>,

    /// Days after the audit until the next one is due (default 90).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_audit_interval_days: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RegulatorConfig {
    /// Override preset enable/disable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Glob patterns over requirement codes to leave out (e.g. `GEN.*`).
    #[serde(default)]
    pub exclude: Vec<String>,
}
