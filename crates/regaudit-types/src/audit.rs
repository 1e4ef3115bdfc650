use crate::Regulator;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;

/// Binary outcome of evaluating one requirement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplianceStatus {
    Compliant,
    #[serde(alias = "NON-COMPLIANT")]
    NonCompliant,
}

impl ComplianceStatus {
    pub fn from_bool(compliant: bool) -> Self {
        if compliant {
            ComplianceStatus::Compliant
        } else {
            ComplianceStatus::NonCompliant
        }
    }

    pub fn is_compliant(self) -> bool {
        self == ComplianceStatus::Compliant
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ComplianceStatus::Compliant => "COMPLIANT",
            ComplianceStatus::NonCompliant => "NON_COMPLIANT",
        }
    }
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Remediation priority. Only `High` is produced today.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "HIGH",
        }
    }
}

/// Percentage of compliant findings, rounded half up to two decimals.
///
/// Held as hundredths of a percent (`8750` is `87.50%`) so rounding and
/// threshold comparison are exact. Serialized as a string: `"66.67%"`, or
/// `"N/A"` when nothing was evaluated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComplianceScore {
    Percent(u32),
    NotApplicable,
}

impl ComplianceScore {
    pub const NOT_APPLICABLE: &'static str = "N/A";

    /// `compliant / total * 100`; an empty audit yields `NotApplicable`.
    pub fn from_counts(compliant: usize, total: usize) -> Self {
        if total == 0 {
            return ComplianceScore::NotApplicable;
        }
        let compliant = compliant.min(total) as u128;
        let total = total as u128;
        // floor(compliant * 10_000 / total + 1/2)
        let hundredths = (compliant * 20_000 + total) / (2 * total);
        ComplianceScore::Percent(hundredths as u32)
    }

    pub fn hundredths(self) -> Option<u32> {
        match self {
            ComplianceScore::Percent(h) => Some(h),
            ComplianceScore::NotApplicable => None,
        }
    }

    pub fn percent(self) -> Option<f64> {
        self.hundredths().map(|h| f64::from(h) / 100.0)
    }
}

impl fmt::Display for ComplianceScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComplianceScore::Percent(h) => write!(f, "{}.{:02}%", h / 100, h % 100),
            ComplianceScore::NotApplicable => f.write_str(Self::NOT_APPLICABLE),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid compliance score: {0:?} (expected e.g. \"87.50%\" or \"N/A\")")]
pub struct ParseScoreError(pub String);

impl FromStr for ComplianceScore {
    type Err = ParseScoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == Self::NOT_APPLICABLE {
            return Ok(ComplianceScore::NotApplicable);
        }
        parse_hundredths(s)
            .filter(|h| *h <= 10_000)
            .map(ComplianceScore::Percent)
            .ok_or_else(|| ParseScoreError(s.to_string()))
    }
}

/// `"87.5%"` -> `8750`. At most two fractional digits.
fn parse_hundredths(s: &str) -> Option<u32> {
    let number = s.strip_suffix('%')?;
    let (whole, frac) = number.split_once('.').unwrap_or((number, ""));
    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if frac.len() > 2 || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let frac = match frac.len() {
        0 => 0,
        1 => frac.parse::<u32>().ok()? * 10,
        _ => frac.parse::<u32>().ok()?,
    };
    whole.parse::<u32>().ok()?.checked_mul(100)?.checked_add(frac)
}

impl Serialize for ComplianceScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ComplianceScore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Outcome of one requirement for one department at one point in time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditFinding {
    pub regulator: Regulator,
    pub code: String,
    pub description: String,
    pub status: ComplianceStatus,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub checked_at: OffsetDateTime,
}

impl AuditFinding {
    pub fn is_critical(&self) -> bool {
        self.status == ComplianceStatus::NonCompliant
    }
}

/// Result of one audit run. Findings are in catalog order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    pub department: String,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub audit_date: OffsetDateTime,
    pub findings: Vec<AuditFinding>,
    #[schemars(with = "String")]
    pub compliance_score: ComplianceScore,
}

impl AuditRecord {
    pub fn compliant_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.status.is_compliant())
            .count()
    }

    pub fn non_compliant_count(&self) -> usize {
        self.findings.len() - self.compliant_count()
    }

    pub fn critical_findings(&self) -> impl Iterator<Item = &AuditFinding> {
        self.findings.iter().filter(|f| f.is_critical())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Recommendation {
    /// Code of the finding this recommendation remediates.
    pub code: String,
    pub action: String,
    pub priority: Priority,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub deadline: OffsetDateTime,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ComplianceReport {
    pub executive_summary: String,
    pub critical_findings: Vec<AuditFinding>,
    pub recommendations: Vec<Recommendation>,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub next_audit_date: OffsetDateTime,
}
