use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Standards bodies whose requirements are tracked.
///
/// The set is closed at compile time; adding a regulator means adding a variant
/// and a catalog section for it.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Regulator {
    /// College of American Pathologists.
    Cap,
    /// Clinical Laboratory Improvement Amendments (42 CFR 493).
    Clia,
    /// The Joint Commission.
    Jcaho,
}

impl Regulator {
    pub const ALL: [Regulator; 3] = [Regulator::Cap, Regulator::Clia, Regulator::Jcaho];

    pub fn as_str(self) -> &'static str {
        match self {
            Regulator::Cap => "CAP",
            Regulator::Clia => "CLIA",
            Regulator::Jcaho => "JCAHO",
        }
    }
}

impl fmt::Display for Regulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown regulator: {0} (expected CAP, CLIA or JCAHO)")]
pub struct UnknownRegulator(pub String);

impl FromStr for Regulator {
    type Err = UnknownRegulator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Regulator::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownRegulator(s.to_string()))
    }
}
