//! Offline evidence index.
//!
//! Evidence files record, per department and requirement code, the status an
//! assessor determined. The index answers exact `(department, code)` lookups and
//! is the evidence-backed [`ComplianceEvaluator`].

#![forbid(unsafe_code)]

use regaudit_domain::ComplianceEvaluator;
use regaudit_types::{ComplianceStatus, ids};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, thiserror::Error)]
pub enum EvidenceError {
    #[error("parse evidence json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported evidence schema: {0} (expected {expected})", expected = ids::SCHEMA_EVIDENCE_V1)]
    UnsupportedSchema(String),

    #[error("duplicate evidence for department {department:?}, code {code}")]
    Duplicate { department: String, code: String },
}

/// `regaudit.evidence.v1` file shape.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EvidenceFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(default)]
    pub records: Vec<EvidenceRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EvidenceRecord {
    pub department: String,
    pub code: String,
    pub status: ComplianceStatus,
    /// Free-form pointer to the supporting document; not used for evaluation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvidenceIndex {
    by_department: BTreeMap<String, BTreeMap<String, ComplianceStatus>>,
}

impl EvidenceIndex {
    /// Parse an evidence file. A missing `schema` is accepted as v1.
    pub fn parse(text: &str) -> Result<Self, EvidenceError> {
        let file: EvidenceFile = serde_json::from_str(text)?;
        if let Some(schema) = file.schema.as_deref()
            && schema != ids::SCHEMA_EVIDENCE_V1
        {
            return Err(EvidenceError::UnsupportedSchema(schema.to_string()));
        }
        Self::from_records(file.records)
    }

    pub fn from_records(
        records: impl IntoIterator<Item = EvidenceRecord>,
    ) -> Result<Self, EvidenceError> {
        let mut by_department: BTreeMap<String, BTreeMap<String, ComplianceStatus>> =
            BTreeMap::new();

        for record in records {
            let codes = by_department.entry(record.department.clone()).or_default();
            if codes.contains_key(&record.code) {
                return Err(EvidenceError::Duplicate {
                    department: record.department,
                    code: record.code,
                });
            }
            codes.insert(record.code, record.status);
        }

        Ok(Self { by_department })
    }

    pub fn lookup(&self, department: &str, code: &str) -> Option<ComplianceStatus> {
        self.by_department.get(department)?.get(code).copied()
    }

    pub fn departments(&self) -> impl Iterator<Item = &str> {
        self.by_department.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_department.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ComplianceEvaluator for EvidenceIndex {
    /// Recorded status; no evidence means the requirement is not demonstrated.
    fn evaluate(&self, department: &str, code: &str) -> ComplianceStatus {
        self.lookup(department, code)
            .unwrap_or(ComplianceStatus::NonCompliant)
    }
}
