//! Compliance evaluators.
//!
//! The runner only sees [`ComplianceEvaluator`]; evidence sources plug in behind it.

use regaudit_types::ComplianceStatus;
use sha2::{Digest, Sha256};

/// Default compliant share for [`SampledEvaluator`].
pub const DEFAULT_SAMPLE_RATE: f64 = 0.8;

/// Decides whether a department meets one requirement.
///
/// Implementations must be total: unknown departments and codes still yield a
/// verdict, and the verdict must be a deterministic function of the inputs and
/// the evaluator's own evidence.
pub trait ComplianceEvaluator: Send + Sync {
    fn evaluate(&self, department: &str, code: &str) -> ComplianceStatus;
}

impl<F> ComplianceEvaluator for F
where
    F: Fn(&str, &str) -> ComplianceStatus + Send + Sync,
{
    fn evaluate(&self, department: &str, code: &str) -> ComplianceStatus {
        self(department, code)
    }
}

/// Demo evaluator: a stable pseudo-random verdict per `(department, code)`.
///
/// The pair is hashed with SHA-256 and the first eight bytes pick a bucket in
/// `0..10_000`; buckets below `rate * 10_000` are compliant. Re-running an audit
/// gives the same findings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampledEvaluator {
    rate: f64,
}

impl SampledEvaluator {
    /// `rate` is clamped to `0.0..=1.0`; NaN counts as `0.0`.
    pub fn new(rate: f64) -> Self {
        let rate = if rate.is_nan() {
            0.0
        } else {
            rate.clamp(0.0, 1.0)
        };
        Self { rate }
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    fn bucket(department: &str, code: &str) -> u64 {
        let mut hasher = Sha256::new();
        hasher.update(department.as_bytes());
        hasher.update([0u8]);
        hasher.update(code.as_bytes());
        let digest = hasher.finalize();

        let mut head = [0u8; 8];
        head.copy_from_slice(&digest[..8]);
        u64::from_be_bytes(head) % 10_000
    }
}

impl Default for SampledEvaluator {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_RATE)
    }
}

impl ComplianceEvaluator for SampledEvaluator {
    fn evaluate(&self, department: &str, code: &str) -> ComplianceStatus {
        let bucket = Self::bucket(department, code) as f64;
        ComplianceStatus::from_bool(bucket < self.rate * 10_000.0)
    }
}
