//! Stable identifiers for schemas and verdict reasons.
//!
//! Reasons are short snake_case discriminators carried in `verdict.reasons`.

// Schemas
pub const SCHEMA_CONFIG_V1: &str = "regaudit.config.v1";
pub const SCHEMA_EVIDENCE_V1: &str = "regaudit.evidence.v1";

// Verdict reasons
pub const REASON_NO_REQUIREMENTS: &str = "no_requirements_evaluated";
pub const REASON_BELOW_THRESHOLD: &str = "score_below_threshold";
pub const REASON_TOOL_ERROR: &str = "tool_error";

// Evaluator kinds (config values)
pub const EVALUATOR_EVIDENCE: &str = "evidence";
pub const EVALUATOR_SAMPLED: &str = "sampled";

// Profiles
pub const PROFILE_STANDARD: &str = "standard";
pub const PROFILE_STRICT: &str = "strict";
pub const PROFILE_ADVISORY: &str = "advisory";
