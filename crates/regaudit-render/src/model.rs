#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableVerdictStatus {
    Pass,
    Fail,
    Skip,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableFinding {
    pub regulator: String,
    pub code: String,
    pub description: String,
    pub compliant: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableRecommendation {
    pub code: String,
    pub action: String,
    pub priority: String,
    pub deadline: String,
}

/// One department's audit, with dates already formatted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableAudit {
    pub department: String,
    pub audit_date: String,
    pub score: String,
    pub compliant: u32,
    pub non_compliant: u32,
    pub findings: Vec<RenderableFinding>,
    pub recommendations: Vec<RenderableRecommendation>,
    pub next_audit_date: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableReport {
    pub verdict: RenderableVerdictStatus,
    pub reasons: Vec<String>,
    /// Present on runtime-error reports, which carry no audit.
    pub error: Option<String>,
    pub audit: Option<RenderableAudit>,
}
