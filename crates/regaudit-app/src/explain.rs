//! The `explain` use case: look up requirement and regulator documentation.

use regaudit_catalog::{RegulationCatalog, Requirement};
use regaudit_domain::remediation_action;
use regaudit_types::{Regulator, RegulatorExplanation, lookup_regulator};

/// A requirement plus the remediation a critical finding against it would produce.
#[derive(Clone, Debug)]
pub struct RequirementExplanation {
    pub requirement: Requirement,
    pub regulator: RegulatorExplanation,
    pub action: String,
}

/// Output from the explain use case.
#[derive(Clone, Debug)]
pub enum ExplainOutput {
    /// Exactly one requirement matched.
    Found(RequirementExplanation),
    /// The identifier named a regulator.
    Regulator {
        regulator: Regulator,
        explanation: RegulatorExplanation,
        requirements: Vec<Requirement>,
    },
    /// A bare code exists under more than one regulator.
    Ambiguous {
        identifier: String,
        candidates: Vec<String>,
    },
    /// Unknown identifier; includes every qualified code in the catalog.
    NotFound {
        identifier: String,
        available: Vec<String>,
    },
}

/// Look up `code`, `REGULATOR:code` or a regulator name in the compiled-in catalog.
pub fn run_explain(identifier: &str) -> ExplainOutput {
    explain_in(&RegulationCatalog::standard(), identifier)
}

fn explain_in(catalog: &RegulationCatalog, identifier: &str) -> ExplainOutput {
    let identifier = identifier.trim();

    if let Ok(regulator) = identifier.parse::<Regulator>() {
        return ExplainOutput::Regulator {
            regulator,
            explanation: lookup_regulator(regulator),
            requirements: catalog
                .section(regulator)
                .map(|s| s.requirements.clone())
                .unwrap_or_default(),
        };
    }

    let matches: Vec<&Requirement> = match identifier.split_once(':') {
        Some((regulator, code)) => match regulator.parse::<Regulator>() {
            Ok(regulator) => catalog.requirement(regulator, code.trim()).into_iter().collect(),
            Err(_) => Vec::new(),
        },
        None => catalog.find_code(identifier).collect(),
    };

    match matches.as_slice() {
        [] => ExplainOutput::NotFound {
            identifier: identifier.to_string(),
            available: catalog.requirements().map(qualified).collect(),
        },
        [requirement] => ExplainOutput::Found(RequirementExplanation {
            requirement: (*requirement).clone(),
            regulator: lookup_regulator(requirement.regulator),
            action: remediation_action(&requirement.description),
        }),
        many => ExplainOutput::Ambiguous {
            identifier: identifier.to_string(),
            candidates: many.iter().map(|r| qualified(r)).collect(),
        },
    }
}

fn qualified(requirement: &Requirement) -> String {
    format!("{}:{}", requirement.regulator, requirement.code)
}

/// Format a requirement explanation for terminal display.
pub fn format_explanation(exp: &RequirementExplanation) -> String {
    let heading = format!(
        "{} {}: {}",
        exp.requirement.regulator, exp.requirement.code, exp.requirement.description
    );

    let mut out = String::new();
    out.push_str(&heading);
    out.push('\n');
    out.push_str(&"=".repeat(heading.chars().count()));
    out.push_str("\n\n");
    out.push_str(exp.regulator.title);
    out.push_str("\n\n");
    out.push_str(exp.regulator.description);
    out.push_str("\n\n");
    out.push_str("When non-compliant\n");
    out.push_str("------------------\n");
    out.push_str(&format!("Recommendation (HIGH): {}\n\n", exp.action));
    out.push_str("Remediation\n");
    out.push_str("-----------\n");
    out.push_str(exp.regulator.remediation);
    out.push('\n');

    out
}

pub fn format_regulator(
    regulator: Regulator,
    explanation: &RegulatorExplanation,
    requirements: &[Requirement],
) -> String {
    let mut out = String::new();
    out.push_str(explanation.title);
    out.push('\n');
    out.push_str(&"=".repeat(explanation.title.chars().count()));
    out.push_str("\n\n");
    out.push_str(explanation.description);
    out.push_str("\n\n");
    out.push_str(&format!("Requirements ({regulator}):\n"));
    for r in requirements {
        out.push_str(&format!("  - {}  {}\n", r.code, r.description));
    }
    out.push_str("\nRemediation\n");
    out.push_str("-----------\n");
    out.push_str(explanation.remediation);
    out.push('\n');
    out
}

pub fn format_ambiguous(identifier: &str, candidates: &[String]) -> String {
    let mut out = format!("Code {identifier} is defined by more than one regulator:\n");
    for c in candidates {
        out.push_str(&format!("  - {c}\n"));
    }
    out.push_str("\nQualify it as REGULATOR:code.\n");
    out
}

/// Format the "not found" error message for terminal display.
pub fn format_not_found(identifier: &str, available: &[String]) -> String {
    let mut out = String::new();

    out.push_str(&format!("Unknown requirement or regulator: {}\n\n", identifier));
    out.push_str("Regulators:\n");
    for r in Regulator::ALL {
        out.push_str(&format!("  - {}\n", r));
    }
    out.push_str("\nRequirements:\n");
    for code in available {
        out.push_str(&format!("  - {}\n", code));
    }

    out
}
