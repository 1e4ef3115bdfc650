//! The `catalog` use case: list the compiled-in requirements.

use anyhow::Context;
use regaudit_catalog::RegulationCatalog;

pub fn run_catalog() -> RegulationCatalog {
    RegulationCatalog::standard()
}

/// Text listing grouped by regulator; `json` switches to the serialized catalog.
pub fn format_catalog(catalog: &RegulationCatalog, json: bool) -> anyhow::Result<String> {
    if json {
        let mut text = serde_json::to_string_pretty(catalog).context("serialize catalog")?;
        text.push('\n');
        return Ok(text);
    }

    let mut out = String::new();
    for section in catalog.all_regulators() {
        out.push_str(&format!(
            "{} ({} requirements)\n",
            section.regulator,
            section.requirements.len()
        ));
        for r in &section.requirements {
            out.push_str(&format!("  {:<12} {}\n", r.code, r.description));
        }
    }
    if catalog.is_empty() {
        out.push_str("No requirements.\n");
    }
    Ok(out)
}
