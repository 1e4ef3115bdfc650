//! Developer tasks (schema generation, fixture conformance, explain coverage).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use regaudit_catalog::RegulationCatalog;
use regaudit_test_util::normalize_nondeterministic;
use regaudit_types::{Regulator, ids, lookup_regulator};
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the project root (parent of xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    if manifest_dir.ends_with("xtask") {
        manifest_dir
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or(manifest_dir)
    } else {
        manifest_dir
    }
}

fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

fn fixtures_dir() -> PathBuf {
    project_root().join("tests").join("fixtures")
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(regaudit_types::ReportEnvelope)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(regaudit_settings::RegauditConfigV1)
}

fn generate_evidence_schema() -> schemars::Schema {
    schema_for!(regaudit_evidence::EvidenceFile)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "regaudit.report.v1.json",
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: "regaudit.config.v1.json",
            generate: generate_config_schema,
        },
        SchemaSpec {
            filename: "regaudit.evidence.v1.json",
            generate: generate_evidence_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn compile(schema: &schemars::Schema) -> anyhow::Result<jsonschema::Validator> {
    let value = serde_json::to_value(schema).context("Failed to convert schema")?;
    jsonschema::validator_for(&value).map_err(|e| anyhow::anyhow!("Failed to compile schema: {e}"))
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for entry in schema_specs() {
        let json = serialize_schema(&(entry.generate)())?;
        let path = dir.join(entry.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Check that schemas/ matches what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for entry in schema_specs() {
        let path = dir.join(entry.filename);
        if !path.exists() {
            missing.push(entry.filename);
            continue;
        }

        let expected = serialize_schema(&(entry.generate)())?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if expected != actual {
            mismatched.push(entry.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }

    for name in &missing {
        eprintln!("Missing schema: {name}");
    }
    for name in &mismatched {
        eprintln!("Schema out of date: {name}");
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

/// Token pattern for verdict reasons.
fn is_valid_token(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

fn check_report(name: &str, validator: &jsonschema::Validator, value: &serde_json::Value) -> Vec<String> {
    let mut errors: Vec<String> = validator
        .iter_errors(value)
        .map(|err| format!("{name}: schema validation: {err}"))
        .collect();

    if let Some(reasons) = value
        .get("verdict")
        .and_then(|v| v.get("reasons"))
        .and_then(|v| v.as_array())
    {
        for (i, reason) in reasons.iter().enumerate() {
            if let Some(s) = reason.as_str()
                && !is_valid_token(s)
            {
                errors.push(format!("{name}: verdict.reasons[{i}] '{s}' is not a valid token"));
            }
        }
    }

    errors
}

fn fixture_dirs() -> anyhow::Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(fixtures_dir()).context("Failed to read tests/fixtures/")? {
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

fn read_json(path: &Path) -> anyhow::Result<serde_json::Value> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Validate fixture inputs and golden reports against the generated schemas.
fn conform() -> anyhow::Result<()> {
    let report_validator = compile(&generate_report_schema())?;
    let evidence_validator = compile(&generate_evidence_schema())?;
    println!("✓ report and evidence schemas compile");

    let mut errors = Vec::new();
    let mut count = 0;

    for dir in fixture_dirs()? {
        let name = dir
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        let evidence = read_json(&dir.join("evidence.json"))?;
        for err in evidence_validator.iter_errors(&evidence) {
            errors.push(format!("{name}: evidence.json: {err}"));
        }
        if let Err(err) = regaudit_evidence::EvidenceIndex::parse(&evidence.to_string()) {
            errors.push(format!("{name}: evidence.json: {err}"));
        }

        let config_path = dir.join("regaudit.toml");
        if config_path.exists() {
            let text = fs::read_to_string(&config_path)?;
            let resolved = regaudit_settings::parse_config_toml(&text).and_then(|cfg| {
                regaudit_settings::resolve_config(cfg, regaudit_settings::Overrides::default())
            });
            if let Err(err) = resolved {
                errors.push(format!("{name}: regaudit.toml: {err:#}"));
            }
        }

        let expected = read_json(&dir.join("expected.report.json"))?;
        errors.extend(check_report(&name, &report_validator, &expected));

        count += 1;
        println!("  ✓ {name}");
    }

    if count == 0 {
        bail!("No fixtures found in {}", fixtures_dir().display());
    }
    if !errors.is_empty() {
        eprintln!("\nConformance errors:");
        for err in &errors {
            eprintln!("  - {err}");
        }
        bail!("Conformance validation failed with {} errors", errors.len());
    }

    println!("\n✓ All {count} fixtures pass conformance checks!");
    Ok(())
}

/// Full conformance: fixtures plus the built binary's output against golden files.
fn conform_full() -> anyhow::Result<()> {
    conform()?;

    println!("\n--- Full conformance: regaudit binary output ---\n");

    let report_validator = compile(&generate_report_schema())?;
    let bin = project_root().join("target").join("debug").join("regaudit");
    #[cfg(target_os = "windows")]
    let bin = bin.with_extension("exe");

    if !bin.exists() {
        bail!(
            "regaudit binary not found at {}.\nRun `cargo build -p regaudit-cli` first.",
            bin.display()
        );
    }

    let mut errors = Vec::new();
    for dir in fixture_dirs()? {
        let name = dir
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let temp_dir = tempfile::tempdir().context("Failed to create temp dir")?;
        let report_out = temp_dir.path().join("report.json");

        let output = std::process::Command::new(&bin)
            .arg("--config")
            .arg(dir.join("regaudit.toml"))
            .args(["audit", "--department", "chemistry", "--evidence"])
            .arg(dir.join("evidence.json"))
            .arg("--report-out")
            .arg(&report_out)
            .output()
            .with_context(|| format!("Failed to run regaudit on fixture '{name}'"))?;

        // 0 = pass/skip, 2 = fail; anything else is a runtime error.
        if !matches!(output.status.code(), Some(0 | 2)) {
            errors.push(format!(
                "fixture '{name}': regaudit exited with {:?}: {}",
                output.status.code(),
                String::from_utf8_lossy(&output.stderr)
            ));
            continue;
        }

        let actual = read_json(&report_out)?;
        errors.extend(check_report(&name, &report_validator, &actual));

        let expected = read_json(&dir.join("expected.report.json"))?;
        if normalize_nondeterministic(actual) != normalize_nondeterministic(expected) {
            errors.push(format!(
                "fixture '{name}': output differs from expected.report.json"
            ));
        } else {
            println!("  ✓ fixture '{name}' matches golden report");
        }
    }

    if !errors.is_empty() {
        eprintln!("\nFull conformance errors:");
        for err in &errors {
            eprintln!("  - {err}");
        }
        bail!("Full conformance validation failed with {} errors", errors.len());
    }

    println!("\n✓ Full conformance checks passed!");
    Ok(())
}

/// Every regulator has an explanation and every catalog requirement has text.
fn explain_coverage() -> anyhow::Result<()> {
    let catalog = RegulationCatalog::standard();
    let mut errors = Vec::new();

    for regulator in Regulator::ALL {
        let exp = lookup_regulator(regulator);
        if exp.title.is_empty() || exp.description.is_empty() || exp.remediation.is_empty() {
            errors.push(format!("Regulator '{regulator}' has an incomplete explanation"));
        }
        if catalog.section(regulator).is_none() {
            errors.push(format!("Regulator '{regulator}' has no catalog section"));
        }
    }

    for requirement in catalog.requirements() {
        if requirement.description.trim().is_empty() {
            errors.push(format!(
                "Requirement '{}:{}' has an empty description",
                requirement.regulator, requirement.code
            ));
        }
    }

    if errors.is_empty() {
        println!("✓ {} regulators have explanations", Regulator::ALL.len());
        println!("✓ {} requirements have descriptions", catalog.requirement_count());
        println!("\n✓ All explain coverage checks passed!");
        Ok(())
    } else {
        for error in &errors {
            eprintln!("  - {error}");
        }
        bail!("Explain coverage validation failed with {} errors", errors.len())
    }
}

/// Print a report with timestamps and tool version replaced, ready to paste as a golden file.
fn normalize(path: Option<&String>) -> anyhow::Result<()> {
    let path = path.context("usage: cargo xtask normalize <report.json>")?;
    let value = normalize_nondeterministic(read_json(Path::new(path))?);
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  conform           Validate fixtures against the generated schemas");
    eprintln!("  conform-full      Fixtures plus regaudit binary output against golden files");
    eprintln!("  explain-coverage  Validate every regulator and requirement is documented");
    eprintln!("  normalize <file>  Print a report normalized for use as a golden file");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "conform" => conform(),
        "conform-full" => conform_full(),
        "explain-coverage" => explain_coverage(),
        "normalize" => normalize(args.get(2)),
        "print-schema-ids" => {
            println!("{}", regaudit_types::SCHEMA_REPORT_V1);
            println!("{}", ids::SCHEMA_CONFIG_V1);
            println!("{}", ids::SCHEMA_EVIDENCE_V1);
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
