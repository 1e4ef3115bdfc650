//! CLI entry point for regaudit.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `regaudit-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use regaudit_app::{
    AuditInput, ExplainOutput, exit_code, format_ambiguous, format_catalog, format_explanation,
    format_not_found, format_regulator, parse_report_json, run_audit, run_catalog, run_explain,
    run_markdown, runtime_error_report, serialize_reports,
};
use regaudit_settings::Overrides;
use regaudit_types::{ReportEnvelope, ids};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "regaudit",
    version,
    about = "Regulatory compliance audits for laboratory departments (CAP, CLIA, JCAHO)"
)]
struct Cli {
    /// Path to regaudit config TOML (missing file means defaults).
    #[arg(long, default_value = "regaudit.toml", global = true)]
    config: Utf8PathBuf,

    /// Override profile (standard|strict|advisory).
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Override the minimum passing compliance score, in percent.
    #[arg(long, global = true)]
    fail_under: Option<f64>,

    /// Log more. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Audit one or more departments and write artifacts.
    Audit {
        /// Department to audit. Repeat to audit several in one run.
        #[arg(long = "department", short = 'd', required = true)]
        departments: Vec<String>,

        /// Evidence file (regaudit.evidence.v1 JSON).
        #[arg(long)]
        evidence: Option<Utf8PathBuf>,

        /// Override the evaluator (evidence|sampled).
        #[arg(long)]
        evaluator: Option<String>,

        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/regaudit/report.json")]
        report_out: Utf8PathBuf,

        /// Write a Markdown report alongside the JSON.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown report (if enabled).
        #[arg(long, default_value = "artifacts/regaudit/report.md")]
        markdown_out: Utf8PathBuf,
    },

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/regaudit/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Explain a requirement (`GEN.20316`, `CLIA:493.1256`) or a regulator (`CAP`).
    Explain { identifier: String },

    /// List the compiled-in requirement catalog.
    Catalog {
        /// Print the catalog as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.cmd {
        Commands::Audit {
            departments,
            evidence,
            evaluator,
            report_out,
            write_markdown,
            markdown_out,
        } => cmd_audit(
            &cli,
            departments,
            evidence.as_deref(),
            evaluator.clone(),
            report_out,
            (*write_markdown).then_some(markdown_out.as_path()),
        ),
        Commands::Md { report, output } => cmd_md(report, output.as_deref()),
        Commands::Explain { identifier } => cmd_explain(identifier),
        Commands::Catalog { json } => cmd_catalog(*json),
    }
}

/// Logs go to stderr; `RUST_LOG` applies when no `-v` is given.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_audit(
    cli: &Cli,
    departments: &[String],
    evidence: Option<&Utf8Path>,
    evaluator: Option<String>,
    report_out: &Utf8Path,
    markdown_out: Option<&Utf8Path>,
) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<i32> {
        let cfg_text = read_config(&cli.config)?;
        let evidence_text = evidence
            .map(|path| {
                std::fs::read_to_string(path).with_context(|| format!("read evidence: {path}"))
            })
            .transpose()?;

        let input = AuditInput {
            departments,
            config_text: &cfg_text,
            evidence_text: evidence_text.as_deref(),
            overrides: Overrides {
                profile: cli.profile.clone(),
                fail_under: cli.fail_under,
                evaluator,
            },
        };

        let output = run_audit(input)?;

        write_report_file(report_out, &output.reports).context("write report json")?;
        tracing::info!(path = %report_out, "wrote report");

        if let Some(markdown_out) = markdown_out {
            let md = run_markdown(&output.reports);
            write_text_file(markdown_out, &md).context("write markdown")?;
            tracing::info!(path = %markdown_out, "wrote markdown");
        }

        for report in &output.reports {
            print_summary(report);
        }

        Ok(exit_code(&output.reports))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            let profile = cli.profile.as_deref().unwrap_or(ids::PROFILE_STANDARD);
            let report = runtime_error_report(&format!("{err:#}"), profile);
            let _ = write_report_file(report_out, &[report]);
            eprintln!("regaudit error: {err:#}");
            std::process::exit(1);
        }
    }
}

/// Missing config file is allowed (defaults apply); an unreadable one is not.
fn read_config(path: &Utf8Path) -> anyhow::Result<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path, "no config file; using defaults");
            Ok(String::new())
        }
        Err(err) => Err(err).with_context(|| format!("read config: {path}")),
    }
}

fn print_summary(report: &ReportEnvelope) {
    let Some(audit) = &report.audit else {
        return;
    };
    let status = match report.verdict.status {
        regaudit_types::VerdictStatus::Pass => "pass",
        regaudit_types::VerdictStatus::Fail => "fail",
        regaudit_types::VerdictStatus::Skip => "skip",
    };
    println!(
        "{}: {} ({}, {} critical)",
        audit.department,
        audit.compliance_score,
        status,
        report.verdict.counts.non_compliant
    );
}

fn write_report_file(path: &Utf8Path, reports: &[ReportEnvelope]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    let data = serialize_reports(reports).context("serialize report")?;
    std::fs::write(path, data).with_context(|| format!("write report: {}", path))?;
    Ok(())
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    std::fs::write(path, text).with_context(|| format!("write text: {}", path))?;
    Ok(())
}

fn cmd_md(report_path: &Utf8Path, output: Option<&Utf8Path>) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(report_path)
        .with_context(|| format!("read report: {}", report_path))?;
    let reports = parse_report_json(&report_text)?;
    let md = run_markdown(&reports);

    if let Some(out_path) = output {
        write_text_file(out_path, &md).context("write markdown output")?;
    } else {
        print!("{}", md);
    }

    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::Regulator {
            regulator,
            explanation,
            requirements,
        } => {
            print!(
                "{}",
                format_regulator(regulator, &explanation, &requirements)
            );
            Ok(())
        }
        ExplainOutput::Ambiguous {
            identifier,
            candidates,
        } => {
            eprint!("{}", format_ambiguous(&identifier, &candidates));
            std::process::exit(1);
        }
        ExplainOutput::NotFound {
            identifier,
            available,
        } => {
            eprint!("{}", format_not_found(&identifier, &available));
            std::process::exit(1);
        }
    }
}

fn cmd_catalog(json: bool) -> anyhow::Result<()> {
    let catalog = run_catalog();
    print!("{}", format_catalog(&catalog, json)?);
    Ok(())
}
