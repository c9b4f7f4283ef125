use std::path::{Path, PathBuf};

use clap::Args;
use envelop_core::{load_glass, load_materials, NumericMode};
use serde::Serialize;

use super::{CommandResult, EXIT_VALIDATION};

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Opaque-material catalog CSV to validate.
    #[arg(long)]
    pub materials: Option<PathBuf>,
    /// Glazing catalog CSV to validate.
    #[arg(long)]
    pub glass: Option<PathBuf>,
    /// Emit machine-readable JSON output.
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct ValidateCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct ValidateReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<ValidateCheck>,
}

pub fn run(args: &ValidateArgs) -> CommandResult {
    let report = build_report(args);
    let exit_code = if report.overall_status == CheckStatus::Pass { 0 } else { EXIT_VALIDATION };

    let output = if args.json {
        serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"validate serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        })
    } else {
        render_human(&report)
    };

    CommandResult { exit_code, output }
}

fn build_report(args: &ValidateArgs) -> ValidateReport {
    let mut checks = Vec::new();

    checks.push(match args.materials.as_deref() {
        Some(path) => check_materials(path),
        None => ValidateCheck {
            name: "material_catalog",
            status: CheckStatus::Skipped,
            details: "no --materials path supplied".to_string(),
        },
    });
    checks.push(match args.glass.as_deref() {
        Some(path) => check_glass(path),
        None => ValidateCheck {
            name: "glass_catalog",
            status: CheckStatus::Skipped,
            details: "no --glass path supplied".to_string(),
        },
    });

    let any_fail = checks.iter().any(|check| check.status == CheckStatus::Fail);
    let any_pass = checks.iter().any(|check| check.status == CheckStatus::Pass);
    let overall_status = if any_fail || !any_pass { CheckStatus::Fail } else { CheckStatus::Pass };
    let summary = if overall_status == CheckStatus::Pass {
        "validate: all supplied catalogs passed schema checks".to_string()
    } else if any_fail {
        "validate: one or more catalogs failed schema checks".to_string()
    } else {
        "validate: no catalog paths supplied".to_string()
    };

    ValidateReport { overall_status, summary, checks }
}

fn check_materials(path: &Path) -> ValidateCheck {
    match load_materials(path, NumericMode::Strict) {
        Ok(records) => ValidateCheck {
            name: "material_catalog",
            status: CheckStatus::Pass,
            details: format!("{} records parsed from {}", records.len(), path.display()),
        },
        Err(error) => ValidateCheck {
            name: "material_catalog",
            status: CheckStatus::Fail,
            details: error.to_string(),
        },
    }
}

fn check_glass(path: &Path) -> ValidateCheck {
    match load_glass(path, NumericMode::Strict) {
        Ok(records) => ValidateCheck {
            name: "glass_catalog",
            status: CheckStatus::Pass,
            details: format!("{} records parsed from {}", records.len(), path.display()),
        },
        Err(error) => ValidateCheck {
            name: "glass_catalog",
            status: CheckStatus::Fail,
            details: error.to_string(),
        },
    }
}

fn render_human(report: &ValidateReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
