use std::path::PathBuf;

use clap::Args;
use envelop_core::{load_glass, recommend_glass, EngineConfig, NumericMode, ScoredGlass};
use serde::Serialize;

use super::{CommandResult, EXIT_NO_ELIGIBLE, EXIT_VALIDATION};

#[derive(Debug, Args)]
pub struct GlassArgs {
    /// Glazing catalog CSV.
    #[arg(long)]
    pub catalog: PathBuf,
    /// Customer request TOML; omit for an unconstrained request.
    #[arg(long)]
    pub request: Option<PathBuf>,
    /// Engine config TOML; omit for defaults.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Constraint override, e.g. --set required_u_value=1.6. Repeatable.
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub overrides: Vec<String>,
    /// Shortlist length; overrides the configured top_n_glass.
    #[arg(long)]
    pub top_n: Option<usize>,
    /// Coerce unparsable numeric input to 0 / absent instead of failing.
    #[arg(long)]
    pub lenient: bool,
    /// Emit machine-readable JSON output.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct GlassPayload<'a> {
    command: &'static str,
    status: &'static str,
    catalog_records: usize,
    shortlist: &'a [ScoredGlass],
}

pub fn run(args: &GlassArgs) -> CommandResult {
    let mut config = match EngineConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "glass",
                "config_validation",
                error.to_string(),
                EXIT_VALIDATION,
            )
        }
    };
    if let Some(top_n) = args.top_n {
        config.top_n_glass = top_n.max(1);
    }

    let mode = if args.lenient { NumericMode::Lenient } else { NumericMode::Strict };
    let catalog = match load_glass(&args.catalog, mode) {
        Ok(catalog) => catalog,
        Err(error) => {
            return CommandResult::failure(
                "glass",
                "catalog_validation",
                error.to_string(),
                EXIT_VALIDATION,
            )
        }
    };

    let request = match super::build_request(args.request.as_deref(), &args.overrides, args.lenient)
    {
        Ok(request) => request,
        Err(error) => {
            return CommandResult::failure(
                "glass",
                "request_validation",
                format!("{error:#}"),
                EXIT_VALIDATION,
            )
        }
    };

    let shortlist = recommend_glass(&catalog, &request, &config);
    if shortlist.is_empty() {
        return CommandResult::failure(
            "glass",
            "no_eligible_glazing",
            "no eligible glazing for these constraints",
            EXIT_NO_ELIGIBLE,
        );
    }

    if args.json {
        let payload = GlassPayload {
            command: "glass",
            status: "ok",
            catalog_records: catalog.len(),
            shortlist: &shortlist,
        };
        match serde_json::to_string_pretty(&payload) {
            Ok(output) => CommandResult::rendered(output),
            Err(error) => CommandResult::failure("glass", "serialization", error.to_string(), 1),
        }
    } else {
        CommandResult::rendered(render_human(&shortlist, catalog.len()))
    }
}

fn render_human(shortlist: &[ScoredGlass], catalog_records: usize) -> String {
    let mut lines = Vec::new();
    lines.push(format!("shortlisted {} of {catalog_records} glazing records", shortlist.len()));

    for (position, candidate) in shortlist.iter().enumerate() {
        lines.push(format!(
            "{}. {}: final {:.2} (thermal {:.1}, solar {:.1}, clarity {:.1}, durability {:.1}, acoustic {:.1}, cost {:.1})",
            position + 1,
            candidate.record.glass_type,
            candidate.final_score,
            candidate.thermal_score,
            candidate.solar_score,
            candidate.clarity_score,
            candidate.durability_score,
            candidate.acoustic_score,
            candidate.cost_score,
        ));
    }

    lines.join("\n")
}
