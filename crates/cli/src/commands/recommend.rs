use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use envelop_core::{
    load_materials, rank_materials, EngineConfig, Indicator, LinearPredictor, NumericMode,
    RankError, Recommendation,
};
use serde::Serialize;

use super::{CommandResult, EXIT_NO_ELIGIBLE, EXIT_VALIDATION};

#[derive(Debug, Args)]
pub struct RecommendArgs {
    /// Opaque-material catalog CSV.
    #[arg(long)]
    pub catalog: PathBuf,
    /// Customer request TOML; omit for an unconstrained request.
    #[arg(long)]
    pub request: Option<PathBuf>,
    /// Engine config TOML; omit for defaults.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Constraint override, e.g. --set max_cost_per_sqm=250. Repeatable.
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub overrides: Vec<String>,
    /// Coerce unparsable numeric input to 0 / absent instead of failing.
    #[arg(long)]
    pub lenient: bool,
    /// Emit machine-readable JSON output.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct RecommendPayload<'a> {
    command: &'static str,
    status: &'static str,
    catalog_records: usize,
    #[serde(flatten)]
    recommendation: &'a Recommendation,
}

pub fn run(args: &RecommendArgs) -> CommandResult {
    let config = match EngineConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "recommend",
                "config_validation",
                error.to_string(),
                EXIT_VALIDATION,
            )
        }
    };

    let mode = if args.lenient { NumericMode::Lenient } else { NumericMode::Strict };
    let catalog = match load_materials(&args.catalog, mode) {
        Ok(catalog) => catalog,
        Err(error) => {
            return CommandResult::failure(
                "recommend",
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
                "recommend",
                "request_validation",
                format!("{error:#}"),
                EXIT_VALIDATION,
            )
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure("recommend", "runtime", error.to_string(), 1)
        }
    };

    let outcome = runtime.block_on(rank_materials(
        &catalog,
        &request,
        Arc::new(LinearPredictor::new()),
        &config,
    ));

    match outcome {
        Ok(recommendation) => {
            if args.json {
                render_json(&recommendation, catalog.len())
            } else {
                CommandResult::rendered(render_human(
                    &recommendation,
                    catalog.len(),
                    request.max_cost_per_sqm,
                ))
            }
        }
        Err(RankError::NoEligibleMaterial) => CommandResult::failure(
            "recommend",
            "no_eligible_material",
            "no eligible material for these constraints",
            EXIT_NO_ELIGIBLE,
        ),
        Err(error) => CommandResult::failure("recommend", "ranking", error.to_string(), 1),
    }
}

fn render_json(recommendation: &Recommendation, catalog_records: usize) -> CommandResult {
    let payload = RecommendPayload {
        command: "recommend",
        status: "ok",
        catalog_records,
        recommendation,
    };
    match serde_json::to_string_pretty(&payload) {
        Ok(output) => CommandResult::rendered(output),
        Err(error) => CommandResult::failure("recommend", "serialization", error.to_string(), 1),
    }
}

fn render_human(
    recommendation: &Recommendation,
    catalog_records: usize,
    max_cost_per_sqm: Option<f64>,
) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "shortlisted {} of {} catalog records",
        recommendation.shortlist.len(),
        catalog_records
    ));
    lines.push(format!(
        "summary: suitability {:.2}, thermal {:.2}, cost estimate {:.2}",
        recommendation.suitability_score, recommendation.thermal_perf, recommendation.cost_est
    ));
    if recommendation.budget_warning {
        lines.push(match max_cost_per_sqm {
            Some(limit) => {
                format!("budget warning: at least one shortlisted material exceeds {limit:.2}/sqm")
            }
            None => "budget warning: no cost ceiling was set".to_owned(),
        });
    }

    for (position, entry) in recommendation.shortlist.iter().enumerate() {
        lines.push(format!(
            "{}. {} ({}): score {:.2}, thermal {:.2} [{}], cost {:.2} [{}]",
            position + 1,
            entry.prediction.material_type,
            entry.prediction.material_id,
            entry.prediction.score,
            entry.prediction.thermal,
            marker(entry.thermal_indicator),
            entry.prediction.cost,
            marker(entry.cost_indicator),
        ));
    }

    lines.join("\n")
}

fn marker(indicator: Indicator) -> &'static str {
    match indicator {
        Indicator::Green => "green",
        Indicator::Red => "red",
    }
}
