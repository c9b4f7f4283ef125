pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "envelop",
    about = "Envelop facade recommendation CLI",
    long_about = "Rank facade-material and glazing catalogs against customer constraints and inspect catalog schema readiness.",
    after_help = "Examples:\n  envelop recommend --catalog materials.csv --request request.toml\n  envelop glass --catalog glass.csv --set max_cost_per_sqm=250 --json\n  envelop validate --materials materials.csv --glass glass.csv"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Rank the opaque-material catalog for one customer request")]
    Recommend(commands::recommend::RecommendArgs),
    #[command(about = "Rank the glazing catalog for one customer request")]
    Glass(commands::glass::GlassArgs),
    #[command(about = "Validate catalog files against the required column schema")]
    Validate(commands::validate::ValidateArgs),
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Recommend(args) => commands::recommend::run(&args),
        Command::Glass(args) => commands::glass::run(&args),
        Command::Validate(args) => commands::validate::run(&args),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
