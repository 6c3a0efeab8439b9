use anyhow::Result;
use clap::Parser;
use perfmap::cli::{Cli, Commands};
use perfmap::commands::analyze::AnalyzeConfig;
use perfmap::commands::predict::{ImportanceConfig, PredictConfig};
use perfmap::commands::simulate::SimulateConfig;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            preset,
            satisfaction,
            training,
            work_hours,
            overtime,
            sick_days,
            format,
            output,
        } => perfmap::commands::simulate::run_simulate(SimulateConfig {
            preset,
            satisfaction,
            training,
            work_hours,
            overtime,
            sick_days,
            format: format.into(),
            output,
        }),
        Commands::Analyze {
            path,
            format,
            output,
        } => perfmap::commands::analyze::run_analyze(AnalyzeConfig {
            path,
            format: format.into(),
            output,
        }),
        Commands::Predict {
            input,
            url,
            format,
            output,
        } => perfmap::commands::predict::run_predict(PredictConfig {
            input,
            url,
            format: format.into(),
            output,
        }),
        Commands::Health { url } => perfmap::commands::predict::run_health(url),
        Commands::Importance {
            url,
            format,
            output,
        } => perfmap::commands::predict::run_importance(ImportanceConfig {
            url,
            format: format.into(),
            output,
        }),
        Commands::Init { force } => perfmap::commands::init::init_config(force),
    }
}
