use crate::config;
use crate::io::output::{create_writer, OutputFormat, Report};
use crate::scenario::presets::find_preset;
use crate::scenario::{AdjustmentSet, Factor, ScenarioSimulator};
use anyhow::{Context, Result};
use std::path::PathBuf;

pub struct SimulateConfig {
    pub preset: Option<String>,
    pub satisfaction: Option<f64>,
    pub training: Option<f64>,
    pub work_hours: Option<f64>,
    pub overtime: Option<f64>,
    pub sick_days: Option<f64>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

pub fn run_simulate(config: SimulateConfig) -> Result<()> {
    let adjustments = build_adjustments(&config)?;

    let app_config = config::get_config();
    let simulator = ScenarioSimulator::from_config(app_config);
    let baseline = app_config.baseline.clone().unwrap_or_default().to_baseline();
    log::debug!(
        "adjusted factor values: {:?}",
        baseline.adjusted(&adjustments)
    );

    let result = simulator.simulate(&adjustments);

    let mut writer = create_writer(config.output.as_deref(), config.format)?;
    writer.write_report(&Report::Scenario(result))
}

/// Pure function: preset first, explicit flags override per factor.
fn build_adjustments(config: &SimulateConfig) -> Result<AdjustmentSet> {
    let mut adjustments = match &config.preset {
        Some(slug) => {
            find_preset(slug)
                .with_context(|| format!("unknown preset: {slug}"))?
                .adjustments
        }
        None => AdjustmentSet::default(),
    };

    let overrides = [
        (Factor::Satisfaction, config.satisfaction),
        (Factor::Training, config.training),
        (Factor::WorkHours, config.work_hours),
        (Factor::Overtime, config.overtime),
        (Factor::SickDays, config.sick_days),
    ];
    for (factor, pct) in overrides {
        if let Some(pct) = pct {
            adjustments.set(factor, pct);
        }
    }

    Ok(adjustments)
}
