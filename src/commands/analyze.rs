use crate::config;
use crate::dataset::{summarize, Dataset};
use crate::io::output::{create_writer, OutputFormat, Report};
use anyhow::Result;
use std::path::PathBuf;

pub struct AnalyzeConfig {
    pub path: PathBuf,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

pub fn run_analyze(config: AnalyzeConfig) -> Result<()> {
    let dataset = Dataset::load(&config.path)?;
    log::debug!(
        "loaded {} records with {} columns from {}",
        dataset.records.len(),
        dataset.columns.len(),
        config.path.display()
    );

    let thresholds = config::get_config().thresholds.clone().unwrap_or_default();
    let summary = summarize(&dataset, &thresholds);

    let mut writer = create_writer(config.output.as_deref(), config.format)?;
    writer.write_report(&Report::Dataset(summary))
}
