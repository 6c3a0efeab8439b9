use crate::api::{PredictRequest, PredictionClient};
use crate::config;
use crate::io::output::{create_writer, OutputFormat, Report};
use crate::io::read_file;
use anyhow::{Context, Result};
use std::path::PathBuf;

pub struct PredictConfig {
    pub input: PathBuf,
    pub url: Option<String>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

fn resolve_base_url(url: Option<String>) -> String {
    url.unwrap_or_else(config::get_api_base_url)
}

pub fn run_predict(config: PredictConfig) -> Result<()> {
    let contents = read_file(&config.input)
        .with_context(|| format!("failed to read {}", config.input.display()))?;
    let request: PredictRequest = serde_json::from_str(&contents)
        .with_context(|| format!("invalid feature record in {}", config.input.display()))?;

    let client = PredictionClient::new(resolve_base_url(config.url))?;
    let response = client.predict(&request)?;

    let mut writer = create_writer(config.output.as_deref(), config.format)?;
    writer.write_report(&Report::Prediction(response))
}

pub fn run_health(url: Option<String>) -> Result<()> {
    let client = PredictionClient::new(resolve_base_url(url))?;
    let health = client.health()?;

    let mut writer = create_writer(None, OutputFormat::Terminal)?;
    writer.write_report(&Report::Health(health))
}

pub struct ImportanceConfig {
    pub url: Option<String>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

pub fn run_importance(config: ImportanceConfig) -> Result<()> {
    let client = PredictionClient::new(resolve_base_url(config.url))?;
    let features = client.feature_importance()?;

    let mut writer = create_writer(config.output.as_deref(), config.format)?;
    writer.write_report(&Report::Importance(features))
}
