use crate::scenario::Factor;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Relative importance of each factor, taken from the deployed model's
/// feature importances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorWeights {
    #[serde(default = "default_satisfaction_weight")]
    pub satisfaction: f64,

    #[serde(default = "default_training_weight")]
    pub training: f64,

    #[serde(default = "default_work_hours_weight")]
    pub work_hours: f64,

    #[serde(default = "default_overtime_weight")]
    pub overtime: f64,

    #[serde(default = "default_sick_days_weight")]
    pub sick_days: f64,
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self {
            satisfaction: default_satisfaction_weight(),
            training: default_training_weight(),
            work_hours: default_work_hours_weight(),
            overtime: default_overtime_weight(),
            sick_days: default_sick_days_weight(),
        }
    }
}

impl FactorWeights {
    pub fn get(&self, factor: Factor) -> f64 {
        match factor {
            Factor::Satisfaction => self.satisfaction,
            Factor::Training => self.training,
            Factor::WorkHours => self.work_hours,
            Factor::Overtime => self.overtime,
            Factor::SickDays => self.sick_days,
        }
    }

    // Pure function: check a single weight is in valid range
    fn is_valid_weight(weight: f64) -> bool {
        (0.0..=1.0).contains(&weight)
    }

    pub fn validate(&self) -> Result<(), String> {
        for factor in Factor::ALL {
            let weight = self.get(factor);
            if !Self::is_valid_weight(weight) {
                return Err(format!(
                    "{} weight must be between 0.0 and 1.0, got {weight}",
                    factor.label()
                ));
            }
        }
        Ok(())
    }
}

fn default_satisfaction_weight() -> f64 {
    0.285
}

fn default_training_weight() -> f64 {
    0.198
}

fn default_work_hours_weight() -> f64 {
    0.124
}

fn default_overtime_weight() -> f64 {
    0.098
}

fn default_sick_days_weight() -> f64 {
    0.072
}

/// Signed multiplier per factor encoding whether increasing it helps (+)
/// or hurts (-) the projected score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectionMultipliers {
    #[serde(default = "default_satisfaction_multiplier")]
    pub satisfaction: f64,

    #[serde(default = "default_training_multiplier")]
    pub training: f64,

    #[serde(default = "default_work_hours_multiplier")]
    pub work_hours: f64,

    #[serde(default = "default_overtime_multiplier")]
    pub overtime: f64,

    #[serde(default = "default_sick_days_multiplier")]
    pub sick_days: f64,
}

impl Default for DirectionMultipliers {
    fn default() -> Self {
        Self {
            satisfaction: default_satisfaction_multiplier(),
            training: default_training_multiplier(),
            work_hours: default_work_hours_multiplier(),
            overtime: default_overtime_multiplier(),
            sick_days: default_sick_days_multiplier(),
        }
    }
}

impl DirectionMultipliers {
    pub fn get(&self, factor: Factor) -> f64 {
        match factor {
            Factor::Satisfaction => self.satisfaction,
            Factor::Training => self.training,
            Factor::WorkHours => self.work_hours,
            Factor::Overtime => self.overtime,
            Factor::SickDays => self.sick_days,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        for factor in Factor::ALL {
            let multiplier = self.get(factor);
            if multiplier == 0.0 || !(-1.0..=1.0).contains(&multiplier) {
                return Err(format!(
                    "{} multiplier must be nonzero and between -1.0 and 1.0, got {multiplier}",
                    factor.label()
                ));
            }
        }
        Ok(())
    }
}

fn default_satisfaction_multiplier() -> f64 {
    0.5
}

fn default_training_multiplier() -> f64 {
    0.4
}

fn default_work_hours_multiplier() -> f64 {
    -0.2
}

fn default_overtime_multiplier() -> f64 {
    -0.5
}

fn default_sick_days_multiplier() -> f64 {
    -0.6
}

/// Inclusive percentage range an adjustment slider allows.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FactorBounds {
    pub min: f64,
    pub max: f64,
}

impl FactorBounds {
    pub fn clamp(&self, pct: f64) -> f64 {
        pct.clamp(self.min, self.max)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustmentBounds {
    #[serde(default = "default_satisfaction_bounds")]
    pub satisfaction: FactorBounds,

    #[serde(default = "default_training_bounds")]
    pub training: FactorBounds,

    #[serde(default = "default_work_hours_bounds")]
    pub work_hours: FactorBounds,

    #[serde(default = "default_overtime_bounds")]
    pub overtime: FactorBounds,

    #[serde(default = "default_sick_days_bounds")]
    pub sick_days: FactorBounds,
}

impl Default for AdjustmentBounds {
    fn default() -> Self {
        Self {
            satisfaction: default_satisfaction_bounds(),
            training: default_training_bounds(),
            work_hours: default_work_hours_bounds(),
            overtime: default_overtime_bounds(),
            sick_days: default_sick_days_bounds(),
        }
    }
}

impl AdjustmentBounds {
    pub fn get(&self, factor: Factor) -> FactorBounds {
        match factor {
            Factor::Satisfaction => self.satisfaction,
            Factor::Training => self.training,
            Factor::WorkHours => self.work_hours,
            Factor::Overtime => self.overtime,
            Factor::SickDays => self.sick_days,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        for factor in Factor::ALL {
            let bounds = self.get(factor);
            if bounds.min > bounds.max {
                return Err(format!(
                    "{} bounds are inverted: min {} > max {}",
                    factor.label(),
                    bounds.min,
                    bounds.max
                ));
            }
        }
        Ok(())
    }
}

fn default_satisfaction_bounds() -> FactorBounds {
    FactorBounds {
        min: -50.0,
        max: 50.0,
    }
}

fn default_training_bounds() -> FactorBounds {
    FactorBounds {
        min: -50.0,
        max: 100.0,
    }
}

fn default_work_hours_bounds() -> FactorBounds {
    FactorBounds {
        min: -30.0,
        max: 30.0,
    }
}

fn default_overtime_bounds() -> FactorBounds {
    FactorBounds {
        min: -100.0,
        max: 100.0,
    }
}

fn default_sick_days_bounds() -> FactorBounds {
    FactorBounds {
        min: -50.0,
        max: 100.0,
    }
}

/// Session baseline: current workforce averages plus the reference score
/// the simulation starts from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaselineConfig {
    #[serde(default = "default_baseline_satisfaction")]
    pub satisfaction: f64,

    #[serde(default = "default_baseline_training_hours")]
    pub training_hours: f64,

    #[serde(default = "default_baseline_work_hours")]
    pub work_hours: f64,

    #[serde(default = "default_baseline_overtime")]
    pub overtime: f64,

    #[serde(default = "default_baseline_sick_days")]
    pub sick_days: f64,

    #[serde(default = "default_baseline_score")]
    pub score: f64,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            satisfaction: default_baseline_satisfaction(),
            training_hours: default_baseline_training_hours(),
            work_hours: default_baseline_work_hours(),
            overtime: default_baseline_overtime(),
            sick_days: default_baseline_sick_days(),
            score: default_baseline_score(),
        }
    }
}

impl BaselineConfig {
    /// The percent-change calculation divides by the score, so zero is
    /// rejected here rather than handled downstream.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.score > 0.0 && self.score <= 100.0) {
            return Err(format!(
                "baseline score must be in (0, 100], got {}",
                self.score
            ));
        }
        Ok(())
    }

    pub fn to_baseline(&self) -> crate::scenario::ScenarioBaseline {
        crate::scenario::ScenarioBaseline {
            satisfaction: self.satisfaction,
            training_hours: self.training_hours,
            work_hours: self.work_hours,
            overtime: self.overtime,
            sick_days: self.sick_days,
        }
    }
}

fn default_baseline_satisfaction() -> f64 {
    3.8
}

fn default_baseline_training_hours() -> f64 {
    35.0
}

fn default_baseline_work_hours() -> f64 {
    43.0
}

fn default_baseline_overtime() -> f64 {
    10.0
}

fn default_baseline_sick_days() -> f64 {
    5.0
}

fn default_baseline_score() -> f64 {
    75.0
}

/// Score cutoffs separating the Low/Medium/High performance categories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryThresholds {
    #[serde(default = "default_medium_threshold")]
    pub medium: f64,

    #[serde(default = "default_high_threshold")]
    pub high: f64,
}

impl Default for CategoryThresholds {
    fn default() -> Self {
        Self {
            medium: default_medium_threshold(),
            high: default_high_threshold(),
        }
    }
}

impl CategoryThresholds {
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0 < self.medium && self.medium < self.high && self.high <= 100.0) {
            return Err(format!(
                "thresholds must satisfy 0 < medium < high <= 100, got medium {} high {}",
                self.medium, self.high
            ));
        }
        Ok(())
    }
}

fn default_medium_threshold() -> f64 {
    60.0
}

fn default_high_threshold() -> f64 {
    80.0
}

/// Remote prediction service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PerfmapConfig {
    pub weights: Option<FactorWeights>,
    pub multipliers: Option<DirectionMultipliers>,
    pub bounds: Option<AdjustmentBounds>,
    pub baseline: Option<BaselineConfig>,
    pub thresholds: Option<CategoryThresholds>,
    pub api: Option<ApiConfig>,
}

static CONFIG: OnceLock<PerfmapConfig> = OnceLock::new();

/// Pure function to read config file contents
fn read_config_file(path: &Path) -> Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Pure function to parse and validate config from TOML string
pub(crate) fn parse_and_validate_config(contents: &str) -> Result<PerfmapConfig, String> {
    let mut config = toml::from_str::<PerfmapConfig>(contents)
        .map_err(|e| format!("Failed to parse .perfmap.toml: {}", e))?;

    // Invalid sections fall back to defaults instead of aborting.
    if let Some(ref weights) = config.weights {
        if let Err(e) = weights.validate() {
            eprintln!("Warning: Invalid factor weights: {}. Using defaults.", e);
            config.weights = Some(FactorWeights::default());
        }
    }
    if let Some(ref multipliers) = config.multipliers {
        if let Err(e) = multipliers.validate() {
            eprintln!("Warning: Invalid direction multipliers: {}. Using defaults.", e);
            config.multipliers = Some(DirectionMultipliers::default());
        }
    }
    if let Some(ref bounds) = config.bounds {
        if let Err(e) = bounds.validate() {
            eprintln!("Warning: Invalid adjustment bounds: {}. Using defaults.", e);
            config.bounds = Some(AdjustmentBounds::default());
        }
    }
    if let Some(ref baseline) = config.baseline {
        if let Err(e) = baseline.validate() {
            eprintln!("Warning: Invalid baseline: {}. Using defaults.", e);
            config.baseline = Some(BaselineConfig::default());
        }
    }
    if let Some(ref thresholds) = config.thresholds {
        if let Err(e) = thresholds.validate() {
            eprintln!("Warning: Invalid thresholds: {}. Using defaults.", e);
            config.thresholds = Some(CategoryThresholds::default());
        }
    }

    Ok(config)
}

/// Pure function to try loading config from a specific path
fn try_load_config_from_path(config_path: &Path) -> Option<PerfmapConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            eprintln!("Warning: {}. Using defaults.", e);
            None
        }
    }
}

/// Handle file read errors with appropriate logging
fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

pub fn load_config() -> PerfmapConfig {
    const MAX_TRAVERSAL_DEPTH: usize = 10;

    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            return PerfmapConfig::default();
        }
    };

    directory_ancestors(current, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(".perfmap.toml"))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            PerfmapConfig::default()
        })
}

/// Get the cached configuration
pub fn get_config() -> &'static PerfmapConfig {
    CONFIG.get_or_init(load_config)
}

/// Base URL for the remote prediction service, with defaults if unconfigured
pub fn get_api_base_url() -> String {
    get_config()
        .api
        .clone()
        .unwrap_or_default()
        .base_url
}
