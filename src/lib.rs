// Export modules for library usage
pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod countup;
pub mod dataset;
pub mod io;
pub mod scenario;

// Re-export commonly used types
pub use crate::api::{
    ApiError, FeatureImportance, HealthResponse, PredictRequest, PredictResponse,
    PredictionClient, Probabilities, RiskBand,
};

pub use crate::countup::{ease_out_quart, CountUp, CountUpOptions, CountUpPhase};

pub use crate::dataset::{
    detect_format, summarize, CellValue, Dataset, DatasetError, DatasetSummary, FileFormat,
    Record,
};

pub use crate::io::output::{create_writer, OutputWriter, Report};

pub use crate::scenario::{
    classify_category, classify_direction, classify_risk,
    presets::{all_presets, find_preset, Preset},
    AdjustmentSet, Direction, Factor, FactorImpact, PerformanceCategory, RiskLevel,
    ScenarioBaseline, ScenarioResult, ScenarioSimulator,
};
