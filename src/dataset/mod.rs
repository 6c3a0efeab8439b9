//! Loosely-typed ingestion of uploaded employee datasets (CSV or JSON) and
//! summary statistics over them.

use crate::config::CategoryThresholds;
use crate::scenario::{classify_category, PerformanceCategory};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {detail}")]
    Parse { path: String, detail: String },

    #[error("unsupported file extension for {0} (expected .csv or .json)")]
    UnsupportedFormat(String),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Json,
}

/// One cell of an uploaded record. Upload rows have an arbitrary shape, so
/// values are resolved to this tagged union at parse time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Null,
}

impl CellValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

pub type Record = BTreeMap<String, CellValue>;

#[derive(Clone, Debug, Default, Serialize)]
pub struct Dataset {
    /// Column names in first-seen order.
    pub columns: Vec<String>,
    pub records: Vec<Record>,
}

impl Dataset {
    /// Load a dataset from disk, detecting the format from the extension.
    pub fn load(path: &Path) -> Result<Dataset, DatasetError> {
        let format = detect_format(path)?;
        let contents = std::fs::read_to_string(path).map_err(|e| DatasetError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Dataset::parse(&contents, format).map_err(|e| match e {
            DatasetError::Parse { detail, .. } => DatasetError::Parse {
                path: path.display().to_string(),
                detail,
            },
            other => other,
        })
    }

    /// Parse dataset text in the given format.
    pub fn parse(contents: &str, format: FileFormat) -> Result<Dataset, DatasetError> {
        match format {
            FileFormat::Csv => parse_csv(contents),
            FileFormat::Json => parse_json(contents),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Detect file format from extension.
pub fn detect_format(path: &Path) -> Result<FileFormat, DatasetError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => Ok(FileFormat::Csv),
        Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(FileFormat::Json),
        _ => Err(DatasetError::UnsupportedFormat(path.display().to_string())),
    }
}

fn parse_error(detail: impl Into<String>) -> DatasetError {
    DatasetError::Parse {
        path: "<input>".to_string(),
        detail: detail.into(),
    }
}

/// Pure function: resolve one raw CSV field to a cell value.
fn infer_cell(raw: &str) -> CellValue {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return CellValue::Null;
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => CellValue::Number(n),
        _ => CellValue::Text(trimmed.to_string()),
    }
}

fn parse_csv(contents: &str) -> Result<Dataset, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(contents.as_bytes());

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| parse_error(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.map_err(|e| parse_error(e.to_string()))?;
        let mut record = Record::new();
        for (column, raw) in columns.iter().zip(row.iter()) {
            record.insert(column.clone(), infer_cell(raw));
        }
        records.push(record);
    }

    Ok(Dataset { columns, records })
}

/// Pure function: resolve one JSON value to a cell value. Non-scalar shapes
/// degrade to text rather than failing the whole upload.
fn json_cell(value: &serde_json::Value) -> CellValue {
    match value {
        serde_json::Value::Null => CellValue::Null,
        serde_json::Value::Number(n) => match n.as_f64() {
            Some(f) => CellValue::Number(f),
            None => CellValue::Text(n.to_string()),
        },
        serde_json::Value::String(s) => CellValue::Text(s.clone()),
        serde_json::Value::Bool(b) => CellValue::Text(b.to_string()),
        other => CellValue::Text(other.to_string()),
    }
}

fn parse_json(contents: &str) -> Result<Dataset, DatasetError> {
    let rows: Vec<serde_json::Map<String, serde_json::Value>> =
        serde_json::from_str(contents).map_err(|e| parse_error(e.to_string()))?;

    let mut columns: Vec<String> = Vec::new();
    let mut records = Vec::new();
    for row in &rows {
        let mut record = Record::new();
        for (key, value) in row {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
            record.insert(key.clone(), json_cell(value));
        }
        records.push(record);
    }

    Ok(Dataset { columns, records })
}

#[derive(Clone, Debug, Serialize)]
pub struct ColumnSummary {
    pub column: String,
    /// Number of rows holding a numeric value in this column.
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct CategoryDistribution {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct DatasetSummary {
    pub record_count: usize,
    pub column_count: usize,
    pub numeric_columns: Vec<ColumnSummary>,
    /// Present when the dataset carries a performance-score column.
    pub performance: Option<CategoryDistribution>,
}

/// Summarize a dataset: per-column numeric stats plus, when a performance
/// score column exists, its Low/Medium/High distribution.
pub fn summarize(dataset: &Dataset, thresholds: &CategoryThresholds) -> DatasetSummary {
    let numeric_columns: Vec<ColumnSummary> = dataset
        .columns
        .iter()
        .filter_map(|column| summarize_column(dataset, column))
        .collect();

    let performance = find_performance_column(dataset)
        .map(|column| category_distribution(dataset, &column, thresholds));

    DatasetSummary {
        record_count: dataset.records.len(),
        column_count: dataset.columns.len(),
        numeric_columns,
        performance,
    }
}

/// Pure function: stats for one column, None when it has no numeric cells.
fn summarize_column(dataset: &Dataset, column: &str) -> Option<ColumnSummary> {
    let values: Vec<f64> = dataset
        .records
        .iter()
        .filter_map(|r| r.get(column).and_then(CellValue::as_number))
        .collect();
    if values.is_empty() {
        return None;
    }

    let sum: f64 = values.iter().sum();
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    Some(ColumnSummary {
        column: column.to_string(),
        count: values.len(),
        mean: sum / values.len() as f64,
        min,
        max,
    })
}

/// First column whose name mentions "performance" and holds numbers.
fn find_performance_column(dataset: &Dataset) -> Option<String> {
    dataset
        .columns
        .iter()
        .find(|column| {
            column.to_lowercase().contains("performance")
                && dataset
                    .records
                    .iter()
                    .any(|r| r.get(*column).and_then(CellValue::as_number).is_some())
        })
        .cloned()
}

fn category_distribution(
    dataset: &Dataset,
    column: &str,
    thresholds: &CategoryThresholds,
) -> CategoryDistribution {
    let mut distribution = CategoryDistribution::default();
    for record in &dataset.records {
        if let Some(score) = record.get(column).and_then(CellValue::as_number) {
            match classify_category(score, thresholds) {
                PerformanceCategory::Low => distribution.low += 1,
                PerformanceCategory::Medium => distribution.medium += 1,
                PerformanceCategory::High => distribution.high += 1,
            }
        }
    }
    distribution
}
