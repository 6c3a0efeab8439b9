use crate::api::{FeatureImportance, HealthResponse, PredictResponse};
use crate::dataset::DatasetSummary;
use crate::scenario::{Direction, ScenarioResult};
use chrono::Utc;
use colored::*;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

/// Everything the CLI can render, in one place so writers stay exhaustive.
#[derive(Serialize)]
#[serde(untagged)]
pub enum Report {
    Scenario(ScenarioResult),
    Dataset(DatasetSummary),
    Prediction(PredictResponse),
    Health(HealthResponse),
    Importance(Vec<FeatureImportance>),
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_header(&mut self, title: &str) -> anyhow::Result<()> {
        writeln!(self.writer, "# {title}")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_scenario(&mut self, result: &ScenarioResult) -> anyhow::Result<()> {
        self.write_header("Scenario Simulation")?;

        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(self.writer, "| Baseline score | {} |", result.baseline_score)?;
        writeln!(self.writer, "| Projected score | {} |", result.new_score)?;
        writeln!(self.writer, "| Change | {:+} |", result.delta)?;
        writeln!(self.writer, "| Percent change | {:+}% |", result.percent_change)?;
        writeln!(self.writer, "| Category | {} |", result.category)?;
        writeln!(self.writer, "| Risk level | {} |", result.risk_level)?;
        writeln!(self.writer)?;

        writeln!(self.writer, "## Factor Impact Breakdown")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Factor | Impact | Direction |")?;
        writeln!(self.writer, "|--------|--------|-----------|")?;
        for item in &result.impact_breakdown {
            writeln!(
                self.writer,
                "| {} | {:+.2} | {} |",
                item.factor.label(),
                item.impact,
                item.direction
            )?;
        }
        Ok(())
    }

    fn write_dataset(&mut self, summary: &DatasetSummary) -> anyhow::Result<()> {
        self.write_header("Dataset Summary")?;

        writeln!(self.writer, "Records: {}", summary.record_count)?;
        writeln!(self.writer, "Columns: {}", summary.column_count)?;
        writeln!(self.writer)?;

        writeln!(self.writer, "## Numeric Columns")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Column | Count | Mean | Min | Max |")?;
        writeln!(self.writer, "|--------|-------|------|-----|-----|")?;
        for column in &summary.numeric_columns {
            writeln!(
                self.writer,
                "| {} | {} | {:.2} | {} | {} |",
                column.column, column.count, column.mean, column.min, column.max
            )?;
        }

        if let Some(ref distribution) = summary.performance {
            writeln!(self.writer)?;
            writeln!(self.writer, "## Performance Categories")?;
            writeln!(self.writer)?;
            writeln!(self.writer, "- Low: {}", distribution.low)?;
            writeln!(self.writer, "- Medium: {}", distribution.medium)?;
            writeln!(self.writer, "- High: {}", distribution.high)?;
        }
        Ok(())
    }

    fn write_prediction(&mut self, response: &PredictResponse) -> anyhow::Result<()> {
        self.write_header("Prediction")?;

        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(self.writer, "| Performance score | {:.1} |", response.performance_score)?;
        writeln!(self.writer, "| Confidence | {:.0}% |", response.confidence * 100.0)?;
        writeln!(self.writer, "| Risk level | {:?} |", response.risk_level)?;
        writeln!(self.writer)?;

        if !response.recommendations.is_empty() {
            writeln!(self.writer, "## Recommendations")?;
            writeln!(self.writer)?;
            for recommendation in &response.recommendations {
                writeln!(self.writer, "- {recommendation}")?;
            }
        }
        Ok(())
    }

    fn write_importance(&mut self, features: &[FeatureImportance]) -> anyhow::Result<()> {
        self.write_header("Feature Importance")?;

        writeln!(self.writer, "| Feature | Importance |")?;
        writeln!(self.writer, "|---------|------------|")?;
        for feature in features {
            writeln!(self.writer, "| {} | {:.3} |", feature.feature, feature.importance)?;
        }
        Ok(())
    }

    fn write_health(&mut self, health: &HealthResponse) -> anyhow::Result<()> {
        self.write_header("Service Health")?;
        writeln!(self.writer, "- Status: {}", health.status)?;
        writeln!(self.writer, "- Model loaded: {}", health.model_loaded)?;
        if let Some(ref version) = health.version {
            writeln!(self.writer, "- Version: {version}")?;
        }
        Ok(())
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()> {
        match report {
            Report::Scenario(result) => self.write_scenario(result),
            Report::Dataset(summary) => self.write_dataset(summary),
            Report::Prediction(response) => self.write_prediction(response),
            Report::Health(health) => self.write_health(health),
            Report::Importance(features) => self.write_importance(features),
        }
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_scenario(&mut self, result: &ScenarioResult) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "Scenario Simulation".bold())?;
        writeln!(self.writer)?;
        writeln!(self.writer, "  Baseline:  {}", result.baseline_score)?;
        writeln!(self.writer, "  Projected: {}", result.new_score)?;

        let delta = format!("{:+} ({:+}%)", result.delta, result.percent_change);
        let delta = if result.delta > 0.0 {
            delta.green()
        } else if result.delta < 0.0 {
            delta.red()
        } else {
            delta.normal()
        };
        writeln!(self.writer, "  Change:    {delta}")?;

        let category = match result.category {
            crate::scenario::PerformanceCategory::High => result.category.to_string().green(),
            crate::scenario::PerformanceCategory::Medium => result.category.to_string().yellow(),
            crate::scenario::PerformanceCategory::Low => result.category.to_string().red(),
        };
        let risk = match result.risk_level {
            crate::scenario::RiskLevel::Low => result.risk_level.to_string().green(),
            crate::scenario::RiskLevel::Medium => result.risk_level.to_string().yellow(),
            crate::scenario::RiskLevel::High => result.risk_level.to_string().red(),
        };
        writeln!(self.writer, "  Category:  {category} performer")?;
        writeln!(self.writer, "  Risk:      {risk}")?;
        writeln!(self.writer)?;

        writeln!(self.writer, "{}", "Factor impacts".bold())?;
        for item in &result.impact_breakdown {
            let impact = format!("{:+.2}", item.impact);
            let impact = match item.direction {
                Direction::Positive => impact.green(),
                Direction::Negative => impact.red(),
                Direction::Neutral => impact.dimmed(),
            };
            writeln!(self.writer, "  {:<12} {impact}", item.factor.label())?;
        }
        Ok(())
    }

    fn write_dataset(&mut self, summary: &DatasetSummary) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "Dataset Summary".bold())?;
        writeln!(self.writer)?;
        writeln!(self.writer, "  Records: {}", summary.record_count)?;
        writeln!(self.writer, "  Columns: {}", summary.column_count)?;
        writeln!(self.writer)?;
        for column in &summary.numeric_columns {
            writeln!(
                self.writer,
                "  {:<24} n={:<5} mean={:<10.2} min={:<8} max={:<8}",
                column.column, column.count, column.mean, column.min, column.max
            )?;
        }
        if let Some(ref distribution) = summary.performance {
            writeln!(self.writer)?;
            writeln!(
                self.writer,
                "  Performance: {} / {} / {}",
                format!("{} low", distribution.low).red(),
                format!("{} medium", distribution.medium).yellow(),
                format!("{} high", distribution.high).green(),
            )?;
        }
        Ok(())
    }

    fn write_prediction(&mut self, response: &PredictResponse) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "Prediction".bold())?;
        writeln!(self.writer)?;
        writeln!(self.writer, "  Score:      {:.1}", response.performance_score)?;
        writeln!(self.writer, "  Confidence: {:.0}%", response.confidence * 100.0)?;
        writeln!(self.writer, "  Risk:       {:?}", response.risk_level)?;
        writeln!(
            self.writer,
            "  Probabilities: low {:.2} / medium {:.2} / high {:.2}",
            response.probabilities.low, response.probabilities.medium, response.probabilities.high
        )?;
        for recommendation in &response.recommendations {
            writeln!(self.writer, "  - {recommendation}")?;
        }
        Ok(())
    }

    fn write_importance(&mut self, features: &[FeatureImportance]) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "Feature Importance".bold())?;
        for feature in features {
            writeln!(self.writer, "  {:<32} {:.3}", feature.feature, feature.importance)?;
        }
        Ok(())
    }

    fn write_health(&mut self, health: &HealthResponse) -> anyhow::Result<()> {
        let loaded = if health.model_loaded {
            "model loaded".green()
        } else {
            "model not loaded".red()
        };
        write!(self.writer, "{}: {loaded}", health.status)?;
        if let Some(ref version) = health.version {
            write!(self.writer, " (v{version})")?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()> {
        match report {
            Report::Scenario(result) => self.write_scenario(result),
            Report::Dataset(summary) => self.write_dataset(summary),
            Report::Prediction(response) => self.write_prediction(response),
            Report::Health(health) => self.write_health(health),
            Report::Importance(features) => self.write_importance(features),
        }
    }
}

/// Build a writer for the requested format, targeting a file when `output`
/// is given and stdout otherwise.
pub fn create_writer(
    output: Option<&Path>,
    format: OutputFormat,
) -> anyhow::Result<Box<dyn OutputWriter>> {
    let destination: Box<dyn Write> = match output {
        Some(path) => Box::new(std::fs::File::create(path)?),
        None => Box::new(std::io::stdout()),
    };
    Ok(match format {
        OutputFormat::Json => Box::new(JsonWriter::new(destination)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(destination)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(destination)),
    })
}
