pub mod presets;

use crate::config::{AdjustmentBounds, CategoryThresholds, DirectionMultipliers, FactorWeights, PerfmapConfig};
use serde::{Deserialize, Serialize};

/// The five workforce factors a scenario can adjust.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Factor {
    Satisfaction,
    Training,
    #[serde(rename = "Work Hours")]
    WorkHours,
    Overtime,
    #[serde(rename = "Sick Days")]
    SickDays,
}

impl Factor {
    pub const ALL: [Factor; 5] = [
        Factor::Satisfaction,
        Factor::Training,
        Factor::WorkHours,
        Factor::Overtime,
        Factor::SickDays,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Factor::Satisfaction => "Satisfaction",
            Factor::Training => "Training",
            Factor::WorkHours => "Work Hours",
            Factor::Overtime => "Overtime",
            Factor::SickDays => "Sick Days",
        }
    }

    /// Dead zone (in percent) inside which an adjustment counts as neutral.
    /// Only work hours has one: small schedule shifts cut both ways.
    pub fn dead_zone(&self) -> f64 {
        match self {
            Factor::WorkHours => 5.0,
            _ => 0.0,
        }
    }
}

/// Reference values the simulation adjusts against. Fixed for a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioBaseline {
    pub satisfaction: f64,
    pub training_hours: f64,
    pub work_hours: f64,
    pub overtime: f64,
    pub sick_days: f64,
}

impl Default for ScenarioBaseline {
    fn default() -> Self {
        Self {
            satisfaction: 3.8,
            training_hours: 35.0,
            work_hours: 43.0,
            overtime: 10.0,
            sick_days: 5.0,
        }
    }
}

impl ScenarioBaseline {
    pub fn value(&self, factor: Factor) -> f64 {
        match factor {
            Factor::Satisfaction => self.satisfaction,
            Factor::Training => self.training_hours,
            Factor::WorkHours => self.work_hours,
            Factor::Overtime => self.overtime,
            Factor::SickDays => self.sick_days,
        }
    }

    /// Baseline values with the percentage adjustments applied:
    /// `adjusted = baseline * (1 + pct / 100)`.
    pub fn adjusted(&self, adjustments: &AdjustmentSet) -> ScenarioBaseline {
        let apply = |factor: Factor| self.value(factor) * (1.0 + adjustments.get(factor) / 100.0);
        ScenarioBaseline {
            satisfaction: apply(Factor::Satisfaction),
            training_hours: apply(Factor::Training),
            work_hours: apply(Factor::WorkHours),
            overtime: apply(Factor::Overtime),
            sick_days: apply(Factor::SickDays),
        }
    }
}

/// Percentage change per factor. Zero means untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentSet {
    #[serde(default)]
    pub satisfaction: f64,
    #[serde(default)]
    pub training: f64,
    #[serde(default)]
    pub work_hours: f64,
    #[serde(default)]
    pub overtime: f64,
    #[serde(default)]
    pub sick_days: f64,
}

impl AdjustmentSet {
    pub fn get(&self, factor: Factor) -> f64 {
        match factor {
            Factor::Satisfaction => self.satisfaction,
            Factor::Training => self.training,
            Factor::WorkHours => self.work_hours,
            Factor::Overtime => self.overtime,
            Factor::SickDays => self.sick_days,
        }
    }

    pub fn set(&mut self, factor: Factor, pct: f64) {
        match factor {
            Factor::Satisfaction => self.satisfaction = pct,
            Factor::Training => self.training = pct,
            Factor::WorkHours => self.work_hours = pct,
            Factor::Overtime => self.overtime = pct,
            Factor::SickDays => self.sick_days = pct,
        }
    }

    /// Clamp every adjustment into its per-factor range. Out-of-range input
    /// is a caller bypassing the UI, not an error.
    pub fn clamped(&self, bounds: &AdjustmentBounds) -> AdjustmentSet {
        let mut clamped = AdjustmentSet::default();
        for factor in Factor::ALL {
            clamped.set(factor, bounds.get(factor).clamp(self.get(factor)));
        }
        clamped
    }

    pub fn is_zero(&self) -> bool {
        Factor::ALL.iter().all(|&f| self.get(f) == 0.0)
    }
}

/// Whether a factor's adjustment helps, hurts, or leaves the outcome alone.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Positive,
    Negative,
    Neutral,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Positive => write!(f, "positive"),
            Direction::Negative => write!(f, "negative"),
            Direction::Neutral => write!(f, "neutral"),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorImpact {
    pub factor: Factor,
    pub impact: f64,
    pub direction: Direction,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PerformanceCategory {
    Low,    // score < 60
    Medium, // 60 <= score < 80
    High,   // score >= 80
}

impl std::fmt::Display for PerformanceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PerformanceCategory::Low => write!(f, "Low"),
            PerformanceCategory::Medium => write!(f, "Medium"),
            PerformanceCategory::High => write!(f, "High"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,    // no factors moved unfavorably
    Medium, // 1-2 unfavorable factors
    High,   // 3+ unfavorable factors
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

/// Outcome of one simulation run. Computed fresh on every request.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResult {
    pub baseline_score: f64,
    pub new_score: f64,
    pub delta: f64,
    pub percent_change: f64,
    pub category: PerformanceCategory,
    pub risk_level: RiskLevel,
    pub impact_breakdown: Vec<FactorImpact>,
}

/// Weighted linear impact model over the five adjustable factors.
///
/// Weights come from the deployed model's feature importances; direction
/// multipliers encode the domain sign conventions (more training helps,
/// more overtime hurts). Both are fixed constants, never learned here.
pub struct ScenarioSimulator {
    pub weights: FactorWeights,
    pub multipliers: DirectionMultipliers,
    pub bounds: AdjustmentBounds,
    pub baseline_score: f64,
    pub thresholds: CategoryThresholds,
}

impl Default for ScenarioSimulator {
    fn default() -> Self {
        Self {
            weights: FactorWeights::default(),
            multipliers: DirectionMultipliers::default(),
            bounds: AdjustmentBounds::default(),
            baseline_score: 75.0,
            thresholds: CategoryThresholds::default(),
        }
    }
}

impl ScenarioSimulator {
    pub fn from_config(config: &PerfmapConfig) -> Self {
        Self {
            weights: config.weights.clone().unwrap_or_default(),
            multipliers: config.multipliers.clone().unwrap_or_default(),
            bounds: config.bounds.clone().unwrap_or_default(),
            baseline_score: config.baseline.clone().unwrap_or_default().score,
            thresholds: config.thresholds.clone().unwrap_or_default(),
        }
    }

    /// Run the scenario. Total over its input domain: adjustments beyond the
    /// declared bounds are clamped, and the projected score is clamped to
    /// [0, 100].
    pub fn simulate(&self, adjustments: &AdjustmentSet) -> ScenarioResult {
        let adjustments = adjustments.clamped(&self.bounds);

        let impact_breakdown: Vec<FactorImpact> = Factor::ALL
            .iter()
            .map(|&factor| self.factor_impact(factor, adjustments.get(factor)))
            .collect();

        let total_impact: f64 = impact_breakdown.iter().map(|i| i.impact).sum();
        let new_score = (self.baseline_score + total_impact).clamp(0.0, 100.0);
        let delta = new_score - self.baseline_score;
        let percent_change = delta / self.baseline_score * 100.0;

        ScenarioResult {
            baseline_score: self.baseline_score,
            new_score: round1(new_score),
            delta: round1(delta),
            percent_change: round1(percent_change),
            category: classify_category(new_score, &self.thresholds),
            risk_level: classify_risk(&impact_breakdown),
            impact_breakdown,
        }
    }

    fn factor_impact(&self, factor: Factor, pct: f64) -> FactorImpact {
        let multiplier = self.multipliers.get(factor);
        FactorImpact {
            factor,
            impact: pct * self.weights.get(factor) * multiplier,
            direction: classify_direction(pct, multiplier, factor.dead_zone()),
        }
    }
}

/// Pure function: direction of a single adjustment. Adjustments inside the
/// dead zone are neutral; otherwise the sign of pct against the multiplier's
/// sign decides.
pub fn classify_direction(pct: f64, multiplier: f64, dead_zone: f64) -> Direction {
    if pct.abs() <= dead_zone {
        Direction::Neutral
    } else if pct * multiplier > 0.0 {
        Direction::Positive
    } else {
        Direction::Negative
    }
}

/// Pure function: category from a score via fixed thresholds.
pub fn classify_category(score: f64, thresholds: &CategoryThresholds) -> PerformanceCategory {
    if score < thresholds.medium {
        PerformanceCategory::Low
    } else if score < thresholds.high {
        PerformanceCategory::Medium
    } else {
        PerformanceCategory::High
    }
}

/// Pure function: risk level from the count of unfavorable factors.
pub fn classify_risk(breakdown: &[FactorImpact]) -> RiskLevel {
    let negative = breakdown
        .iter()
        .filter(|i| i.direction == Direction::Negative)
        .count();
    match negative {
        0 => RiskLevel::Low,
        1..=2 => RiskLevel::Medium,
        _ => RiskLevel::High,
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simulator() -> ScenarioSimulator {
        ScenarioSimulator::default()
    }

    #[test]
    fn test_zero_adjustments_leave_score_unchanged() {
        let result = simulator().simulate(&AdjustmentSet::default());

        assert_eq!(result.delta, 0.0);
        assert_eq!(result.new_score, result.baseline_score);
        assert_eq!(result.percent_change, 0.0);
        assert_eq!(result.category, PerformanceCategory::Medium);
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert!(result
            .impact_breakdown
            .iter()
            .all(|i| i.direction == Direction::Neutral && i.impact == 0.0));
    }

    #[test]
    fn test_new_score_is_clamped() {
        let maxed = AdjustmentSet {
            satisfaction: 50.0,
            training: 100.0,
            work_hours: -30.0,
            overtime: -100.0,
            sick_days: -50.0,
        };
        let result = simulator().simulate(&maxed);
        assert!(result.new_score <= 100.0);

        let floored = AdjustmentSet {
            satisfaction: -50.0,
            training: -50.0,
            work_hours: 30.0,
            overtime: 100.0,
            sick_days: 100.0,
        };
        let result = simulator().simulate(&floored);
        assert!(result.new_score >= 0.0);
    }

    #[test]
    fn test_out_of_bounds_adjustments_clamp_instead_of_failing() {
        let wild = AdjustmentSet {
            satisfaction: 500.0,
            training: -900.0,
            work_hours: 300.0,
            overtime: 1000.0,
            sick_days: -999.0,
        };
        let bounded = AdjustmentSet {
            satisfaction: 50.0,
            training: -50.0,
            work_hours: 30.0,
            overtime: 100.0,
            sick_days: -50.0,
        };
        let sim = simulator();
        let wild_result = sim.simulate(&wild);
        let bounded_result = sim.simulate(&bounded);
        assert_eq!(wild_result.new_score, bounded_result.new_score);
    }

    #[test]
    fn test_category_thresholds() {
        let thresholds = CategoryThresholds::default();
        assert_eq!(classify_category(0.0, &thresholds), PerformanceCategory::Low);
        assert_eq!(classify_category(59.9, &thresholds), PerformanceCategory::Low);
        assert_eq!(classify_category(60.0, &thresholds), PerformanceCategory::Medium);
        assert_eq!(classify_category(79.9, &thresholds), PerformanceCategory::Medium);
        assert_eq!(classify_category(80.0, &thresholds), PerformanceCategory::High);
        assert_eq!(classify_category(100.0, &thresholds), PerformanceCategory::High);
    }

    #[test]
    fn test_risk_level_counts_negative_directions() {
        // Overtime and sick days up: two unfavorable factors.
        let result = simulator().simulate(&AdjustmentSet {
            overtime: 20.0,
            sick_days: 10.0,
            ..Default::default()
        });
        assert_eq!(result.risk_level, RiskLevel::Medium);

        // Add long work hours: three unfavorable factors.
        let result = simulator().simulate(&AdjustmentSet {
            overtime: 20.0,
            sick_days: 10.0,
            work_hours: 20.0,
            ..Default::default()
        });
        assert_eq!(result.risk_level, RiskLevel::High);
    }

    #[test]
    fn test_work_hours_dead_zone() {
        let sim = simulator();

        let small = sim.simulate(&AdjustmentSet {
            work_hours: 5.0,
            ..Default::default()
        });
        let work_hours = &small.impact_breakdown[2];
        assert_eq!(work_hours.factor, Factor::WorkHours);
        assert_eq!(work_hours.direction, Direction::Neutral);

        let large = sim.simulate(&AdjustmentSet {
            work_hours: 10.0,
            ..Default::default()
        });
        assert_eq!(large.impact_breakdown[2].direction, Direction::Negative);

        let reduced = sim.simulate(&AdjustmentSet {
            work_hours: -10.0,
            ..Default::default()
        });
        assert_eq!(reduced.impact_breakdown[2].direction, Direction::Positive);
    }

    #[test]
    fn test_overtime_reduction_is_favorable() {
        let result = simulator().simulate(&AdjustmentSet {
            overtime: -50.0,
            ..Default::default()
        });
        let overtime = &result.impact_breakdown[3];
        assert_eq!(overtime.direction, Direction::Positive);
        assert!(overtime.impact > 0.0);
        assert!(result.delta > 0.0);
    }

    #[test]
    fn test_adjusted_baseline_values() {
        let baseline = ScenarioBaseline::default();
        let adjusted = baseline.adjusted(&AdjustmentSet {
            training: 20.0,
            overtime: -50.0,
            ..Default::default()
        });
        assert!((adjusted.training_hours - 42.0).abs() < 1e-9);
        assert!((adjusted.overtime - 5.0).abs() < 1e-9);
        assert_eq!(adjusted.satisfaction, baseline.satisfaction);
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let result = simulator().simulate(&AdjustmentSet::default());
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("baselineScore").is_some());
        assert!(json.get("impactBreakdown").is_some());
        assert_eq!(json["riskLevel"], "low");
        assert_eq!(json["category"], "Medium");
    }
}
