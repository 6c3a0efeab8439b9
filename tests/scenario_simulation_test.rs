use perfmap::*;
use pretty_assertions::assert_eq;

fn simulator() -> ScenarioSimulator {
    ScenarioSimulator::default()
}

#[test]
fn zero_adjustments_yield_zero_delta() {
    let result = simulator().simulate(&AdjustmentSet::default());
    assert_eq!(result.delta, 0.0);
    assert_eq!(result.new_score, result.baseline_score);
}

#[test]
fn new_score_stays_in_unit_interval_for_extreme_vectors() {
    let sim = simulator();
    let extremes = [
        AdjustmentSet {
            satisfaction: 50.0,
            training: 100.0,
            work_hours: -30.0,
            overtime: -100.0,
            sick_days: -50.0,
        },
        AdjustmentSet {
            satisfaction: -50.0,
            training: -50.0,
            work_hours: 30.0,
            overtime: 100.0,
            sick_days: 100.0,
        },
        AdjustmentSet {
            satisfaction: 1e9,
            training: -1e9,
            work_hours: 1e9,
            overtime: 1e9,
            sick_days: 1e9,
        },
    ];
    for adjustments in extremes {
        let result = sim.simulate(&adjustments);
        assert!(
            (0.0..=100.0).contains(&result.new_score),
            "score {} out of range",
            result.new_score
        );
    }
}

#[test]
fn categories_follow_fixed_thresholds() {
    // Drive the projected score down below 60 and up above 80 and check the
    // category tracks the projected score, not the baseline.
    let sim = simulator();

    let crushed = sim.simulate(&AdjustmentSet {
        satisfaction: -50.0,
        training: -50.0,
        work_hours: 30.0,
        overtime: 100.0,
        sick_days: 100.0,
    });
    assert!(crushed.new_score < 60.0);
    assert_eq!(crushed.category, PerformanceCategory::Low);

    let boosted = sim.simulate(&AdjustmentSet {
        satisfaction: 50.0,
        training: 100.0,
        work_hours: -30.0,
        overtime: -100.0,
        sick_days: -50.0,
    });
    assert!(boosted.new_score >= 80.0);
    assert_eq!(boosted.category, PerformanceCategory::High);

    let unchanged = sim.simulate(&AdjustmentSet::default());
    assert_eq!(unchanged.category, PerformanceCategory::Medium);
}

#[test]
fn risk_level_tracks_negative_direction_count() {
    let sim = simulator();

    let zero = sim.simulate(&AdjustmentSet::default());
    assert_eq!(zero.risk_level, RiskLevel::Low);

    let one_negative = sim.simulate(&AdjustmentSet {
        overtime: 10.0,
        ..Default::default()
    });
    assert_eq!(one_negative.risk_level, RiskLevel::Medium);

    let three_negative = sim.simulate(&AdjustmentSet {
        overtime: 10.0,
        sick_days: 10.0,
        work_hours: 10.0,
        ..Default::default()
    });
    let negatives = three_negative
        .impact_breakdown
        .iter()
        .filter(|i| i.direction == Direction::Negative)
        .count();
    assert_eq!(negatives, 3);
    assert_eq!(three_negative.risk_level, RiskLevel::High);
}

#[test]
fn training_boost_preset_end_to_end() {
    let preset = find_preset("training-boost").expect("preset exists");
    let result = simulator().simulate(&preset.adjustments);

    let impact_of = |factor: Factor| {
        result
            .impact_breakdown
            .iter()
            .find(|i| i.factor == factor)
            .cloned()
            .expect("factor present in breakdown")
    };

    let training = impact_of(Factor::Training);
    assert!(training.impact > 0.0);
    assert_eq!(training.direction, Direction::Positive);

    for factor in [Factor::Satisfaction, Factor::WorkHours, Factor::Overtime, Factor::SickDays] {
        assert_eq!(impact_of(factor).direction, Direction::Neutral);
    }

    assert_eq!(result.risk_level, RiskLevel::Low);
    // +20% training at weight 0.198 and multiplier 0.4 lands at +1.6 points.
    assert_eq!(result.delta, 1.6);
    assert_eq!(result.new_score, 76.6);
}

#[test]
fn breakdown_always_covers_all_five_factors() {
    let result = simulator().simulate(&AdjustmentSet {
        satisfaction: 15.0,
        ..Default::default()
    });
    assert_eq!(result.impact_breakdown.len(), 5);
}

#[test]
fn result_json_matches_dashboard_shape() {
    let result = simulator().simulate(&find_preset("workload-reduction").unwrap().adjustments);
    let json = serde_json::to_value(&result).unwrap();

    assert!(json["baselineScore"].is_number());
    assert!(json["newScore"].is_number());
    assert!(json["percentChange"].is_number());
    assert_eq!(json["riskLevel"], "low");
    let breakdown = json["impactBreakdown"].as_array().unwrap();
    assert_eq!(breakdown.len(), 5);
    assert_eq!(breakdown[3]["factor"], "Overtime");
    assert_eq!(breakdown[3]["direction"], "positive");
}
