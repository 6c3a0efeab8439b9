//! Preset scenarios mirroring the quick-start simulations offered in the
//! dashboard UI.

use super::AdjustmentSet;
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
pub struct Preset {
    pub slug: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub adjustments: AdjustmentSet,
}

pub fn all_presets() -> Vec<Preset> {
    vec![
        Preset {
            slug: "training-boost",
            name: "Training Boost",
            description: "Increase training hours by 20%",
            adjustments: AdjustmentSet {
                training: 20.0,
                ..Default::default()
            },
        },
        Preset {
            slug: "workload-reduction",
            name: "Workload Reduction",
            description: "Reduce overtime by 50%",
            adjustments: AdjustmentSet {
                overtime: -50.0,
                ..Default::default()
            },
        },
        Preset {
            slug: "engagement-initiative",
            name: "Engagement Initiative",
            description: "Improve satisfaction by 15%",
            adjustments: AdjustmentSet {
                satisfaction: 15.0,
                ..Default::default()
            },
        },
        Preset {
            slug: "wellness-program",
            name: "Wellness Program",
            description: "Reduce sick days by 30%",
            adjustments: AdjustmentSet {
                sick_days: -30.0,
                ..Default::default()
            },
        },
        Preset {
            slug: "combined-optimization",
            name: "Combined Optimization",
            description: "Training +10%, Overtime -25%, Satisfaction +10%",
            adjustments: AdjustmentSet {
                training: 10.0,
                overtime: -25.0,
                satisfaction: 10.0,
                ..Default::default()
            },
        },
    ]
}

pub fn find_preset(slug: &str) -> Option<Preset> {
    all_presets().into_iter().find(|p| p.slug == slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_preset_by_slug() {
        let preset = find_preset("training-boost").unwrap();
        assert_eq!(preset.name, "Training Boost");
        assert_eq!(preset.adjustments.training, 20.0);
        assert_eq!(preset.adjustments.overtime, 0.0);
    }

    #[test]
    fn test_unknown_slug_returns_none() {
        assert!(find_preset("four-day-week").is_none());
    }

    #[test]
    fn test_all_slugs_are_unique() {
        let presets = all_presets();
        let mut slugs: Vec<_> = presets.iter().map(|p| p.slug).collect();
        slugs.sort();
        slugs.dedup();
        assert_eq!(slugs.len(), presets.len());
    }
}
