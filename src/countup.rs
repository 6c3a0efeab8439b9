//! Count-up number animation.
//!
//! Interpolates a displayed value from `start` to `end` over a fixed duration
//! with a quartic ease-out curve. Purely cosmetic: the animated value is never
//! a source of truth. The machine is advanced by an external tick carrying a
//! millisecond timestamp, so callers own the frame loop and tests can drive it
//! with a fake clock.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CountUpOptions {
    #[serde(default)]
    pub start: f64,
    pub end: f64,
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
    #[serde(default)]
    pub decimals: usize,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
    #[serde(default)]
    pub delay_ms: u64,
}

impl Default for CountUpOptions {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: 0.0,
            duration_ms: default_duration_ms(),
            decimals: 0,
            prefix: String::new(),
            suffix: String::new(),
            delay_ms: 0,
        }
    }
}

impl CountUpOptions {
    pub fn to_value(end: f64) -> Self {
        Self {
            end,
            ..Default::default()
        }
    }
}

fn default_duration_ms() -> u64 {
    2000
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CountUpPhase {
    /// Created or retargeted, no tick seen yet.
    Idle,
    /// Waiting out the initial delay.
    Delaying { since_ms: u64 },
    /// Interpolating between start and end.
    Animating { started_ms: u64 },
    /// Settled exactly at `end`.
    Complete,
}

/// Quartic ease-out: fast start, smooth deceleration into the target.
pub fn ease_out_quart(progress: f64) -> f64 {
    1.0 - (1.0 - progress).powi(4)
}

pub struct CountUp {
    options: CountUpOptions,
    phase: CountUpPhase,
    value: f64,
}

impl CountUp {
    pub fn new(options: CountUpOptions) -> Self {
        let value = options.start;
        Self {
            options,
            phase: CountUpPhase::Idle,
            value,
        }
    }

    pub fn options(&self) -> &CountUpOptions {
        &self.options
    }

    pub fn phase(&self) -> CountUpPhase {
        self.phase
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn is_complete(&self) -> bool {
        self.phase == CountUpPhase::Complete
    }

    /// Advance the animation to `now_ms` and return the current value.
    /// The first tick after the delay elapses anchors the animation start,
    /// so the first animated frame always shows `start`.
    pub fn tick(&mut self, now_ms: u64) -> f64 {
        match self.phase {
            CountUpPhase::Idle => {
                if self.options.delay_ms > 0 {
                    self.phase = CountUpPhase::Delaying { since_ms: now_ms };
                } else {
                    self.phase = CountUpPhase::Animating { started_ms: now_ms };
                    self.advance(now_ms);
                }
            }
            CountUpPhase::Delaying { since_ms } => {
                if now_ms.saturating_sub(since_ms) >= self.options.delay_ms {
                    self.phase = CountUpPhase::Animating { started_ms: now_ms };
                    self.advance(now_ms);
                }
            }
            CountUpPhase::Animating { .. } => self.advance(now_ms),
            CountUpPhase::Complete => {}
        }
        self.value
    }

    fn advance(&mut self, now_ms: u64) {
        let CountUpPhase::Animating { started_ms } = self.phase else {
            return;
        };
        let progress = if self.options.duration_ms == 0 {
            1.0
        } else {
            (now_ms.saturating_sub(started_ms) as f64 / self.options.duration_ms as f64).min(1.0)
        };
        let eased = ease_out_quart(progress);
        self.value = self.options.start + (self.options.end - self.options.start) * eased;
        if progress >= 1.0 {
            // Settle exactly on the target, no residual easing error.
            self.value = self.options.end;
            self.phase = CountUpPhase::Complete;
        }
    }

    /// Change the target mid-flight. The running animation is torn down
    /// (pending delay included) and restarted from scratch: no blending of
    /// old and new trajectories.
    pub fn retarget(&mut self, end: f64) {
        self.options.end = end;
        self.phase = CountUpPhase::Idle;
        self.value = self.options.start;
    }

    /// Display string: prefix + value at the configured precision + suffix.
    pub fn formatted(&self) -> String {
        format!(
            "{}{:.*}{}",
            self.options.prefix, self.options.decimals, self.value, self.options.suffix
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic(end: f64, duration_ms: u64) -> CountUp {
        CountUp::new(CountUpOptions {
            end,
            duration_ms,
            ..Default::default()
        })
    }

    #[test]
    fn test_starts_at_start_value() {
        let mut countup = basic(100.0, 1000);
        assert_eq!(countup.tick(0), 0.0);
        assert_eq!(countup.formatted(), "0");
        assert!(!countup.is_complete());
    }

    #[test]
    fn test_settles_exactly_at_end() {
        let mut countup = basic(100.0, 1000);
        countup.tick(0);
        let value = countup.tick(1000);
        assert_eq!(value, 100.0);
        assert_eq!(countup.formatted(), "100");
        assert!(countup.is_complete());

        // Further ticks stay pinned at the target.
        assert_eq!(countup.tick(5000), 100.0);
    }

    #[test]
    fn test_quartic_easing_at_half_duration() {
        let mut countup = basic(100.0, 1000);
        countup.tick(0);
        let value = countup.tick(500);
        assert!((value - 93.75).abs() < 1e-9);
    }

    #[test]
    fn test_easing_curve_endpoints() {
        assert_eq!(ease_out_quart(0.0), 0.0);
        assert_eq!(ease_out_quart(1.0), 1.0);
        assert!((ease_out_quart(0.5) - 0.9375).abs() < 1e-12);
    }

    #[test]
    fn test_delay_holds_start_value() {
        let mut countup = CountUp::new(CountUpOptions {
            end: 50.0,
            duration_ms: 1000,
            delay_ms: 200,
            ..Default::default()
        });
        assert_eq!(countup.tick(0), 0.0);
        assert_eq!(countup.tick(100), 0.0);
        assert!(matches!(countup.phase(), CountUpPhase::Delaying { .. }));

        // Delay elapsed: this tick anchors the animation at start.
        assert_eq!(countup.tick(200), 0.0);
        assert!(matches!(countup.phase(), CountUpPhase::Animating { .. }));
        assert_eq!(countup.tick(1200), 50.0);
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let mut countup = basic(42.0, 0);
        assert_eq!(countup.tick(10), 42.0);
        assert!(countup.is_complete());
    }

    #[test]
    fn test_retarget_restarts_from_scratch() {
        let mut countup = basic(100.0, 1000);
        countup.tick(0);
        countup.tick(500);

        countup.retarget(40.0);
        assert_eq!(countup.value(), 0.0);
        assert!(!countup.is_complete());

        countup.tick(600);
        let mid = countup.tick(900);
        assert!((0.0..=100.0).contains(&mid));
        let settled = countup.tick(1600);
        assert_eq!(settled, 40.0);
        assert!(countup.is_complete());
    }

    #[test]
    fn test_retarget_never_leaves_value_range() {
        let mut countup = basic(100.0, 1000);
        countup.tick(0);
        countup.tick(700);
        countup.retarget(20.0);

        let lo = 0.0_f64;
        let hi = 100.0_f64;
        for t in (700..2200).step_by(50) {
            let value = countup.tick(t);
            assert!(value >= lo && value <= hi, "value {value} escaped range at t={t}");
        }
        assert_eq!(countup.value(), 20.0);
    }

    #[test]
    fn test_prefix_suffix_decimals() {
        let mut countup = CountUp::new(CountUpOptions {
            end: 12.5,
            duration_ms: 100,
            decimals: 2,
            prefix: "$".to_string(),
            suffix: "k".to_string(),
            ..Default::default()
        });
        countup.tick(0);
        countup.tick(100);
        assert_eq!(countup.formatted(), "$12.50k");
    }

    #[test]
    fn test_nonzero_start() {
        let mut countup = CountUp::new(CountUpOptions {
            start: 60.0,
            end: 80.0,
            duration_ms: 1000,
            ..Default::default()
        });
        countup.tick(0);
        let value = countup.tick(500);
        assert!((value - (60.0 + 20.0 * 0.9375)).abs() < 1e-9);
    }
}
