//! HealthDelta - Static damage/healing description and distance falloff

use crate::types::FalloffRange;
use serde::{Deserialize, Serialize};

/// Magnitude at the near (`max`) and far (`min`) end of a falloff range
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ValueRange {
    pub max: f64,
    pub min: f64,
}

impl ValueRange {
    pub fn new(max: f64, min: f64) -> Self {
        ValueRange { max, min }
    }

    /// Flat value with no falloff
    pub fn flat(value: f64) -> Self {
        ValueRange { max: value, min: value }
    }

    pub fn is_zero(&self) -> bool {
        self.max == 0.0 && self.min == 0.0
    }
}

/// How much a hit, pulse or tick changes hit points
///
/// Either `value_range` (per hit, subject to falloff) or `value_per_second`
/// (scaled by elapsed time) is used, never both.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HealthDelta {
    #[serde(default)]
    pub value_range: ValueRange,
    #[serde(default)]
    pub value_per_second: f64,
    #[serde(default)]
    pub is_damage: bool,
}

impl HealthDelta {
    pub fn damage(range: ValueRange) -> Self {
        HealthDelta {
            value_range: range,
            value_per_second: 0.0,
            is_damage: true,
        }
    }

    pub fn healing(range: ValueRange) -> Self {
        HealthDelta {
            value_range: range,
            value_per_second: 0.0,
            is_damage: false,
        }
    }

    pub fn per_second(value_per_second: f64, is_damage: bool) -> Self {
        HealthDelta {
            value_range: ValueRange::default(),
            value_per_second,
            is_damage,
        }
    }

    /// Whether this delta does anything at all
    pub fn is_empty(&self) -> bool {
        self.value_range.is_zero() && self.value_per_second == 0.0
    }
}

/// Evaluate a hit magnitude at `distance`
///
/// Returns `max` at or inside `falloff.start`, `min` at or beyond
/// `falloff.end`, and interpolates linearly in between. A range with
/// `start > end` is a caller error.
pub fn evaluate_falloff(distance: f64, delta: &HealthDelta, falloff: FalloffRange) -> f64 {
    debug_assert!(
        falloff.start <= falloff.end,
        "falloff start {} exceeds end {}",
        falloff.start,
        falloff.end
    );

    let max = delta.value_range.max;
    let min = delta.value_range.min;

    if distance <= falloff.start {
        return max;
    }
    if distance >= falloff.end {
        return min;
    }

    // start < distance < end here, so the span is never zero
    let t = (distance - falloff.start) / (falloff.end - falloff.start);
    lerp(max, min, t)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rifle() -> HealthDelta {
        HealthDelta::damage(ValueRange::new(19.0, 5.7))
    }

    #[test]
    fn test_inside_start_returns_max() {
        let range = FalloffRange::new(30.0, 50.0);
        assert_eq!(evaluate_falloff(0.0, &rifle(), range), 19.0);
        assert_eq!(evaluate_falloff(30.0, &rifle(), range), 19.0);
    }

    #[test]
    fn test_beyond_end_returns_min() {
        let range = FalloffRange::new(30.0, 50.0);
        assert_eq!(evaluate_falloff(50.0, &rifle(), range), 5.7);
        assert_eq!(evaluate_falloff(500.0, &rifle(), range), 5.7);
    }

    #[test]
    fn test_midpoint_is_mean() {
        let delta = HealthDelta::damage(ValueRange::new(100.0, 50.0));
        let value = evaluate_falloff(40.0, &delta, FalloffRange::new(30.0, 50.0));
        assert!((value - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_collapsed_range_never_divides() {
        let delta = HealthDelta::damage(ValueRange::new(80.0, 40.0));
        let range = FalloffRange::new(3.0, 3.0);
        assert_eq!(evaluate_falloff(2.0, &delta, range), 80.0);
        assert_eq!(evaluate_falloff(3.0, &delta, range), 80.0);
        assert_eq!(evaluate_falloff(3.5, &delta, range), 40.0);
    }

    #[test]
    fn test_empty_delta() {
        assert!(HealthDelta::default().is_empty());
        assert!(!HealthDelta::per_second(65.0, false).is_empty());
    }
}
