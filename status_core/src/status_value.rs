//! StatusValue - one channel split into base, fixed, percental and rating parts

use crate::config::RatingCurve;
use serde::{Deserialize, Serialize};

/// A single stat as its four components
///
/// Final value is calculated as:
/// `(base + fixed + rating_to_fixed(level, rating)) × (1 + percental / 100)`
///
/// - `base`: The entity's own value for the channel
/// - `fixed`: Sum of all Fixed effects
/// - `percental`: Sum of all Percental effects in whole percent (15.0 = 15%)
/// - `rating`: Sum of all Rating effects, before level conversion
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusValue {
    pub base: f64,
    pub fixed: f64,
    pub percental: f64,
    pub rating: f64,
}

impl StatusValue {
    /// Create a new StatusValue with the given base
    pub fn with_base(base: f64) -> Self {
        StatusValue {
            base,
            ..StatusValue::default()
        }
    }

    /// Calculate the final value at `level`
    pub fn compute(&self, curve: &RatingCurve, level: u32) -> f64 {
        self.total_fixed(curve, level) * self.multiplier()
    }

    pub fn add_fixed(&mut self, value: f64) {
        self.fixed += value;
    }

    /// Add percentage points (15.0 for 15%)
    pub fn add_percental(&mut self, value: f64) {
        self.percental += value;
    }

    pub fn add_rating(&mut self, value: f64) {
        self.rating += value;
    }

    /// Base plus fixed plus the converted rating
    pub fn total_fixed(&self, curve: &RatingCurve, level: u32) -> f64 {
        self.base + self.fixed + curve.rating_to_fixed(level, self.rating)
    }

    /// `1 + percental / 100`; not floored, so a sum below -100% goes negative
    pub fn multiplier(&self) -> f64 {
        1.0 + self.percental / 100.0
    }

    /// Whether any effect touches this value
    pub fn is_modified(&self) -> bool {
        self.fixed != 0.0 || self.percental != 0.0 || self.rating != 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve() -> RatingCurve {
        RatingCurve::default()
    }

    #[test]
    fn test_compute_basic() {
        let stat = StatusValue::with_base(100.0);
        assert!((stat.compute(&curve(), 1) - 100.0).abs() < f64::EPSILON);
        assert!(!stat.is_modified());
    }

    #[test]
    fn test_fixed_and_percental() {
        // (100 + 50) × 1.20 = 180
        let mut stat = StatusValue::with_base(100.0);
        stat.add_fixed(50.0);
        stat.add_percental(20.0);
        assert!((stat.compute(&curve(), 1) - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_percental_stacks_additively() {
        let mut stat = StatusValue::with_base(100.0);
        stat.add_percental(20.0);
        stat.add_percental(30.0);
        // 100 × 1.5, not 100 × 1.2 × 1.3
        assert!((stat.compute(&curve(), 1) - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_rating_converts_with_level() {
        // 200 rating at level 10 = 40 fixed
        let mut stat = StatusValue::with_base(50.0);
        stat.add_rating(200.0);
        assert!((stat.compute(&curve(), 10) - 90.0).abs() < 1e-9);
        // At level 20 the same rating is worth 20
        assert!((stat.compute(&curve(), 20) - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_rating_is_scaled_by_percental() {
        let mut stat = StatusValue::with_base(0.0);
        stat.add_rating(200.0);
        stat.add_percental(50.0);
        assert!((stat.compute(&curve(), 10) - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_percental_is_not_floored() {
        let mut stat = StatusValue::with_base(100.0);
        stat.add_percental(-150.0);
        assert!((stat.compute(&curve(), 1) + 50.0).abs() < 1e-9);
    }
}
