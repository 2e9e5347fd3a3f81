use serde::{Deserialize, Serialize};

/// Value-ratio fairness rule
///
/// Two sides are fair when the larger total is at most `1 + threshold` times
/// the smaller one. A side worth nothing is never fair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FairnessRule {
    threshold: f64,
}

impl FairnessRule {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Largest accepted ratio between the two sides
    pub fn max_ratio(&self) -> f64 {
        1.0 + self.threshold
    }

    /// Ratio of the larger side to the smaller one, `None` if either is worthless
    pub fn ratio(a: f64, b: f64) -> Option<f64> {
        if a <= 0.0 || b <= 0.0 {
            return None;
        }
        Some(a.max(b) / a.min(b))
    }

    /// True when the two totals are close enough to trade
    pub fn is_fair(&self, a: f64, b: f64) -> bool {
        match Self::ratio(a, b) {
            Some(ratio) => ratio <= self.max_ratio(),
            None => false,
        }
    }
}

impl Default for FairnessRule {
    fn default() -> Self {
        Self::new(crate::DEFAULT_FAIRNESS_THRESHOLD)
    }
}
