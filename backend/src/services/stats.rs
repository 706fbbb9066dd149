//! Reduction functions shared by the pivot pipeline and the metric cards.

use serde::{Deserialize, Serialize};

/// Aggregate applied to all metric values sharing a (duration, workout type) key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    Sum,
    Median,
}

impl Aggregation {
    /// Reduce a non-empty group of values. Empty input yields 0.
    pub fn apply(&self, values: &[f64]) -> f64 {
        match self {
            Aggregation::Sum => sum(values),
            Aggregation::Median => median(values).unwrap_or(0.0),
        }
    }
}

impl std::str::FromStr for Aggregation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sum" => Ok(Self::Sum),
            "median" => Ok(Self::Median),
            _ => Err(format!("Unknown aggregation: {}", s)),
        }
    }
}

pub fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

/// Median with the two middle values averaged for even counts.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let count = values.len();
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let median = if count % 2 == 0 {
        (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
    } else {
        sorted[count / 2]
    };
    Some(median)
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(sum(values) / values.len() as f64)
}

/// Round to two decimals, as displayed on the metric cards.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
