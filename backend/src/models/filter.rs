//! User-controlled filter constraints applied before aggregation.

use serde::{Deserialize, Serialize};

/// Lower bound of the duration slider, in minutes.
pub const DURATION_SLIDER_MIN: i64 = 30;
/// Upper bound of the duration slider, in minutes.
pub const DURATION_SLIDER_MAX: i64 = 120;
/// Step of the duration slider, in minutes.
pub const DURATION_SLIDER_STEP: i64 = 5;

/// Workout types preselected when present in the data.
pub const DEFAULT_WORKOUT_TYPES: [&str; 4] = ["Yoga", "HIIT", "Cardio", "Strength"];

/// Closed integer interval of session durations. `lo > hi` is an empty range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationRange {
    pub lo: i64,
    pub hi: i64,
}

impl DurationRange {
    pub fn new(lo: i64, hi: i64) -> Self {
        Self { lo, hi }
    }

    pub fn contains(&self, duration: i64) -> bool {
        self.lo <= duration && duration <= self.hi
    }

    pub fn is_empty(&self) -> bool {
        self.lo > self.hi
    }
}

impl Default for DurationRange {
    fn default() -> Self {
        Self { lo: 45, hi: 60 }
    }
}

/// Workout types plus duration range chosen for one interaction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "RawSelection")]
pub struct FilterSelection {
    workout_types: Vec<String>,
    pub duration_range: DurationRange,
}

#[derive(Deserialize)]
struct RawSelection {
    #[serde(default)]
    workout_types: Vec<String>,
    #[serde(default)]
    duration_range: DurationRange,
}

impl From<RawSelection> for FilterSelection {
    fn from(raw: RawSelection) -> Self {
        FilterSelection::new(raw.workout_types, raw.duration_range)
    }
}

impl FilterSelection {
    /// Create a selection. Repeated workout types are dropped, first occurrence wins.
    pub fn new<I, S>(workout_types: I, duration_range: DurationRange) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut types: Vec<String> = Vec::new();
        for t in workout_types {
            let t = t.into();
            if !types.contains(&t) {
                types.push(t);
            }
        }
        Self {
            workout_types: types,
            duration_range,
        }
    }

    pub fn workout_types(&self) -> &[String] {
        &self.workout_types
    }

    /// True when the selection cannot match any row.
    pub fn is_empty(&self) -> bool {
        self.workout_types.is_empty() || self.duration_range.is_empty()
    }

    pub fn matches(&self, workout_type: &str, duration: i64) -> bool {
        self.duration_range.contains(duration)
            && self.workout_types.iter().any(|t| t == workout_type)
    }
}
