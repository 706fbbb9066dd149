//! Member exercise session records and the in-memory session table.

use serde::{Deserialize, Serialize};

/// One row of the member exercise tracking file.
///
/// Only `session_duration_mins`, `workout_type`, `calories_burned` and
/// `water_intake` feed the aggregation pipeline. The remaining attributes are
/// used for the plain averages shown on the member metric cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberSession {
    pub session_duration_mins: i64,
    pub workout_type: String,
    pub calories_burned: Option<f64>,
    pub water_intake: Option<f64>,
    pub bmi: Option<f64>,
    pub resting_bpm: Option<f64>,
    pub fat_percentage: Option<f64>,
}

impl MemberSession {
    /// Convenience constructor for rows carrying only pipeline fields.
    pub fn new(
        session_duration_mins: i64,
        workout_type: impl Into<String>,
        calories_burned: f64,
        water_intake: f64,
    ) -> Self {
        Self {
            session_duration_mins,
            workout_type: workout_type.into(),
            calories_burned: Some(calories_burned),
            water_intake: Some(water_intake),
            bmi: None,
            resting_bpm: None,
            fat_percentage: None,
        }
    }

    /// Value of the given metric for this row, `None` when the cell was empty.
    pub fn metric(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::CaloriesBurned => self.calories_burned,
            Metric::WaterIntake => self.water_intake,
        }
    }
}

/// Numeric column aggregated by the pivot pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    CaloriesBurned,
    WaterIntake,
}

impl Metric {
    /// Column name as it appears in the source file and in chart data.
    pub fn column_name(&self) -> &'static str {
        match self {
            Metric::CaloriesBurned => "Calories_Burned",
            Metric::WaterIntake => "Water_Intake",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column_name())
    }
}

/// Immutable table of all sessions loaded at startup.
#[derive(Debug, Clone, Default)]
pub struct SessionTable {
    sessions: Vec<MemberSession>,
    workout_types: Vec<String>,
}

impl SessionTable {
    /// Build a table, recording the distinct workout types in first-seen order.
    pub fn new(sessions: Vec<MemberSession>) -> Self {
        let mut workout_types: Vec<String> = Vec::new();
        for session in &sessions {
            if !workout_types.contains(&session.workout_type) {
                workout_types.push(session.workout_type.clone());
            }
        }
        Self {
            sessions,
            workout_types,
        }
    }

    pub fn sessions(&self) -> &[MemberSession] {
        &self.sessions
    }

    /// Distinct workout types observed in the data.
    pub fn workout_types(&self) -> &[String] {
        &self.workout_types
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
