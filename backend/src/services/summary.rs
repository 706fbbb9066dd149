//! Plain averages over member attributes for the metric cards.

use super::stats::{mean, round2};
use crate::models::{MemberSession, SessionTable};
use crate::routes::metrics::{MemberMetrics, MetricCard};

fn average_of(table: &SessionTable, field: fn(&MemberSession) -> Option<f64>) -> Option<f64> {
    let values: Vec<f64> = table.sessions().iter().filter_map(field).collect();
    mean(&values).map(round2)
}

/// Average BMI, resting BPM and fat percentage across all rows.
pub fn compute_member_metrics(table: &SessionTable) -> MemberMetrics {
    let card = |label: &str, value: Option<f64>, delta: &str| MetricCard {
        label: label.to_string(),
        value,
        delta: delta.to_string(),
    };

    MemberMetrics {
        member_count: table.len(),
        cards: vec![
            card("BMI", average_of(table, |s| s.bmi), "-2.3"),
            card("Resting BPM", average_of(table, |s| s.resting_bpm), "3.0"),
            card("Fat percentage", average_of(table, |s| s.fat_percentage), "-4%"),
        ],
    }
}
