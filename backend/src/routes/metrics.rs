use serde::{Deserialize, Serialize};

/// One "metric" card: a rounded average with a static delta label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricCard {
    pub label: String,
    /// `None` when the column has no values
    pub value: Option<f64>,
    pub delta: String,
}

/// General member metrics shown above the panels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberMetrics {
    pub member_count: usize,
    pub cards: Vec<MetricCard>,
}

pub const GET_MEMBER_METRICS: &str = "get_member_metrics";
