use serde::{Deserialize, Serialize};

use crate::models::{DurationRange, FilterSelection, Metric};
use crate::services::pivot::{LongFormRow, PivotTable, SortOrder};
use crate::services::stats::Aggregation;

/// Mark used to draw a panel's chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartMark {
    Line,
    Bar,
}

/// Field encoding on one chart channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelEncoding {
    pub field: String,
    /// "nominal" or "quantitative"
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Chart description; the client renders it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub mark: ChartMark,
    pub x: ChannelEncoding,
    pub y: ChannelEncoding,
    pub color: ChannelEncoding,
    pub height: u32,
}

/// Editable grid plus chart data for one panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelData {
    pub panel: String,
    pub title: String,
    pub metric: Metric,
    pub aggregation: Aggregation,
    pub order: SortOrder,
    pub selection: FilterSelection,
    pub table: PivotTable,
    pub chart_rows: Vec<LongFormRow>,
    pub chart: ChartSpec,
}

/// Bounds and defaults of the filter widgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterControls {
    pub workout_types: Vec<String>,
    pub default_workout_types: Vec<String>,
    pub duration_min: i64,
    pub duration_max: i64,
    pub duration_step: i64,
    pub default_duration: DurationRange,
}

pub const GET_FILTER_CONTROLS: &str = "get_filter_controls";
pub const GET_PANEL_DATA: &str = "get_panel_data";
pub const POST_PANEL_EDITS: &str = "post_panel_edits";
pub const POST_UNPIVOT: &str = "post_unpivot";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_mark_serializes_lowercase() {
        assert_eq!(serde_json::to_value(ChartMark::Line).unwrap(), "line");
        assert_eq!(serde_json::to_value(ChartMark::Bar).unwrap(), "bar");
    }

    #[test]
    fn test_channel_title_optional() {
        let color = ChannelEncoding {
            field: "Workout_Type".to_string(),
            kind: "nominal".to_string(),
            title: None,
        };
        let json = serde_json::to_value(&color).unwrap();
        assert!(json.get("title").is_none());
    }
}
