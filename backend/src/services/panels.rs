//! The two interactive data panels.
//!
//! A panel fixes the metric, aggregate and chart mark; the caller supplies the
//! filter selection, row order and any grid edits. Each call recomputes from
//! the immutable session table.

use std::str::FromStr;

use super::pivot::{aggregate_sessions, EditOverlay, PipelineError, SortOrder};
use super::stats::Aggregation;
use crate::config::PanelSettings;
use crate::models::{
    FilterSelection, Metric, SessionTable, DURATION_SLIDER_MAX, DURATION_SLIDER_MIN,
    DURATION_SLIDER_STEP,
};
use crate::routes::panels::{ChannelEncoding, ChartMark, ChartSpec, FilterControls, PanelData};

const CHART_HEIGHT: u32 = 320;

/// Which panel is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelKind {
    /// Summed calories, drawn as lines.
    Calories,
    /// Median water intake, drawn as bars.
    WaterIntake,
}

impl PanelKind {
    pub const ALL: [PanelKind; 2] = [PanelKind::Calories, PanelKind::WaterIntake];

    pub fn slug(&self) -> &'static str {
        match self {
            PanelKind::Calories => "calories",
            PanelKind::WaterIntake => "water-intake",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            PanelKind::Calories => "Which Workout Burns the Most Calories?",
            PanelKind::WaterIntake => "Water Intake According to Workout Type",
        }
    }

    pub fn metric(&self) -> Metric {
        match self {
            PanelKind::Calories => Metric::CaloriesBurned,
            PanelKind::WaterIntake => Metric::WaterIntake,
        }
    }

    pub fn aggregation(&self) -> Aggregation {
        match self {
            PanelKind::Calories => Aggregation::Sum,
            PanelKind::WaterIntake => Aggregation::Median,
        }
    }

    /// Configured row order for this panel.
    pub fn default_order(&self, settings: &PanelSettings) -> SortOrder {
        match self {
            PanelKind::Calories => settings.calories_order,
            PanelKind::WaterIntake => settings.water_intake_order,
        }
    }

    pub fn chart(&self) -> ChartSpec {
        let (mark, x_title, y_title) = match self {
            PanelKind::Calories => (ChartMark::Line, "Session (mins)", "Calories Burned (kcal)"),
            PanelKind::WaterIntake => (
                ChartMark::Bar,
                "Session Duration (mins)",
                "Water Intake (liter)",
            ),
        };

        ChartSpec {
            mark,
            x: ChannelEncoding {
                field: "session_duration_mins".to_string(),
                kind: "nominal".to_string(),
                title: Some(x_title.to_string()),
            },
            y: ChannelEncoding {
                field: "value".to_string(),
                kind: "quantitative".to_string(),
                title: Some(y_title.to_string()),
            },
            color: ChannelEncoding {
                field: "workout_type".to_string(),
                kind: "nominal".to_string(),
                title: None,
            },
            height: CHART_HEIGHT,
        }
    }
}

impl FromStr for PanelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "calories" => Ok(Self::Calories),
            "water-intake" | "water_intake" | "water" => Ok(Self::WaterIntake),
            _ => Err(format!("Unknown panel: {}", s)),
        }
    }
}

/// Configured default workout types that actually occur in the data.
pub fn default_workout_types(observed: &[String], settings: &PanelSettings) -> Vec<String> {
    settings
        .default_workout_types
        .iter()
        .filter(|t| observed.contains(t))
        .cloned()
        .collect()
}

pub fn default_selection(observed: &[String], settings: &PanelSettings) -> FilterSelection {
    FilterSelection::new(
        default_workout_types(observed, settings),
        settings.default_duration,
    )
}

/// Options and defaults for the multiselect and the duration slider.
pub fn filter_controls(observed: &[String], settings: &PanelSettings) -> FilterControls {
    FilterControls {
        workout_types: observed.to_vec(),
        default_workout_types: default_workout_types(observed, settings),
        duration_min: DURATION_SLIDER_MIN,
        duration_max: DURATION_SLIDER_MAX,
        duration_step: DURATION_SLIDER_STEP,
        default_duration: settings.default_duration,
    }
}

/// Run the pipeline for one panel, applying `edits` to the grid before
/// flattening it into chart rows.
pub fn build_panel(
    table: &SessionTable,
    kind: PanelKind,
    selection: FilterSelection,
    order: SortOrder,
    edits: Option<&EditOverlay>,
) -> Result<PanelData, PipelineError> {
    let mut grid = aggregate_sessions(table, &selection, kind.metric(), kind.aggregation(), order);
    if let Some(edits) = edits.filter(|e| !e.is_empty()) {
        grid.apply_edits(edits)?;
    }
    let chart_rows = grid.unpivot();

    Ok(PanelData {
        panel: kind.slug().to_string(),
        title: kind.title().to_string(),
        metric: kind.metric(),
        aggregation: kind.aggregation(),
        order,
        selection,
        table: grid,
        chart_rows,
        chart: kind.chart(),
    })
}
