//! Data Transfer Objects for the HTTP API.
//!
//! Request types and small response wrappers; the visualization payloads
//! are re-exported from [`crate::api`].

use serde::{Deserialize, Serialize};

pub use crate::api::{
    DatasetInfo, EditOverlay, FilterControls, FilterSelection, LongFormRow, MemberMetrics,
    PageContent, PanelData, PivotTable, SortOrder,
};

use crate::models::DurationRange;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Loaded dataset summary
    pub dataset: DatasetInfo,
}

/// Query parameters for `GET /v1/panels/{panel}`.
///
/// Absent parameters fall back to the configured defaults; `types=` with an
/// empty value selects no workout type at all.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PanelQuery {
    /// Comma-separated workout types
    #[serde(default)]
    pub types: Option<String>,
    /// Lower duration bound in minutes (inclusive)
    #[serde(default)]
    pub min: Option<i64>,
    /// Upper duration bound in minutes (inclusive)
    #[serde(default)]
    pub max: Option<i64>,
    /// Row order, "asc" or "desc"
    #[serde(default)]
    pub order: Option<SortOrder>,
}

impl PanelQuery {
    /// Resolve the query against the default selection.
    pub fn selection(&self, defaults: &FilterSelection) -> FilterSelection {
        let types: Vec<String> = match &self.types {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
            None => defaults.workout_types().to_vec(),
        };
        let range = DurationRange::new(
            self.min.unwrap_or(defaults.duration_range.lo),
            self.max.unwrap_or(defaults.duration_range.hi),
        );
        FilterSelection::new(types, range)
    }
}

/// Body of `POST /v1/panels/{panel}`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PanelRequest {
    /// Filter selection; the configured default when absent
    #[serde(default)]
    pub selection: Option<FilterSelection>,
    /// Row order; the panel's configured order when absent
    #[serde(default)]
    pub order: Option<SortOrder>,
    /// Grid edits applied before building chart rows
    #[serde(default)]
    pub edits: Option<EditOverlay>,
}

/// Body of `POST /v1/unpivot`: a whole (possibly edited) grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnpivotRequest {
    pub table: PivotTable,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnpivotResponse {
    pub rows: Vec<LongFormRow>,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> FilterSelection {
        FilterSelection::new(["Yoga", "HIIT"], DurationRange::new(45, 60))
    }

    #[test]
    fn test_query_defaults() {
        let selection = PanelQuery::default().selection(&defaults());
        assert_eq!(selection, defaults());
    }

    #[test]
    fn test_query_overrides() {
        let query = PanelQuery {
            types: Some("Cardio, Strength,,".to_string()),
            min: Some(90),
            max: None,
            order: None,
        };
        let selection = query.selection(&defaults());
        assert_eq!(selection.workout_types(), &["Cardio", "Strength"]);
        assert_eq!(selection.duration_range, DurationRange::new(90, 60));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_empty_types_selects_nothing() {
        let query = PanelQuery {
            types: Some(String::new()),
            ..Default::default()
        };
        assert!(query.selection(&defaults()).workout_types().is_empty());
    }
}
