//! Selection-and-aggregation pipeline.
//!
//! ```text
//! SessionTable ──filter──▶ retained rows ──group──▶ (duration, type) → aggregate
//!                                                        │
//!                         LongFormRow ◀──unpivot── PivotTable (sorted, maybe edited)
//! ```
//!
//! Every step is a pure function of its inputs. The session table is never
//! mutated; edits only change the pivot table handed to [`PivotTable::unpivot`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::stats::Aggregation;
use crate::models::{FilterSelection, MemberSession, Metric, SessionTable};

/// Errors raised while editing or rebuilding a pivot table.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PipelineError {
    #[error("Unknown row: session duration {0} is not in the table")]
    UnknownRow(i64),

    #[error("Unknown column: workout type '{0}' is not in the table")]
    UnknownColumn(String),

    #[error("Duplicate row: session duration {0} already exists")]
    DuplicateRow(i64),

    #[error("Duplicate column: workout type '{0}' appears twice")]
    DuplicateColumn(String),

    #[error("Row {row} has {found} values, expected {expected}")]
    RaggedRow {
        row: i64,
        expected: usize,
        found: usize,
    },

    #[error("Table has {found} value rows for {expected} row keys")]
    RowCountMismatch { expected: usize, found: usize },
}

/// Direction in which pivot rows are ordered by session duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[serde(alias = "asc")]
    Ascending,
    #[serde(alias = "desc")]
    Descending,
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(format!("Unknown sort order: {}", s)),
        }
    }
}

/// One chart point: a single pivot cell flattened into a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongFormRow {
    pub session_duration_mins: i64,
    pub workout_type: String,
    pub value: f64,
}

/// Dense matrix of aggregates keyed by duration (rows) and workout type (columns).
///
/// Values are stored row-major. On the wire the matrix is a list of rows so a
/// client can send back an edited grid as-is.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "PivotTableRepr", into = "PivotTableRepr")]
pub struct PivotTable {
    rows: Vec<i64>,
    columns: Vec<String>,
    values: Vec<f64>,
}

#[derive(Serialize, Deserialize)]
struct PivotTableRepr {
    rows: Vec<i64>,
    columns: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl TryFrom<PivotTableRepr> for PivotTable {
    type Error = PipelineError;

    fn try_from(repr: PivotTableRepr) -> Result<Self, Self::Error> {
        PivotTable::from_rows(repr.rows, repr.columns, repr.values)
    }
}

impl From<PivotTable> for PivotTableRepr {
    fn from(table: PivotTable) -> Self {
        let values = table.value_rows();
        Self {
            rows: table.rows,
            columns: table.columns,
            values,
        }
    }
}

impl PivotTable {
    /// Zero-filled table over the given keys.
    pub fn zeros(rows: Vec<i64>, columns: Vec<String>) -> Self {
        let values = vec![0.0; rows.len() * columns.len()];
        Self {
            rows,
            columns,
            values,
        }
    }

    /// Build a table from nested rows, validating keys and shape.
    pub fn from_rows(
        rows: Vec<i64>,
        columns: Vec<String>,
        values: Vec<Vec<f64>>,
    ) -> Result<Self, PipelineError> {
        if values.len() != rows.len() {
            return Err(PipelineError::RowCountMismatch {
                expected: rows.len(),
                found: values.len(),
            });
        }
        for (i, column) in columns.iter().enumerate() {
            if columns[..i].contains(column) {
                return Err(PipelineError::DuplicateColumn(column.clone()));
            }
        }
        for (i, row) in rows.iter().enumerate() {
            if rows[..i].contains(row) {
                return Err(PipelineError::DuplicateRow(*row));
            }
        }

        let mut flat = Vec::with_capacity(rows.len() * columns.len());
        for (row, row_values) in rows.iter().zip(values) {
            if row_values.len() != columns.len() {
                return Err(PipelineError::RaggedRow {
                    row: *row,
                    expected: columns.len(),
                    found: row_values.len(),
                });
            }
            flat.extend(row_values);
        }

        Ok(Self {
            rows,
            columns,
            values: flat,
        })
    }

    pub fn rows(&self) -> &[i64] {
        &self.rows
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn row_index(&self, duration: i64) -> Option<usize> {
        self.rows.iter().position(|r| *r == duration)
    }

    fn column_index(&self, workout_type: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == workout_type)
    }

    pub fn get(&self, duration: i64, workout_type: &str) -> Option<f64> {
        let r = self.row_index(duration)?;
        let c = self.column_index(workout_type)?;
        Some(self.values[r * self.columns.len() + c])
    }

    /// Overwrite a single cell.
    pub fn set(&mut self, duration: i64, workout_type: &str, value: f64) -> Result<(), PipelineError> {
        let r = self
            .row_index(duration)
            .ok_or(PipelineError::UnknownRow(duration))?;
        let c = self
            .column_index(workout_type)
            .ok_or_else(|| PipelineError::UnknownColumn(workout_type.to_string()))?;
        let width = self.columns.len();
        self.values[r * width + c] = value;
        Ok(())
    }

    /// Append a zero-filled row at the bottom of the table.
    pub fn push_row(&mut self, duration: i64) -> Result<(), PipelineError> {
        if self.row_index(duration).is_some() {
            return Err(PipelineError::DuplicateRow(duration));
        }
        self.rows.push(duration);
        self.values
            .extend(std::iter::repeat(0.0).take(self.columns.len()));
        Ok(())
    }

    pub fn remove_row(&mut self, duration: i64) -> Result<(), PipelineError> {
        let r = self
            .row_index(duration)
            .ok_or(PipelineError::UnknownRow(duration))?;
        let width = self.columns.len();
        self.rows.remove(r);
        self.values.drain(r * width..(r + 1) * width);
        Ok(())
    }

    /// Values as nested rows, in row order.
    pub fn value_rows(&self) -> Vec<Vec<f64>> {
        let width = self.columns.len();
        if width == 0 {
            return vec![Vec::new(); self.rows.len()];
        }
        self.values.chunks(width).map(|c| c.to_vec()).collect()
    }

    /// Reorder rows by duration.
    pub fn sort_rows(&mut self, order: SortOrder) {
        let mut indices: Vec<usize> = (0..self.rows.len()).collect();
        match order {
            SortOrder::Ascending => indices.sort_by_key(|&i| self.rows[i]),
            SortOrder::Descending => indices.sort_by_key(|&i| std::cmp::Reverse(self.rows[i])),
        }

        let width = self.columns.len();
        let rows = indices.iter().map(|&i| self.rows[i]).collect();
        let mut values = Vec::with_capacity(self.values.len());
        for &i in &indices {
            values.extend_from_slice(&self.values[i * width..(i + 1) * width]);
        }
        self.rows = rows;
        self.values = values;
    }

    /// Apply a client edit overlay: removals, then appended rows, then cell overwrites.
    pub fn apply_edits(&mut self, edits: &EditOverlay) -> Result<(), PipelineError> {
        for duration in &edits.removed_rows {
            self.remove_row(*duration)?;
        }
        for added in &edits.added_rows {
            self.push_row(added.session_duration_mins)?;
            for (workout_type, value) in &added.values {
                self.set(added.session_duration_mins, workout_type, *value)?;
            }
        }
        for cell in &edits.cells {
            self.set(cell.session_duration_mins, &cell.workout_type, cell.value)?;
        }
        Ok(())
    }

    /// Melt the matrix into one record per cell, column by column.
    pub fn unpivot(&self) -> Vec<LongFormRow> {
        let width = self.columns.len();
        let mut out = Vec::with_capacity(self.values.len());
        for (c, workout_type) in self.columns.iter().enumerate() {
            for (r, duration) in self.rows.iter().enumerate() {
                out.push(LongFormRow {
                    session_duration_mins: *duration,
                    workout_type: workout_type.clone(),
                    value: self.values[r * width + c],
                });
            }
        }
        out
    }
}

/// Overwrite of a single grid cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellEdit {
    pub session_duration_mins: i64,
    pub workout_type: String,
    pub value: f64,
}

/// Row appended by the client. Workout types not listed stay at 0.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AddedRow {
    pub session_duration_mins: i64,
    #[serde(default)]
    pub values: BTreeMap<String, f64>,
}

/// Edits made to a generated grid. Never written back to the session data.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EditOverlay {
    #[serde(default)]
    pub cells: Vec<CellEdit>,
    #[serde(default)]
    pub added_rows: Vec<AddedRow>,
    #[serde(default)]
    pub removed_rows: Vec<i64>,
}

impl EditOverlay {
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty() && self.added_rows.is_empty() && self.removed_rows.is_empty()
    }
}

/// Rows whose workout type and duration satisfy the selection.
pub fn filter_sessions<'a>(
    table: &'a SessionTable,
    selection: &FilterSelection,
) -> Vec<&'a MemberSession> {
    if selection.is_empty() {
        return Vec::new();
    }
    table
        .sessions()
        .iter()
        .filter(|s| selection.matches(&s.workout_type, s.session_duration_mins))
        .collect()
}

/// Aggregate the metric per (duration, workout type) over the retained rows.
///
/// Every retained row contributes its key, so a group whose metric cells are
/// all empty still appears (with the aggregate of nothing, 0).
pub fn group_and_aggregate(
    rows: &[&MemberSession],
    metric: Metric,
    aggregation: Aggregation,
) -> BTreeMap<(i64, String), f64> {
    let mut groups: BTreeMap<(i64, String), Vec<f64>> = BTreeMap::new();
    for row in rows {
        let values = groups
            .entry((row.session_duration_mins, row.workout_type.clone()))
            .or_default();
        if let Some(v) = row.metric(metric) {
            values.push(v);
        }
    }

    groups
        .into_iter()
        .map(|(key, values)| (key, aggregation.apply(&values)))
        .collect()
}

/// Spread grouped aggregates into a dense table over the observed durations
/// and the given columns. Missing combinations are 0; groups whose type is
/// not a column are dropped.
pub fn pivot(grouped: &BTreeMap<(i64, String), f64>, columns: &[String]) -> PivotTable {
    let cells: Vec<(i64, usize, f64)> = grouped
        .iter()
        .filter_map(|((duration, workout_type), value)| {
            let c = columns.iter().position(|col| col == workout_type)?;
            Some((*duration, c, *value))
        })
        .collect();

    // BTreeMap order keeps durations sorted, so dedup sees repeats adjacently.
    let mut rows: Vec<i64> = cells.iter().map(|(d, _, _)| *d).collect();
    rows.dedup();

    let width = columns.len();
    let mut table = PivotTable::zeros(rows, columns.to_vec());
    let mut r = 0;
    for (duration, c, value) in cells {
        while table.rows[r] != duration {
            r += 1;
        }
        table.values[r * width + c] = value;
    }
    table
}

/// Filter, group, pivot and sort in one call.
pub fn aggregate_sessions(
    table: &SessionTable,
    selection: &FilterSelection,
    metric: Metric,
    aggregation: Aggregation,
    order: SortOrder,
) -> PivotTable {
    let retained = filter_sessions(table, selection);
    let grouped = group_and_aggregate(&retained, metric, aggregation);
    let mut pivoted = pivot(&grouped, selection.workout_types());
    pivoted.sort_rows(order);

    log::debug!(
        "Aggregated {} of {} sessions into {}x{} {} table",
        retained.len(),
        table.len(),
        pivoted.rows().len(),
        pivoted.columns().len(),
        metric
    );
    pivoted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DurationRange;

    fn sample_table() -> SessionTable {
        SessionTable::new(vec![
            MemberSession::new(45, "Yoga", 200.0, 2.0),
            MemberSession::new(45, "HIIT", 300.0, 2.6),
            MemberSession::new(60, "Yoga", 250.0, 2.2),
            MemberSession::new(60, "Yoga", 150.0, 1.8),
            MemberSession::new(90, "Cardio", 700.0, 3.1),
        ])
    }

    fn selection(types: &[&str], lo: i64, hi: i64) -> FilterSelection {
        FilterSelection::new(types.iter().copied(), DurationRange::new(lo, hi))
    }

    #[test]
    fn test_filter_sessions() {
        let table = sample_table();
        let kept = filter_sessions(&table, &selection(&["Yoga"], 45, 60));
        assert_eq!(kept.len(), 3);
        assert!(kept.iter().all(|s| s.workout_type == "Yoga"));
    }

    #[test]
    fn test_group_sum_and_median() {
        let table = sample_table();
        let kept = filter_sessions(&table, &selection(&["Yoga"], 45, 60));

        let sums = group_and_aggregate(&kept, Metric::CaloriesBurned, Aggregation::Sum);
        assert_eq!(sums[&(60, "Yoga".to_string())], 400.0);

        let medians = group_and_aggregate(&kept, Metric::WaterIntake, Aggregation::Median);
        assert!((medians[&(60, "Yoga".to_string())] - 2.0).abs() < 1e-9);
        assert_eq!(medians[&(45, "Yoga".to_string())], 2.0);
    }

    #[test]
    fn test_group_with_missing_metric_keeps_key() {
        let mut row = MemberSession::new(75, "Strength", 0.0, 0.0);
        row.calories_burned = None;
        let rows = vec![&row];
        let grouped = group_and_aggregate(&rows, Metric::CaloriesBurned, Aggregation::Sum);
        assert_eq!(grouped[&(75, "Strength".to_string())], 0.0);
    }

    #[test]
    fn test_selected_type_without_rows_is_zero_column() {
        let table = sample_table();
        let pivoted = aggregate_sessions(
            &table,
            &selection(&["Yoga", "Strength"], 45, 60),
            Metric::CaloriesBurned,
            Aggregation::Sum,
            SortOrder::Ascending,
        );
        assert_eq!(pivoted.columns(), &["Yoga", "Strength"]);
        assert_eq!(pivoted.get(45, "Strength"), Some(0.0));
        assert_eq!(pivoted.get(60, "Strength"), Some(0.0));
    }

    #[test]
    fn test_sort_orders() {
        let table = sample_table();
        let sel = selection(&["Yoga", "HIIT", "Cardio"], 30, 120);

        let asc = aggregate_sessions(&table, &sel, Metric::CaloriesBurned, Aggregation::Sum, SortOrder::Ascending);
        assert_eq!(asc.rows(), &[45, 60, 90]);

        let desc = aggregate_sessions(&table, &sel, Metric::CaloriesBurned, Aggregation::Sum, SortOrder::Descending);
        assert_eq!(desc.rows(), &[90, 60, 45]);
        assert_eq!(desc.get(90, "Cardio"), Some(700.0));
        assert_eq!(desc.value_rows()[0], vec![0.0, 0.0, 700.0]);
    }

    #[test]
    fn test_empty_selection_yields_empty_table() {
        let table = sample_table();
        let none = aggregate_sessions(
            &table,
            &selection(&[], 30, 120),
            Metric::CaloriesBurned,
            Aggregation::Sum,
            SortOrder::Descending,
        );
        assert!(none.is_empty());
        assert!(none.unpivot().is_empty());

        let inverted = aggregate_sessions(
            &table,
            &selection(&["Yoga"], 60, 45),
            Metric::CaloriesBurned,
            Aggregation::Sum,
            SortOrder::Descending,
        );
        assert!(inverted.is_empty());
    }

    #[test]
    fn test_unpivot_is_column_major() {
        let table = PivotTable::from_rows(
            vec![45, 60],
            vec!["Yoga".to_string(), "HIIT".to_string()],
            vec![vec![200.0, 300.0], vec![250.0, 0.0]],
        )
        .unwrap();
        let long = table.unpivot();
        let keys: Vec<(i64, &str)> = long
            .iter()
            .map(|r| (r.session_duration_mins, r.workout_type.as_str()))
            .collect();
        assert_eq!(keys, vec![(45, "Yoga"), (60, "Yoga"), (45, "HIIT"), (60, "HIIT")]);
        assert_eq!(long[3].value, 0.0);
    }

    #[test]
    fn test_apply_edits() {
        let mut table = PivotTable::from_rows(
            vec![60, 45],
            vec!["Yoga".to_string(), "HIIT".to_string()],
            vec![vec![250.0, 0.0], vec![200.0, 300.0]],
        )
        .unwrap();

        let mut values = BTreeMap::new();
        values.insert("HIIT".to_string(), 410.0);
        let edits = EditOverlay {
            cells: vec![CellEdit {
                session_duration_mins: 45,
                workout_type: "Yoga".to_string(),
                value: 999.0,
            }],
            added_rows: vec![AddedRow {
                session_duration_mins: 75,
                values,
            }],
            removed_rows: vec![60],
        };
        table.apply_edits(&edits).unwrap();

        assert_eq!(table.rows(), &[45, 75]);
        assert_eq!(table.get(45, "Yoga"), Some(999.0));
        assert_eq!(table.get(45, "HIIT"), Some(300.0));
        assert_eq!(table.get(75, "Yoga"), Some(0.0));
        assert_eq!(table.get(75, "HIIT"), Some(410.0));
    }

    #[test]
    fn test_apply_edits_rejects_unknown_keys() {
        let mut table = PivotTable::zeros(vec![45], vec!["Yoga".to_string()]);

        let unknown_row = EditOverlay {
            removed_rows: vec![50],
            ..Default::default()
        };
        assert_eq!(table.apply_edits(&unknown_row), Err(PipelineError::UnknownRow(50)));

        let unknown_col = EditOverlay {
            cells: vec![CellEdit {
                session_duration_mins: 45,
                workout_type: "Pilates".to_string(),
                value: 1.0,
            }],
            ..Default::default()
        };
        assert_eq!(
            table.apply_edits(&unknown_col),
            Err(PipelineError::UnknownColumn("Pilates".to_string()))
        );

        let duplicate = EditOverlay {
            added_rows: vec![AddedRow {
                session_duration_mins: 45,
                values: BTreeMap::new(),
            }],
            ..Default::default()
        };
        assert_eq!(table.apply_edits(&duplicate), Err(PipelineError::DuplicateRow(45)));
    }

    #[test]
    fn test_from_rows_validates_shape() {
        let ragged = PivotTable::from_rows(
            vec![45, 60],
            vec!["Yoga".to_string()],
            vec![vec![1.0], vec![1.0, 2.0]],
        );
        assert!(matches!(ragged, Err(PipelineError::RaggedRow { row: 60, .. })));

        let short = PivotTable::from_rows(vec![45, 60], vec!["Yoga".to_string()], vec![vec![1.0]]);
        assert!(matches!(short, Err(PipelineError::RowCountMismatch { .. })));
    }

    #[test]
    fn test_json_roundtrip_uses_nested_rows() {
        let table = PivotTable::from_rows(
            vec![45],
            vec!["Yoga".to_string(), "HIIT".to_string()],
            vec![vec![200.0, 300.0]],
        )
        .unwrap();
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["values"], serde_json::json!([[200.0, 300.0]]));

        let back: PivotTable = serde_json::from_value(json).unwrap();
        assert_eq!(back, table);

        let bad = serde_json::json!({"rows": [45], "columns": ["Yoga"], "values": [[1.0, 2.0]]});
        assert!(serde_json::from_value::<PivotTable>(bad).is_err());
    }

    #[test]
    fn test_pivot_drops_groups_outside_columns() {
        let mut grouped = BTreeMap::new();
        grouped.insert((45, "Yoga".to_string()), 200.0);
        grouped.insert((60, "Cardio".to_string()), 700.0);
        grouped.insert((75, "HIIT".to_string()), 300.0);
        grouped.insert((75, "Yoga".to_string()), 150.0);

        let columns = vec!["Yoga".to_string(), "HIIT".to_string()];
        let table = pivot(&grouped, &columns);

        assert_eq!(table.rows(), &[45, 75]);
        assert_eq!(table.value_rows(), vec![vec![200.0, 0.0], vec![150.0, 300.0]]);
        assert_eq!(table.get(60, "Cardio"), None);
    }
}
