mod support;

use gym_dashboard::models::{DurationRange, FilterSelection, Metric};
use gym_dashboard::services::pivot::{aggregate_sessions, CellEdit, EditOverlay, SortOrder};
use gym_dashboard::services::stats::Aggregation;
use gym_dashboard::services::{build_panel, PanelKind};

use support::scenario_table;

fn calories(selection: &FilterSelection, order: SortOrder) -> gym_dashboard::services::PivotTable {
    aggregate_sessions(
        &scenario_table(),
        selection,
        Metric::CaloriesBurned,
        Aggregation::Sum,
        order,
    )
}

#[test]
fn test_two_types_two_durations() {
    let selection = FilterSelection::new(["Yoga", "HIIT"], DurationRange::new(45, 60));
    let table = calories(&selection, SortOrder::Ascending);

    assert_eq!(table.rows(), &[45, 60]);
    assert_eq!(table.columns(), &["Yoga", "HIIT"]);
    assert_eq!(table.get(45, "Yoga"), Some(200.0));
    assert_eq!(table.get(45, "HIIT"), Some(300.0));
    assert_eq!(table.get(60, "Yoga"), Some(250.0));
    assert_eq!(table.get(60, "HIIT"), Some(0.0));
}

#[test]
fn test_range_without_rows_is_empty() {
    let selection = FilterSelection::new(["Yoga", "HIIT"], DurationRange::new(90, 120));
    let table = calories(&selection, SortOrder::Descending);

    assert!(table.is_empty());
    assert!(table.unpivot().is_empty());
}

#[test]
fn test_edit_reaches_chart_only() {
    let selection = FilterSelection::new(["Yoga", "HIIT"], DurationRange::new(45, 60));
    let mut table = calories(&selection, SortOrder::Descending);
    let before = table.unpivot();

    table
        .apply_edits(&EditOverlay {
            cells: vec![CellEdit {
                session_duration_mins: 45,
                workout_type: "Yoga".to_string(),
                value: 999.0,
            }],
            ..Default::default()
        })
        .unwrap();
    let after = table.unpivot();

    assert_eq!(before.len(), after.len());
    for (b, a) in before.iter().zip(&after) {
        assert_eq!(b.session_duration_mins, a.session_duration_mins);
        assert_eq!(b.workout_type, a.workout_type);
        if a.session_duration_mins == 45 && a.workout_type == "Yoga" {
            assert_eq!(a.value, 999.0);
        } else {
            assert_eq!(a.value, b.value);
        }
    }

    // The source table is untouched: recomputing gives the original value.
    let fresh = calories(&selection, SortOrder::Descending);
    assert_eq!(fresh.get(45, "Yoga"), Some(200.0));
}

#[test]
fn test_unknown_workout_type_is_silent() {
    let selection = FilterSelection::new(["Zumba"], DurationRange::new(30, 120));
    let table = calories(&selection, SortOrder::Ascending);
    assert!(table.is_empty());
    assert_eq!(table.columns(), &["Zumba"]);
}

#[test]
fn test_missing_duration_in_range_has_no_row() {
    let selection = FilterSelection::new(["Yoga"], DurationRange::new(30, 120));
    let table = calories(&selection, SortOrder::Ascending);
    // 30..=120 contains many durations, only observed ones become rows.
    assert_eq!(table.rows(), &[45, 60]);
}

#[test]
fn test_panels_sort_by_caller_order() {
    let selection = FilterSelection::new(["Yoga", "HIIT"], DurationRange::new(45, 60));
    let asc = build_panel(&scenario_table(), PanelKind::Calories, selection.clone(), SortOrder::Ascending, None)
        .unwrap();
    let desc = build_panel(&scenario_table(), PanelKind::WaterIntake, selection, SortOrder::Descending, None)
        .unwrap();

    assert_eq!(asc.table.rows(), &[45, 60]);
    assert_eq!(desc.table.rows(), &[60, 45]);
    assert_eq!(desc.table.get(45, "HIIT"), Some(2.5));
}
