//! CSV ingestion for the member exercise tracking file.
//!
//! Loading is all-or-nothing: a missing file, a missing required column or a
//! cell that cannot be coerced aborts the load with a [`RepositoryError`]
//! pointing at the source, column and row.

use std::io::Read;
use std::path::Path;

use super::checksum::calculate_checksum;
use super::repository::{ErrorContext, RepositoryError, RepositoryResult};
use crate::models::{MemberSession, SessionTable};

pub const DURATION_COLUMN: &str = "session_duration_mins";
pub const WORKOUT_TYPE_COLUMN: &str = "Workout_Type";
pub const CALORIES_COLUMN: &str = "Calories_Burned";
pub const WATER_INTAKE_COLUMN: &str = "Water_Intake";
pub const BMI_COLUMN: &str = "BMI";
pub const RESTING_BPM_COLUMN: &str = "Resting_BPM";
pub const FAT_PERCENTAGE_COLUMN: &str = "Fat_Percentage";

/// Columns the header must contain. Any other column is ignored.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    DURATION_COLUMN,
    WORKOUT_TYPE_COLUMN,
    CALORIES_COLUMN,
    WATER_INTAKE_COLUMN,
    BMI_COLUMN,
    RESTING_BPM_COLUMN,
    FAT_PERCENTAGE_COLUMN,
];

const OPERATION: &str = "load_sessions";

/// A parsed session table with its provenance.
#[derive(Debug, Clone)]
pub struct LoadedSessions {
    pub table: SessionTable,
    pub source: String,
    pub checksum: String,
}

/// Read and parse the data file at `path`.
pub fn load_sessions_from_path(path: &Path) -> RepositoryResult<LoadedSessions> {
    let source = path.display().to_string();
    let bytes = std::fs::read(path).map_err(|e| {
        RepositoryError::io(
            format!("Failed to read data file: {}", e),
            ErrorContext::new(OPERATION).with_source(&source),
        )
    })?;

    let checksum = calculate_checksum(&bytes);
    let table = parse_sessions(bytes.as_slice(), &source)?;

    log::info!(
        "Loaded {} sessions ({} workout types) from {}",
        table.len(),
        table.workout_types().len(),
        source
    );

    Ok(LoadedSessions {
        table,
        source,
        checksum,
    })
}

/// Column positions resolved from the header row.
struct ColumnIndex {
    duration: usize,
    workout_type: usize,
    calories: usize,
    water_intake: usize,
    bmi: usize,
    resting_bpm: usize,
    fat_percentage: usize,
}

impl ColumnIndex {
    fn resolve(headers: &csv::StringRecord, source: &str) -> RepositoryResult<Self> {
        let find = |name: &str| -> RepositoryResult<usize> {
            headers.iter().position(|h| h == name).ok_or_else(|| {
                RepositoryError::schema(
                    format!("missing required column '{}'", name),
                    ErrorContext::new(OPERATION)
                        .with_source(source)
                        .with_column(name),
                )
            })
        };

        Ok(Self {
            duration: find(DURATION_COLUMN)?,
            workout_type: find(WORKOUT_TYPE_COLUMN)?,
            calories: find(CALORIES_COLUMN)?,
            water_intake: find(WATER_INTAKE_COLUMN)?,
            bmi: find(BMI_COLUMN)?,
            resting_bpm: find(RESTING_BPM_COLUMN)?,
            fat_percentage: find(FAT_PERCENTAGE_COLUMN)?,
        })
    }
}

/// Parse CSV content with a header row into a [`SessionTable`].
pub fn parse_sessions<R: Read>(reader: R, source: &str) -> RepositoryResult<SessionTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers().map_err(|e| {
        RepositoryError::parse(
            format!("Failed to read header: {}", e),
            ErrorContext::new(OPERATION).with_source(source),
        )
    })?;
    let columns = ColumnIndex::resolve(headers, source)?;

    let mut sessions = Vec::new();
    for (i, record) in csv_reader.records().enumerate() {
        let row = i as u64 + 1;
        let record = record.map_err(|e| {
            RepositoryError::parse(
                format!("Malformed record: {}", e),
                ErrorContext::new(OPERATION).with_source(source).with_row(row),
            )
        })?;
        sessions.push(parse_record(&record, &columns, source, row)?);
    }

    Ok(SessionTable::new(sessions))
}

fn parse_record(
    record: &csv::StringRecord,
    columns: &ColumnIndex,
    source: &str,
    row: u64,
) -> RepositoryResult<MemberSession> {
    let cell = |idx: usize| record.get(idx).unwrap_or("");
    let cell_error = |column: &str, message: String| {
        RepositoryError::parse(
            message,
            ErrorContext::new(OPERATION)
                .with_source(source)
                .with_column(column)
                .with_row(row),
        )
    };

    let raw_duration = cell(columns.duration);
    let session_duration_mins = coerce_duration(raw_duration).ok_or_else(|| {
        cell_error(
            DURATION_COLUMN,
            format!("cannot coerce '{}' to integer minutes", raw_duration),
        )
    })?;

    let workout_type = cell(columns.workout_type);
    if workout_type.is_empty() {
        return Err(cell_error(WORKOUT_TYPE_COLUMN, "empty workout type".to_string()));
    }

    let number = |idx: usize, column: &str| {
        parse_optional_number(cell(idx))
            .ok_or_else(|| cell_error(column, format!("'{}' is not a number", cell(idx))))
    };

    Ok(MemberSession {
        session_duration_mins,
        workout_type: workout_type.to_string(),
        calories_burned: number(columns.calories, CALORIES_COLUMN)?,
        water_intake: number(columns.water_intake, WATER_INTAKE_COLUMN)?,
        bmi: number(columns.bmi, BMI_COLUMN)?,
        resting_bpm: number(columns.resting_bpm, RESTING_BPM_COLUMN)?,
        fat_percentage: number(columns.fat_percentage, FAT_PERCENTAGE_COLUMN)?,
    })
}

/// Integer text as-is, decimal text truncated toward zero.
pub fn coerce_duration(raw: &str) -> Option<i64> {
    if let Ok(value) = raw.parse::<i64>() {
        return Some(value);
    }
    let value = raw.parse::<f64>().ok()?;
    if value.is_finite() {
        Some(value.trunc() as i64)
    } else {
        None
    }
}

/// `Some(None)` for an empty or NaN cell, `None` for non-numeric text.
fn parse_optional_number(raw: &str) -> Option<Option<f64>> {
    if raw.is_empty() {
        return Some(None);
    }
    let value = raw.parse::<f64>().ok()?;
    if value.is_nan() {
        Some(None)
    } else {
        Some(Some(value))
    }
}
