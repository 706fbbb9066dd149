#![allow(dead_code)]

use std::collections::HashSet;
use std::io::Write;
use std::sync::Mutex;

use gym_dashboard::models::{MemberSession, SessionTable};
use tempfile::NamedTempFile;

static ENV_LOCK: Mutex<()> = Mutex::new(());

pub const CSV_HEADER: &str =
    "Age,session_duration_mins,Workout_Type,Calories_Burned,Water_Intake,BMI,Resting_BPM,Fat_Percentage";

/// Runs `f` with environment variables temporarily modified.
///
/// This is panic-safe (restores variables on unwind) and also serializes access to
/// process-global env vars to avoid flaky tests when Rust runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// The three-row dataset used by the dashboard scenarios.
pub fn scenario_sessions() -> Vec<MemberSession> {
    vec![
        MemberSession::new(45, "Yoga", 200.0, 2.0),
        MemberSession::new(45, "HIIT", 300.0, 2.5),
        MemberSession::new(60, "Yoga", 250.0, 2.2),
    ]
}

pub fn scenario_table() -> SessionTable {
    SessionTable::new(scenario_sessions())
}

/// Write `rows` (without header) to a temp CSV with the standard header.
pub fn write_csv(rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", CSV_HEADER).unwrap();
    for row in rows {
        writeln!(file, "{}", row).unwrap();
    }
    file.flush().unwrap();
    file
}

/// Path to the sample data file shipped with the crate.
pub fn sample_data_path() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join("gym_members_exercise_tracking_cleaned.csv")
}
