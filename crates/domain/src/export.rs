use std::{collections::BTreeMap, fmt::Write};

use chrono::{Local, NaiveDate};

use crate::{DailyEntry, Exercise, ReadError, UpdateError, WorkoutHistoryEntry};

#[allow(async_fn_in_trait)]
pub trait ExportService {
    async fn export_json(&self) -> Option<String>;
    async fn import_json(&self, json: &str) -> bool;
    async fn export_csv(&self, today: NaiveDate) -> Option<String>;

    /// CSV report dated with the local calendar date.
    async fn export_current_csv(&self) -> Option<String> {
        self.export_csv(Local::now().date_naive()).await
    }
}

/// Full snapshot of every collection as a JSON bundle.
#[allow(async_fn_in_trait)]
pub trait BackupRepository {
    async fn export_json(&self) -> Result<String, ReadError>;
    async fn import_json(&self, json: &str) -> Result<(), UpdateError>;
}

pub const CSV_HEADER: &str = "Type,Date,Data";

/// Human-readable report of daily entries, exercises and workouts. Profile and body
/// measurements are not part of it.
#[must_use]
pub fn csv_report(
    daily_entries: &BTreeMap<NaiveDate, DailyEntry>,
    exercises: &[Exercise],
    workout_history: &BTreeMap<NaiveDate, Vec<WorkoutHistoryEntry>>,
    today: NaiveDate,
) -> String {
    let mut csv = format!("{CSV_HEADER}\n");

    for (date, entry) in daily_entries {
        row(
            &mut csv,
            "Daily Entry",
            *date,
            &format!(
                "Weight: {}kg, Steps: {}, VStepper: {}",
                entry.weight, entry.steps, entry.vstepper_steps
            ),
        );
    }

    for exercise in exercises {
        row(
            &mut csv,
            "Exercise",
            today,
            &format!(
                "{}, {}, {}",
                exercise.name, exercise.category, exercise.description
            ),
        );
    }

    for (date, workouts) in workout_history {
        for workout in workouts {
            row(
                &mut csv,
                "Workout",
                *date,
                &format!(
                    "{}, Set {}, Completed: {}",
                    workout.exercise_name, workout.set_number, workout.completed
                ),
            );
        }
    }

    csv
}

fn row(csv: &mut String, kind: &str, date: NaiveDate, data: &str) {
    let _ = writeln!(
        csv,
        "{kind},{},\"{}\"",
        date.format("%Y-%m-%d"),
        data.replace('"', "\"\"")
    );
}
