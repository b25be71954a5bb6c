use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use log::{debug, error};

use crate::{
    BackupRepository, BodyMeasurement, BodyMeasurementRepository, BodyMeasurementService,
    Category, CategoryProgress, CreateError, DailyEntry, DailyEntryRepository, DailyEntryService,
    DeleteError, Exercise, ExerciseFrequency, ExerciseID, ExerciseLog, ExerciseLogKey,
    ExerciseLogRepository, ExerciseLogService, ExercisePatch, ExerciseRepository,
    ExerciseService, ExportService, NewExercise, Profile, ProfileRepository, ProfileService,
    ProgressService, ReadError, TrainingService, UpdateError, WorkoutHistoryEntry,
    WorkoutHistoryRepository, WorkoutHistoryService, WorkoutRecord, category_progress,
    csv_report, exercise_frequency, exercise_history, month, recent_completions, week,
    weight_trend, workout_streak, workouts_in_range,
};

/// Entry point for the UI layer. Failures of the underlying repository are logged and turned
/// into empty values, so callers only ever see "nothing there" or "not saved".
pub struct Service<R> {
    repository: R,
    sets_per_exercise: u32,
}

pub const DEFAULT_SETS_PER_EXERCISE: u32 = 3;

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            sets_per_exercise: DEFAULT_SETS_PER_EXERCISE,
        }
    }

    /// Number of sets a new exercise log starts with. Values below 1 are raised to 1.
    #[must_use]
    pub fn with_sets_per_exercise(self, sets_per_exercise: u32) -> Self {
        Self {
            sets_per_exercise: sets_per_exercise.max(1),
            ..self
        }
    }

    #[must_use]
    pub fn sets_per_exercise(&self) -> u32 {
        self.sets_per_exercise
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::Unavailable) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: ProfileRepository> ProfileService for Service<R> {
    async fn get_profile(&self) -> Option<Profile> {
        log_on_error!(self.repository.read_profile(), ReadError, "get", "profile")
            .ok()
            .flatten()
    }

    async fn save_profile(&self, profile: Profile) -> bool {
        log_on_error!(
            self.repository.replace_profile(profile),
            UpdateError,
            "save",
            "profile"
        )
        .is_ok()
    }
}

impl<R: DailyEntryRepository> DailyEntryService for Service<R> {
    async fn get_daily_entries(&self) -> BTreeMap<NaiveDate, DailyEntry> {
        log_on_error!(
            self.repository.read_daily_entries(),
            ReadError,
            "get",
            "daily entries"
        )
        .unwrap_or_default()
    }

    async fn get_daily_entry(&self, date: NaiveDate) -> Option<DailyEntry> {
        self.get_daily_entries().await.remove(&date)
    }

    async fn save_daily_entry(&self, entry: DailyEntry) -> bool {
        log_on_error!(
            self.repository.replace_daily_entry(entry),
            UpdateError,
            "save",
            "daily entry"
        )
        .is_ok()
    }

    async fn get_week(&self, today: NaiveDate) -> Vec<(NaiveDate, Option<DailyEntry>)> {
        week(&self.get_daily_entries().await, today)
    }

    async fn get_weight_trend(&self, today: NaiveDate, days: u64) -> Vec<(NaiveDate, f64)> {
        weight_trend(&self.get_daily_entries().await, today, days)
    }
}

impl<R: ExerciseRepository> ExerciseService for Service<R> {
    async fn get_exercises(&self) -> Vec<Exercise> {
        log_on_error!(
            self.repository.read_exercises(),
            ReadError,
            "get",
            "exercises"
        )
        .unwrap_or_default()
    }

    async fn add_exercise(&self, exercise: NewExercise) -> Option<Exercise> {
        log_on_error!(
            self.repository.create_exercise(exercise),
            CreateError,
            "add",
            "exercise"
        )
        .ok()
    }

    async fn update_exercise(&self, id: ExerciseID, patch: ExercisePatch) -> Option<Exercise> {
        log_on_error!(
            self.repository.modify_exercise(id, patch),
            UpdateError,
            "update",
            "exercise"
        )
        .ok()
        .flatten()
    }

    async fn delete_exercise(&self, id: ExerciseID) -> bool {
        log_on_error!(
            self.repository.delete_exercise(id),
            DeleteError,
            "delete",
            "exercise"
        )
        .is_ok()
    }
}

impl<R: ExerciseLogRepository> ExerciseLogService for Service<R> {
    async fn get_exercise_logs(&self) -> BTreeMap<ExerciseLogKey, ExerciseLog> {
        log_on_error!(
            self.repository.read_exercise_logs(),
            ReadError,
            "get",
            "exercise logs"
        )
        .unwrap_or_default()
    }

    async fn get_exercise_log(
        &self,
        exercise_id: ExerciseID,
        date: NaiveDate,
    ) -> Option<ExerciseLog> {
        self.get_exercise_logs()
            .await
            .remove(&ExerciseLogKey::new(exercise_id, date))
    }

    async fn save_exercise_log(
        &self,
        exercise_id: ExerciseID,
        date: NaiveDate,
        log: ExerciseLog,
    ) -> bool {
        log_on_error!(
            self.repository
                .replace_exercise_log(ExerciseLogKey::new(exercise_id, date), log),
            UpdateError,
            "save",
            "exercise log"
        )
        .is_ok()
    }

    async fn get_recent_completions(&self, count: usize) -> Vec<(ExerciseLogKey, ExerciseLog)> {
        recent_completions(&self.get_exercise_logs().await, count)
    }
}

impl<R: ExerciseLogRepository + WorkoutHistoryRepository> TrainingService for Service<R> {
    async fn complete_set(
        &self,
        exercise: &Exercise,
        date: NaiveDate,
        set_number: u32,
        time: Option<String>,
    ) -> Option<ExerciseLog> {
        let mut log = self
            .get_exercise_log(exercise.id, date)
            .await
            .unwrap_or_else(|| ExerciseLog::new(self.sets_per_exercise));
        if !log.complete_set(set_number, time) {
            error!("failed to complete set {set_number} of exercise {}", exercise.id);
            return None;
        }

        if !self.save_exercise_log(exercise.id, date, log.clone()).await {
            return None;
        }

        let record = WorkoutRecord {
            exercise_id: exercise.id,
            exercise_name: exercise.name.to_string(),
            category: Some(exercise.category),
            set_number,
            completed: true,
            all_sets_completed: log.completed.then_some(true),
        };
        self.save_workout(date, record).await?;

        Some(log)
    }
}

impl<R: BodyMeasurementRepository> BodyMeasurementService for Service<R> {
    async fn get_body_measurements(&self) -> BTreeMap<NaiveDate, BodyMeasurement> {
        log_on_error!(
            self.repository.read_body_measurements(),
            ReadError,
            "get",
            "body measurements"
        )
        .unwrap_or_default()
    }

    async fn get_body_measurement(&self, date: NaiveDate) -> Option<BodyMeasurement> {
        self.get_body_measurements().await.remove(&date)
    }

    async fn save_body_measurement(&self, body_measurement: BodyMeasurement) -> bool {
        log_on_error!(
            self.repository.replace_body_measurement(body_measurement),
            UpdateError,
            "save",
            "body measurement"
        )
        .is_ok()
    }
}

impl<R: WorkoutHistoryRepository> WorkoutHistoryService for Service<R> {
    async fn get_workout_history(&self) -> BTreeMap<NaiveDate, Vec<WorkoutHistoryEntry>> {
        log_on_error!(
            self.repository.read_workout_history(),
            ReadError,
            "get",
            "workout history"
        )
        .unwrap_or_default()
    }

    async fn get_workouts_on(&self, date: NaiveDate) -> Vec<WorkoutHistoryEntry> {
        self.get_workout_history()
            .await
            .remove(&date)
            .unwrap_or_default()
    }

    async fn get_workouts_in_range(
        &self,
        first: NaiveDate,
        last: NaiveDate,
    ) -> Vec<(NaiveDate, WorkoutHistoryEntry)> {
        workouts_in_range(&self.get_workout_history().await, first, last)
    }

    async fn get_month(
        &self,
        year: i32,
        month_of_year: u32,
    ) -> BTreeMap<NaiveDate, Vec<WorkoutHistoryEntry>> {
        month(&self.get_workout_history().await, year, month_of_year)
    }

    async fn save_workout(
        &self,
        date: NaiveDate,
        record: WorkoutRecord,
    ) -> Option<WorkoutHistoryEntry> {
        log_on_error!(
            self.repository.append_workout(date, record),
            CreateError,
            "save",
            "workout"
        )
        .ok()
    }

    async fn get_workout_streak(&self, today: NaiveDate) -> u32 {
        workout_streak(&self.get_workout_history().await, today)
    }

    async fn get_exercise_history(&self, id: ExerciseID) -> Vec<(NaiveDate, WorkoutHistoryEntry)> {
        exercise_history(&self.get_workout_history().await, id)
    }

    async fn get_exercise_frequency(&self, id: ExerciseID, now: NaiveDateTime) -> ExerciseFrequency {
        exercise_frequency(&self.get_workout_history().await, id, now)
    }
}

impl<R: ExerciseRepository + ExerciseLogRepository> ProgressService for Service<R> {
    async fn get_category_progress(
        &self,
        selection: Option<Category>,
        today: NaiveDate,
    ) -> CategoryProgress {
        if selection.is_none() {
            return CategoryProgress::default();
        }
        category_progress(
            &self.get_exercises().await,
            &self.get_exercise_logs().await,
            selection,
            today,
        )
    }
}

impl<R> ExportService for Service<R>
where
    R: BackupRepository + DailyEntryRepository + ExerciseRepository + WorkoutHistoryRepository,
{
    async fn export_json(&self) -> Option<String> {
        log_on_error!(
            self.repository.export_json(),
            ReadError,
            "export",
            "data as JSON"
        )
        .ok()
    }

    async fn import_json(&self, json: &str) -> bool {
        log_on_error!(
            self.repository.import_json(json),
            UpdateError,
            "import",
            "data from JSON"
        )
        .is_ok()
    }

    async fn export_csv(&self, today: NaiveDate) -> Option<String> {
        let daily_entries = log_on_error!(
            self.repository.read_daily_entries(),
            ReadError,
            "export",
            "daily entries as CSV"
        )
        .ok()?;
        let exercises = log_on_error!(
            self.repository.read_exercises(),
            ReadError,
            "export",
            "exercises as CSV"
        )
        .ok()?;
        let workout_history = log_on_error!(
            self.repository.read_workout_history(),
            ReadError,
            "export",
            "workout history as CSV"
        )
        .ok()?;
        Some(csv_report(
            &daily_entries,
            &exercises,
            &workout_history,
            today,
        ))
    }
}
