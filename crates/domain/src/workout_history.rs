use std::collections::BTreeMap;

use chrono::{DateTime, Days, Local, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::{Category, CreateError, ExerciseID, ReadError};

#[allow(async_fn_in_trait)]
pub trait WorkoutHistoryService {
    async fn get_workout_history(&self) -> BTreeMap<NaiveDate, Vec<WorkoutHistoryEntry>>;
    async fn get_workouts_on(&self, date: NaiveDate) -> Vec<WorkoutHistoryEntry>;
    async fn get_workouts_in_range(
        &self,
        first: NaiveDate,
        last: NaiveDate,
    ) -> Vec<(NaiveDate, WorkoutHistoryEntry)>;
    async fn get_month(&self, year: i32, month: u32)
    -> BTreeMap<NaiveDate, Vec<WorkoutHistoryEntry>>;
    async fn save_workout(
        &self,
        date: NaiveDate,
        record: WorkoutRecord,
    ) -> Option<WorkoutHistoryEntry>;
    async fn get_workout_streak(&self, today: NaiveDate) -> u32;
    async fn get_exercise_history(&self, id: ExerciseID) -> Vec<(NaiveDate, WorkoutHistoryEntry)>;
    async fn get_exercise_frequency(&self, id: ExerciseID, now: NaiveDateTime)
    -> ExerciseFrequency;

    async fn get_current_workout_streak(&self) -> u32 {
        self.get_workout_streak(Local::now().date_naive()).await
    }

    async fn get_current_exercise_frequency(&self, id: ExerciseID) -> ExerciseFrequency {
        self.get_exercise_frequency(id, Local::now().naive_local())
            .await
    }
}

#[allow(async_fn_in_trait)]
pub trait WorkoutHistoryRepository {
    async fn read_workout_history(
        &self,
    ) -> Result<BTreeMap<NaiveDate, Vec<WorkoutHistoryEntry>>, ReadError>;
    /// Appends to the list of `date`. The timestamp is assigned here, not by the caller.
    async fn append_workout(
        &self,
        date: NaiveDate,
        record: WorkoutRecord,
    ) -> Result<WorkoutHistoryEntry, CreateError>;
}

/// A completed set as reported by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutRecord {
    pub exercise_id: ExerciseID,
    pub exercise_name: String,
    pub category: Option<Category>,
    pub set_number: u32,
    pub completed: bool,
    pub all_sets_completed: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutHistoryEntry {
    pub exercise_id: ExerciseID,
    pub exercise_name: String,
    pub category: Option<Category>,
    pub set_number: u32,
    pub completed: bool,
    pub all_sets_completed: Option<bool>,
    pub timestamp: DateTime<Utc>,
}

impl WorkoutHistoryEntry {
    #[must_use]
    pub fn new(record: WorkoutRecord, timestamp: DateTime<Utc>) -> Self {
        Self {
            exercise_id: record.exercise_id,
            exercise_name: record.exercise_name,
            category: record.category,
            set_number: record.set_number,
            completed: record.completed,
            all_sets_completed: record.all_sets_completed,
            timestamp,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExerciseFrequency {
    pub total_count: usize,
    pub last_done: Option<NaiveDate>,
    pub days_since_last_done: Option<i64>,
}

/// Number of consecutive days with workouts, ending today or, if nothing was done today yet,
/// ending yesterday.
#[must_use]
pub fn workout_streak(
    history: &BTreeMap<NaiveDate, Vec<WorkoutHistoryEntry>>,
    today: NaiveDate,
) -> u32 {
    let has_workouts = |date: &NaiveDate| history.get(date).is_some_and(|w| !w.is_empty());

    let mut streak = 0;
    if has_workouts(&today) {
        streak = 1;
    }

    let mut current = today.checked_sub_days(Days::new(1));
    while let Some(date) = current {
        if !has_workouts(&date) {
            break;
        }
        streak += 1;
        current = date.checked_sub_days(Days::new(1));
    }

    streak
}

/// All entries of one exercise, newest date first. Entries of the same date keep their order.
#[must_use]
pub fn exercise_history(
    history: &BTreeMap<NaiveDate, Vec<WorkoutHistoryEntry>>,
    id: ExerciseID,
) -> Vec<(NaiveDate, WorkoutHistoryEntry)> {
    history
        .iter()
        .rev()
        .flat_map(|(date, workouts)| {
            workouts
                .iter()
                .filter(move |w| w.exercise_id == id)
                .map(move |w| (*date, w.clone()))
        })
        .collect()
}

#[must_use]
pub fn exercise_frequency(
    history: &BTreeMap<NaiveDate, Vec<WorkoutHistoryEntry>>,
    id: ExerciseID,
    now: NaiveDateTime,
) -> ExerciseFrequency {
    let entries = exercise_history(history, id);
    let last_done = entries.first().map(|(date, _)| *date);
    ExerciseFrequency {
        total_count: entries.len(),
        last_done,
        days_since_last_done: last_done.map(|date| {
            (now - date.and_time(NaiveTime::MIN))
                .num_seconds()
                .div_euclid(24 * 60 * 60)
        }),
    }
}

/// Entries of every date from `first` to `last` (inclusive), in date order.
#[must_use]
pub fn workouts_in_range(
    history: &BTreeMap<NaiveDate, Vec<WorkoutHistoryEntry>>,
    first: NaiveDate,
    last: NaiveDate,
) -> Vec<(NaiveDate, WorkoutHistoryEntry)> {
    if first > last {
        return vec![];
    }
    first
        .iter_days()
        .take_while(|date| *date <= last)
        .flat_map(|date| {
            history
                .get(&date)
                .into_iter()
                .flatten()
                .map(move |w| (date, w.clone()))
        })
        .collect()
}

/// Dates of the given month that have workouts, mapped to their entries.
#[must_use]
pub fn month(
    history: &BTreeMap<NaiveDate, Vec<WorkoutHistoryEntry>>,
    year: i32,
    month: u32,
) -> BTreeMap<NaiveDate, Vec<WorkoutHistoryEntry>> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return BTreeMap::new();
    };
    let last = first
        .checked_add_months(chrono::Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX);

    let mut result: BTreeMap<NaiveDate, Vec<WorkoutHistoryEntry>> = BTreeMap::new();
    for (date, workout) in workouts_in_range(history, first, last) {
        result.entry(date).or_default().push(workout);
    }
    result
}
