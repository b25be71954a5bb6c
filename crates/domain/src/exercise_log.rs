use std::{collections::BTreeMap, fmt, str::FromStr};

use chrono::NaiveDate;

use crate::{Exercise, ExerciseID, ReadError, UpdateError};

#[allow(async_fn_in_trait)]
pub trait ExerciseLogService {
    async fn get_exercise_logs(&self) -> BTreeMap<ExerciseLogKey, ExerciseLog>;
    async fn get_exercise_log(&self, exercise_id: ExerciseID, date: NaiveDate)
    -> Option<ExerciseLog>;
    async fn save_exercise_log(
        &self,
        exercise_id: ExerciseID,
        date: NaiveDate,
        log: ExerciseLog,
    ) -> bool;
    async fn get_recent_completions(&self, count: usize) -> Vec<(ExerciseLogKey, ExerciseLog)>;
}

/// Persistence side of the guided set workflow.
#[allow(async_fn_in_trait)]
pub trait TrainingService {
    /// Marks a set of `exercise` as done on `date`, saves the log and appends the set to the
    /// workout history. A log that does not exist yet starts with the configured number of sets.
    async fn complete_set(
        &self,
        exercise: &Exercise,
        date: NaiveDate,
        set_number: u32,
        time: Option<String>,
    ) -> Option<ExerciseLog>;
}

#[allow(async_fn_in_trait)]
pub trait ExerciseLogRepository {
    async fn read_exercise_logs(&self) -> Result<BTreeMap<ExerciseLogKey, ExerciseLog>, ReadError>;
    async fn replace_exercise_log(
        &self,
        key: ExerciseLogKey,
        log: ExerciseLog,
    ) -> Result<ExerciseLog, UpdateError>;
}

/// Identifies the log of one exercise on one date. The text form is `{exercise_id}_{date}`.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseLogKey {
    pub exercise_id: ExerciseID,
    pub date: NaiveDate,
}

impl ExerciseLogKey {
    #[must_use]
    pub fn new(exercise_id: ExerciseID, date: NaiveDate) -> Self {
        Self { exercise_id, date }
    }
}

impl fmt::Display for ExerciseLogKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.exercise_id, self.date.format("%Y-%m-%d"))
    }
}

impl FromStr for ExerciseLogKey {
    type Err = ExerciseLogKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, date) = s
            .split_once('_')
            .ok_or_else(|| ExerciseLogKeyError::Invalid(s.to_string()))?;
        let exercise_id = id
            .parse::<u32>()
            .map_err(|_| ExerciseLogKeyError::Invalid(s.to_string()))?;
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| ExerciseLogKeyError::Invalid(s.to_string()))?;
        Ok(Self::new(exercise_id.into(), date))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ExerciseLogKeyError {
    #[error("invalid exercise log key: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseLog {
    pub sets: Vec<SetState>,
    pub current_set: u32,
    pub completed: bool,
}

impl ExerciseLog {
    #[must_use]
    pub fn new(total_sets: u32) -> Self {
        Self {
            sets: (0..total_sets).map(|_| SetState::default()).collect(),
            current_set: 1,
            completed: false,
        }
    }

    /// Marks set `set_number` (starting at 1) as done and advances to the next set. The log is
    /// completed once the last set is done.
    ///
    /// A set may extend the log by at most one set. Set 0 and sets further out are rejected and
    /// leave the log unchanged.
    pub fn complete_set(&mut self, set_number: u32, time: Option<String>) -> bool {
        let Some(index) = set_number.checked_sub(1).map(|i| i as usize) else {
            return false;
        };
        if index > self.sets.len() {
            return false;
        }
        if index == self.sets.len() {
            self.sets.push(SetState::default());
        }
        self.sets[index] = SetState {
            completed: true,
            time,
        };
        self.current_set = set_number.saturating_add(1);
        self.completed = index + 1 >= self.sets.len();
        true
    }

    #[must_use]
    pub fn completed_sets(&self) -> usize {
        self.sets.iter().filter(|s| s.completed).count()
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SetState {
    pub completed: bool,
    pub time: Option<String>,
}

/// Completed logs, newest date first.
#[must_use]
pub fn recent_completions(
    logs: &BTreeMap<ExerciseLogKey, ExerciseLog>,
    count: usize,
) -> Vec<(ExerciseLogKey, ExerciseLog)> {
    let mut completed = logs
        .iter()
        .filter(|(_, log)| log.completed)
        .map(|(key, log)| (*key, log.clone()))
        .collect::<Vec<_>>();
    completed.sort_by(|(a, _), (b, _)| {
        b.date
            .cmp(&a.date)
            .then(b.exercise_id.cmp(&a.exercise_id))
    });
    completed.truncate(count);
    completed
}
