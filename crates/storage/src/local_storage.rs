use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use log::debug;
use serde::{Serialize, de::DeserializeOwned};
use strum::{AsRefStr, EnumIter};
use tokio::sync::{Mutex, MutexGuard};

use crate::{KeyValueStore, domain, record};

pub type DailyEntries = BTreeMap<NaiveDate, record::DailyEntry>;
pub type Exercises = Vec<record::Exercise>;
pub type ExerciseLogs = BTreeMap<String, record::ExerciseLog>;
pub type BodyMeasurements = BTreeMap<NaiveDate, record::BodyMeasurement>;
pub type WorkoutHistory = BTreeMap<NaiveDate, Vec<record::WorkoutHistoryEntry>>;

/// Names of the stored collections, one store key each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Key {
    Profile,
    DailyEntries,
    Exercises,
    ExerciseLogs,
    BodyMeasurements,
    WorkoutHistory,
}

#[derive(Debug, Default)]
struct Locks {
    profile: Mutex<()>,
    daily_entries: Mutex<()>,
    exercises: Mutex<()>,
    exercise_logs: Mutex<()>,
    body_measurements: Mutex<()>,
    workout_history: Mutex<()>,
}

/// Repository keeping every collection as one JSON value in a key-value store.
///
/// Each read-modify-write of a collection holds the lock of that collection, so concurrent
/// writers sharing one `LocalStorage` do not lose updates.
#[derive(Debug)]
pub struct LocalStorage<S> {
    store: S,
    prefix: String,
    locks: Locks,
}

impl<S: KeyValueStore> LocalStorage<S> {
    pub fn new(store: S) -> Self {
        Self::with_prefix(store, "")
    }

    pub fn with_prefix(store: S, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
            locks: Locks::default(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn key(&self, key: Key) -> String {
        format!("{}{}", self.prefix, key.as_ref())
    }

    pub(crate) async fn lock(&self, key: Key) -> MutexGuard<'_, ()> {
        match key {
            Key::Profile => &self.locks.profile,
            Key::DailyEntries => &self.locks.daily_entries,
            Key::Exercises => &self.locks.exercises,
            Key::ExerciseLogs => &self.locks.exercise_logs,
            Key::BodyMeasurements => &self.locks.body_measurements,
            Key::WorkoutHistory => &self.locks.workout_history,
        }
        .lock()
        .await
    }

    /// An absent key reads as the default value.
    pub(crate) async fn read<T: DeserializeOwned + Default>(
        &self,
        key: Key,
    ) -> Result<T, domain::StorageError> {
        match self.store.get(&self.key(key)).await? {
            Some(value) => serde_json::from_str(&value)
                .map_err(|err| malformed(format!("{}: {err}", key.as_ref()))),
            None => Ok(T::default()),
        }
    }

    pub(crate) async fn write<T: Serialize>(
        &self,
        key: Key,
        value: &T,
    ) -> Result<(), domain::StorageError> {
        let value = serde_json::to_string(value)
            .map_err(|err| domain::StorageError::Other(Box::new(err)))?;
        debug!("writing {} ({} bytes)", self.key(key), value.len());
        Ok(self.store.set(&self.key(key), value).await?)
    }

    pub(crate) async fn remove(&self, key: Key) -> Result<(), domain::StorageError> {
        debug!("removing {}", self.key(key));
        Ok(self.store.remove(&self.key(key)).await?)
    }

    async fn update<T, U>(
        &self,
        key: Key,
        f: impl FnOnce(&mut T) -> U,
    ) -> Result<U, domain::StorageError>
    where
        T: Serialize + DeserializeOwned + Default,
    {
        let _guard = self.lock(key).await;
        let mut value = self.read(key).await?;
        let result = f(&mut value);
        self.write(key, &value).await?;
        Ok(result)
    }

    async fn domain_exercises(&self) -> Result<Vec<domain::Exercise>, domain::StorageError> {
        self.read::<Exercises>(Key::Exercises)
            .await?
            .into_iter()
            .map(|e| domain::Exercise::try_from(e).map_err(malformed))
            .collect()
    }
}

pub(crate) fn malformed(err: impl ToString) -> domain::StorageError {
    domain::StorageError::Malformed(err.to_string())
}

impl<S: KeyValueStore> domain::ProfileRepository for LocalStorage<S> {
    async fn read_profile(&self) -> Result<Option<domain::Profile>, domain::ReadError> {
        Ok(self
            .read::<Option<record::Profile>>(Key::Profile)
            .await?
            .map(domain::Profile::from))
    }

    async fn replace_profile(
        &self,
        profile: domain::Profile,
    ) -> Result<domain::Profile, domain::UpdateError> {
        let _guard = self.lock(Key::Profile).await;
        self.write(Key::Profile, &record::Profile::from(profile))
            .await?;
        Ok(profile)
    }
}

impl<S: KeyValueStore> domain::DailyEntryRepository for LocalStorage<S> {
    async fn read_daily_entries(
        &self,
    ) -> Result<BTreeMap<NaiveDate, domain::DailyEntry>, domain::ReadError> {
        Ok(self
            .read::<DailyEntries>(Key::DailyEntries)
            .await?
            .into_iter()
            .map(|(date, entry)| {
                (
                    date,
                    domain::DailyEntry {
                        date,
                        ..entry.into()
                    },
                )
            })
            .collect())
    }

    async fn replace_daily_entry(
        &self,
        entry: domain::DailyEntry,
    ) -> Result<domain::DailyEntry, domain::UpdateError> {
        self.update(Key::DailyEntries, |entries: &mut DailyEntries| {
            entries.insert(entry.date, record::DailyEntry::from(&entry));
        })
        .await?;
        Ok(entry)
    }
}

impl<S: KeyValueStore> domain::ExerciseRepository for LocalStorage<S> {
    async fn read_exercises(&self) -> Result<Vec<domain::Exercise>, domain::ReadError> {
        Ok(self.domain_exercises().await?)
    }

    async fn create_exercise(
        &self,
        exercise: domain::NewExercise,
    ) -> Result<domain::Exercise, domain::CreateError> {
        let _guard = self.lock(Key::Exercises).await;
        let mut exercises = self.domain_exercises().await?;
        let exercise = domain::Exercise::with_id(domain::ExerciseID::next(&exercises), exercise);
        exercises.push(exercise.clone());
        self.write(
            Key::Exercises,
            &exercises.iter().map(record::Exercise::from).collect::<Exercises>(),
        )
        .await?;
        Ok(exercise)
    }

    async fn modify_exercise(
        &self,
        id: domain::ExerciseID,
        patch: domain::ExercisePatch,
    ) -> Result<Option<domain::Exercise>, domain::UpdateError> {
        let _guard = self.lock(Key::Exercises).await;
        let mut exercises = self.domain_exercises().await?;
        let Some(exercise) = exercises.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };
        exercise.apply(patch);
        let exercise = exercise.clone();
        self.write(
            Key::Exercises,
            &exercises.iter().map(record::Exercise::from).collect::<Exercises>(),
        )
        .await?;
        Ok(Some(exercise))
    }

    async fn delete_exercise(
        &self,
        id: domain::ExerciseID,
    ) -> Result<domain::ExerciseID, domain::DeleteError> {
        self.update(Key::Exercises, |exercises: &mut Exercises| {
            exercises.retain(|e| e.id != *id);
        })
        .await?;
        Ok(id)
    }
}

impl<S: KeyValueStore> domain::ExerciseLogRepository for LocalStorage<S> {
    async fn read_exercise_logs(
        &self,
    ) -> Result<BTreeMap<domain::ExerciseLogKey, domain::ExerciseLog>, domain::ReadError> {
        self.read::<ExerciseLogs>(Key::ExerciseLogs)
            .await?
            .into_iter()
            .map(|(key, log)| {
                let key = key
                    .parse::<domain::ExerciseLogKey>()
                    .map_err(malformed)?;
                Ok::<_, domain::ReadError>((key, domain::ExerciseLog::from(log)))
            })
            .collect()
    }

    async fn replace_exercise_log(
        &self,
        key: domain::ExerciseLogKey,
        log: domain::ExerciseLog,
    ) -> Result<domain::ExerciseLog, domain::UpdateError> {
        self.update(Key::ExerciseLogs, |logs: &mut ExerciseLogs| {
            logs.insert(key.to_string(), record::ExerciseLog::from(&log));
        })
        .await?;
        Ok(log)
    }
}

impl<S: KeyValueStore> domain::BodyMeasurementRepository for LocalStorage<S> {
    async fn read_body_measurements(
        &self,
    ) -> Result<BTreeMap<NaiveDate, domain::BodyMeasurement>, domain::ReadError> {
        Ok(self
            .read::<BodyMeasurements>(Key::BodyMeasurements)
            .await?
            .into_iter()
            .map(|(date, measurement)| {
                (
                    date,
                    domain::BodyMeasurement {
                        date,
                        ..measurement.into()
                    },
                )
            })
            .collect())
    }

    async fn replace_body_measurement(
        &self,
        body_measurement: domain::BodyMeasurement,
    ) -> Result<domain::BodyMeasurement, domain::UpdateError> {
        self.update(
            Key::BodyMeasurements,
            |measurements: &mut BodyMeasurements| {
                measurements.insert(
                    body_measurement.date,
                    record::BodyMeasurement::from(&body_measurement),
                );
            },
        )
        .await?;
        Ok(body_measurement)
    }
}

impl<S: KeyValueStore> domain::WorkoutHistoryRepository for LocalStorage<S> {
    async fn read_workout_history(
        &self,
    ) -> Result<BTreeMap<NaiveDate, Vec<domain::WorkoutHistoryEntry>>, domain::ReadError> {
        self.read::<WorkoutHistory>(Key::WorkoutHistory)
            .await?
            .into_iter()
            .map(|(date, entries)| {
                let entries = entries
                    .into_iter()
                    .map(domain::WorkoutHistoryEntry::try_from)
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(malformed)?;
                Ok::<_, domain::ReadError>((date, entries))
            })
            .collect()
    }

    async fn append_workout(
        &self,
        date: NaiveDate,
        record: domain::WorkoutRecord,
    ) -> Result<domain::WorkoutHistoryEntry, domain::CreateError> {
        let entry = domain::WorkoutHistoryEntry::new(record, Utc::now());
        self.update(Key::WorkoutHistory, |history: &mut WorkoutHistory| {
            history
                .entry(date)
                .or_default()
                .push(record::WorkoutHistoryEntry::from(&entry));
        })
        .await?;
        Ok(entry)
    }
}
