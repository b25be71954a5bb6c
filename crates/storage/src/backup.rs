//! Full snapshot of all collections as a single JSON bundle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::{
    KeyValueStore, LocalStorage, domain,
    local_storage::{
        BodyMeasurements, DailyEntries, ExerciseLogs, Exercises, Key, WorkoutHistory, malformed,
    },
    record,
};

pub const VERSION: &str = "1.0.0";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    pub export_date: DateTime<Utc>,
    pub version: String,
    pub data: BundleData,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BundleData {
    pub profile: Option<record::Profile>,
    #[serde(default)]
    pub daily_entries: DailyEntries,
    #[serde(default)]
    pub exercises: Exercises,
    #[serde(default)]
    pub exercise_logs: ExerciseLogs,
    #[serde(default)]
    pub workout_history: WorkoutHistory,
    #[serde(default)]
    pub body_measurements: BodyMeasurements,
}

impl BundleData {
    /// Checks that every record converts into its domain type.
    fn validate(&self) -> Result<(), domain::StorageError> {
        for exercise in &self.exercises {
            domain::Exercise::try_from(exercise.clone()).map_err(malformed)?;
        }
        for key in self.exercise_logs.keys() {
            key.parse::<domain::ExerciseLogKey>().map_err(malformed)?;
        }
        for entry in self.workout_history.values().flatten() {
            domain::WorkoutHistoryEntry::try_from(entry.clone()).map_err(malformed)?;
        }
        Ok(())
    }
}

/// Brings a bundle of an older format up to the current one.
pub fn migrate(bundle: Bundle) -> Result<Bundle, domain::UpdateError> {
    match bundle.version.as_str() {
        VERSION => Ok(bundle),
        version => Err(domain::UpdateError::UnsupportedVersion(version.to_string())),
    }
}

impl<S: KeyValueStore> domain::BackupRepository for LocalStorage<S> {
    async fn export_json(&self) -> Result<String, domain::ReadError> {
        let bundle = Bundle {
            export_date: Utc::now(),
            version: VERSION.to_string(),
            data: BundleData {
                profile: self.read(Key::Profile).await?,
                daily_entries: self.read(Key::DailyEntries).await?,
                exercises: self.read(Key::Exercises).await?,
                exercise_logs: self.read(Key::ExerciseLogs).await?,
                workout_history: self.read(Key::WorkoutHistory).await?,
                body_measurements: self.read(Key::BodyMeasurements).await?,
            },
        };
        serde_json::to_string_pretty(&bundle)
            .map_err(|err| domain::StorageError::Other(Box::new(err)).into())
    }

    async fn import_json(&self, json: &str) -> Result<(), domain::UpdateError> {
        let bundle = serde_json::from_str::<Bundle>(json).map_err(malformed)?;
        let bundle = migrate(bundle)?;
        log::debug!("importing bundle exported at {}", bundle.export_date);
        let data = bundle.data;
        data.validate()?;

        let mut guards = Vec::new();
        for key in Key::iter() {
            guards.push(self.lock(key).await);
        }

        match data.profile {
            Some(profile) => self.write(Key::Profile, &profile).await?,
            None => self.remove(Key::Profile).await?,
        }
        self.write(Key::DailyEntries, &data.daily_entries).await?;
        self.write(Key::Exercises, &data.exercises).await?;
        self.write(Key::ExerciseLogs, &data.exercise_logs).await?;
        self.write(Key::WorkoutHistory, &data.workout_history)
            .await?;
        self.write(Key::BodyMeasurements, &data.body_measurements)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::{
        MemoryStore,
        domain::{BackupRepository, ProfileRepository},
        tests::data::{DAILY_ENTRY, EXERCISE, PROFILE},
    };

    use super::*;

    fn bundle(version: &str) -> Bundle {
        Bundle {
            export_date: DateTime::parse_from_rfc3339("2024-01-01T08:00:00Z")
                .unwrap()
                .to_utc(),
            version: version.to_string(),
            data: BundleData::default(),
        }
    }

    #[test]
    fn test_migrate() {
        assert_eq!(migrate(bundle("1.0.0")).unwrap(), bundle("1.0.0"));
        assert!(matches!(
            migrate(bundle("2.0.0")),
            Err(domain::UpdateError::UnsupportedVersion(v)) if v == "2.0.0"
        ));
    }

    #[test]
    fn test_bundle_serde() {
        let mut bundle = bundle(VERSION);
        bundle.data.profile = Some(PROFILE.into());
        bundle
            .data
            .daily_entries
            .insert(DAILY_ENTRY.date, record::DailyEntry::from(&DAILY_ENTRY));
        assert_eq!(
            json!(bundle),
            json!({
                "exportDate": "2024-01-01T08:00:00Z",
                "version": "1.0.0",
                "data": {
                    "profile": { "age": 30, "height": 180.0, "weight": 80.0 },
                    "dailyEntries": {
                        "2024-01-01": {
                            "weight": 80.5,
                            "steps": 5000,
                            "vstepperSteps": 300,
                            "date": "2024-01-01",
                        },
                    },
                    "exercises": [],
                    "exerciseLogs": {},
                    "workoutHistory": {},
                    "bodyMeasurements": {},
                },
            })
        );
    }

    #[tokio::test]
    async fn test_import_null_profile_removes_profile() {
        let store = MemoryStore::new();
        let storage = LocalStorage::new(store.clone());
        storage.replace_profile(PROFILE).await.unwrap();

        storage
            .import_json(&json!(bundle(VERSION)).to_string())
            .await
            .unwrap();

        assert_eq!(storage.read_profile().await.unwrap(), None);
        assert_eq!(store.get("profile").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_import_invalid_bundle_keeps_data() {
        let storage = LocalStorage::new(MemoryStore::new());
        storage.replace_profile(PROFILE).await.unwrap();

        let mut invalid = bundle(VERSION);
        let mut exercise = record::Exercise::from(&*EXERCISE);
        exercise.category = "Cardio".to_string();
        invalid.data.exercises.push(exercise);

        for json in [
            "{".to_string(),
            json!(bundle("0.9.0")).to_string(),
            json!(invalid).to_string(),
        ] {
            assert!(storage.import_json(&json).await.is_err());
        }
        assert_eq!(storage.read_profile().await.unwrap(), Some(PROFILE));
    }
}
