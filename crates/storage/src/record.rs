//! Stored shapes of the entities, one JSON value per store key.

use chrono::{DateTime, NaiveDate, Utc};
use fitlog_domain as domain;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Profile {
    pub age: u32,
    pub height: f64,
    pub weight: f64,
}

impl From<domain::Profile> for Profile {
    fn from(value: domain::Profile) -> Self {
        Self {
            age: value.age,
            height: value.height,
            weight: value.weight,
        }
    }
}

impl From<Profile> for domain::Profile {
    fn from(value: Profile) -> Self {
        Self {
            age: value.age,
            height: value.height,
            weight: value.weight,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyEntry {
    pub weight: f64,
    #[serde(default)]
    pub steps: u32,
    #[serde(default)]
    pub vstepper_steps: u32,
    pub date: NaiveDate,
}

impl From<&domain::DailyEntry> for DailyEntry {
    fn from(value: &domain::DailyEntry) -> Self {
        Self {
            weight: value.weight,
            steps: value.steps,
            vstepper_steps: value.vstepper_steps,
            date: value.date,
        }
    }
}

impl From<DailyEntry> for domain::DailyEntry {
    fn from(value: DailyEntry) -> Self {
        Self {
            date: value.date,
            weight: value.weight,
            steps: value.steps,
            vstepper_steps: value.vstepper_steps,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub image: Image,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
}

impl From<&domain::Exercise> for Exercise {
    fn from(value: &domain::Exercise) -> Self {
        Self {
            id: *value.id,
            name: value.name.to_string(),
            description: value.description.clone(),
            category: value.category.to_string(),
            image: Image::from(&value.image),
            video: value.video.clone(),
        }
    }
}

impl TryFrom<Exercise> for domain::Exercise {
    type Error = ExerciseError;

    fn try_from(value: Exercise) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            name: domain::Name::new(&value.name)?,
            description: value.description,
            category: domain::Category::try_from(value.category.as_str())?,
            image: value.image.into(),
            video: value.video,
        })
    }
}

/// Stored as a JSON string, or as a number for a bundled image.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum Image {
    Path(String),
    Asset(u32),
}

impl Default for Image {
    fn default() -> Self {
        Self::Path(String::new())
    }
}

impl From<&domain::Image> for Image {
    fn from(value: &domain::Image) -> Self {
        match value {
            domain::Image::Path(path) => Self::Path(path.clone()),
            domain::Image::Asset(asset) => Self::Asset(*asset),
        }
    }
}

impl From<Image> for domain::Image {
    fn from(value: Image) -> Self {
        match value {
            Image::Path(path) => Self::Path(path),
            Image::Asset(asset) => Self::Asset(asset),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ExerciseError {
    #[error(transparent)]
    InvalidName(#[from] domain::NameError),
    #[error(transparent)]
    InvalidCategory(#[from] domain::CategoryError),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseLog {
    pub sets: Vec<SetState>,
    pub current_set: u32,
    pub completed: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SetState {
    pub completed: bool,
    pub time: Option<String>,
}

impl From<&domain::ExerciseLog> for ExerciseLog {
    fn from(value: &domain::ExerciseLog) -> Self {
        Self {
            sets: value
                .sets
                .iter()
                .map(|s| SetState {
                    completed: s.completed,
                    time: s.time.clone(),
                })
                .collect(),
            current_set: value.current_set,
            completed: value.completed,
        }
    }
}

impl From<ExerciseLog> for domain::ExerciseLog {
    fn from(value: ExerciseLog) -> Self {
        Self {
            sets: value
                .sets
                .into_iter()
                .map(|s| domain::SetState {
                    completed: s.completed,
                    time: s.time,
                })
                .collect(),
            current_set: value.current_set,
            completed: value.completed,
        }
    }
}

/// Absent measurements are written as `null`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct BodyMeasurement {
    pub waist: Option<f64>,
    pub arms: Option<f64>,
    pub thighs: Option<f64>,
    pub chest: Option<f64>,
    pub hips: Option<f64>,
    pub date: NaiveDate,
}

impl From<&domain::BodyMeasurement> for BodyMeasurement {
    fn from(value: &domain::BodyMeasurement) -> Self {
        Self {
            waist: value.waist,
            arms: value.arms,
            thighs: value.thighs,
            chest: value.chest,
            hips: value.hips,
            date: value.date,
        }
    }
}

impl From<BodyMeasurement> for domain::BodyMeasurement {
    fn from(value: BodyMeasurement) -> Self {
        Self {
            date: value.date,
            waist: value.waist,
            arms: value.arms,
            thighs: value.thighs,
            chest: value.chest,
            hips: value.hips,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutHistoryEntry {
    pub exercise_id: u32,
    pub exercise_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub set_number: u32,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_sets_completed: Option<bool>,
    pub timestamp: DateTime<Utc>,
}

impl From<&domain::WorkoutHistoryEntry> for WorkoutHistoryEntry {
    fn from(value: &domain::WorkoutHistoryEntry) -> Self {
        Self {
            exercise_id: *value.exercise_id,
            exercise_name: value.exercise_name.clone(),
            category: value.category.map(|c| c.to_string()),
            set_number: value.set_number,
            completed: value.completed,
            all_sets_completed: value.all_sets_completed,
            timestamp: value.timestamp,
        }
    }
}

impl TryFrom<WorkoutHistoryEntry> for domain::WorkoutHistoryEntry {
    type Error = domain::CategoryError;

    fn try_from(value: WorkoutHistoryEntry) -> Result<Self, Self::Error> {
        Ok(Self {
            exercise_id: value.exercise_id.into(),
            exercise_name: value.exercise_name,
            category: value
                .category
                .as_deref()
                .map(domain::Category::try_from)
                .transpose()?,
            set_number: value.set_number,
            completed: value.completed,
            all_sets_completed: value.all_sets_completed,
            timestamp: value.timestamp,
        })
    }
}
