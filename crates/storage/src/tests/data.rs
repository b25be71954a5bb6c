use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate};
use fitlog_domain as domain;

pub const PROFILE: domain::Profile = domain::Profile {
    age: 30,
    height: 180.0,
    weight: 80.0,
};

pub const DAILY_ENTRY: domain::DailyEntry = domain::DailyEntry {
    date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    weight: 80.5,
    steps: 5000,
    vstepper_steps: 300,
};

pub const DAILY_ENTRY_2: domain::DailyEntry = domain::DailyEntry {
    date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
    weight: 80.1,
    steps: 8000,
    vstepper_steps: 0,
};

pub static EXERCISE: LazyLock<domain::Exercise> = LazyLock::new(|| domain::Exercise {
    id: 1.into(),
    name: domain::Name::new("Arm Swings").unwrap(),
    description: "Forward and backward arm swings".to_string(),
    category: domain::Category::SlimArms,
    image: "placeholder.jpg".into(),
    video: None,
});

pub static EXERCISE_2: LazyLock<domain::Exercise> = LazyLock::new(|| domain::Exercise {
    id: 2.into(),
    name: domain::Name::new("Neck Tilt").unwrap(),
    description: "Tilt the head \"slowly\" to each side".to_string(),
    category: domain::Category::FacialLift,
    image: "placeholder.jpg".into(),
    video: Some("https://example.com/neck-tilt.mp4".to_string()),
});

pub static EXERCISE_LOG: LazyLock<domain::ExerciseLog> = LazyLock::new(|| domain::ExerciseLog {
    sets: vec![
        domain::SetState {
            completed: true,
            time: Some("0:45".to_string()),
        },
        domain::SetState {
            completed: false,
            time: None,
        },
        domain::SetState {
            completed: false,
            time: None,
        },
    ],
    current_set: 2,
    completed: false,
});

pub const BODY_MEASUREMENT: domain::BodyMeasurement = domain::BodyMeasurement {
    date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    waist: Some(80.0),
    arms: None,
    thighs: Some(55.5),
    chest: None,
    hips: None,
};

pub static WORKOUT: LazyLock<domain::WorkoutHistoryEntry> =
    LazyLock::new(|| domain::WorkoutHistoryEntry {
        exercise_id: 1.into(),
        exercise_name: "Arm Swings".to_string(),
        category: Some(domain::Category::SlimArms),
        set_number: 1,
        completed: true,
        all_sets_completed: None,
        timestamp: DateTime::parse_from_rfc3339("2024-01-01T08:00:00Z")
            .unwrap()
            .to_utc(),
    });
