use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};

use crate::{Category, Exercise, ExerciseLog, ExerciseLogKey};

#[allow(async_fn_in_trait)]
pub trait ProgressService {
    async fn get_category_progress(
        &self,
        selection: Option<Category>,
        today: NaiveDate,
    ) -> CategoryProgress;

    async fn get_current_category_progress(
        &self,
        selection: Option<Category>,
    ) -> CategoryProgress {
        self.get_category_progress(selection, Local::now().date_naive())
            .await
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CategoryProgress {
    pub completed: usize,
    pub started: usize,
    pub total: usize,
}

/// Progress of the exercises in one category. An exercise is started if it has any log and
/// completed if today's log or any earlier log is completed. Selecting all categories yields no
/// progress.
#[must_use]
pub fn category_progress(
    exercises: &[Exercise],
    logs: &BTreeMap<ExerciseLogKey, ExerciseLog>,
    selection: Option<Category>,
    today: NaiveDate,
) -> CategoryProgress {
    let Some(category) = selection else {
        return CategoryProgress::default();
    };

    let in_category = exercises
        .iter()
        .filter(|e| e.category == category)
        .collect::<Vec<_>>();

    let mut progress = CategoryProgress {
        total: in_category.len(),
        ..CategoryProgress::default()
    };

    for exercise in in_category {
        let mut exercise_logs = logs
            .iter()
            .filter(|(key, _)| key.exercise_id == exercise.id)
            .peekable();

        if exercise_logs.peek().is_none() {
            continue;
        }
        progress.started += 1;

        let completed_today = logs
            .get(&ExerciseLogKey::new(exercise.id, today))
            .is_some_and(|log| log.completed);

        if completed_today || exercise_logs.any(|(_, log)| log.completed) {
            progress.completed += 1;
        }
    }

    progress
}
