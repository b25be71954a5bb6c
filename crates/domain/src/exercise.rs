use derive_more::{AsRef, Deref, Display};
use strum::{AsRefStr, EnumIter, IntoEnumIterator};

use crate::{CreateError, DeleteError, ReadError, UpdateError};

#[allow(async_fn_in_trait)]
pub trait ExerciseService {
    async fn get_exercises(&self) -> Vec<Exercise>;
    async fn add_exercise(&self, exercise: NewExercise) -> Option<Exercise>;
    async fn update_exercise(&self, id: ExerciseID, patch: ExercisePatch) -> Option<Exercise>;
    async fn delete_exercise(&self, id: ExerciseID) -> bool;
}

#[allow(async_fn_in_trait)]
pub trait ExerciseRepository {
    async fn read_exercises(&self) -> Result<Vec<Exercise>, ReadError>;
    async fn create_exercise(&self, exercise: NewExercise) -> Result<Exercise, CreateError>;
    async fn modify_exercise(
        &self,
        id: ExerciseID,
        patch: ExercisePatch,
    ) -> Result<Option<Exercise>, UpdateError>;
    async fn delete_exercise(&self, id: ExerciseID) -> Result<ExerciseID, DeleteError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: ExerciseID,
    pub name: Name,
    pub description: String,
    pub category: Category,
    pub image: Image,
    pub video: Option<String>,
}

impl Exercise {
    #[must_use]
    pub fn with_id(id: ExerciseID, exercise: NewExercise) -> Self {
        Self {
            id,
            name: exercise.name,
            description: exercise.description,
            category: exercise.category,
            image: exercise.image,
            video: exercise.video,
        }
    }

    /// Shallow merge: fields absent from the patch keep their current value.
    pub fn apply(&mut self, patch: ExercisePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(image) = patch.image {
            self.image = image;
        }
        if let Some(video) = patch.video {
            self.video = video;
        }
    }

    fn matches(&self, query: &str) -> bool {
        self.name.as_ref().to_lowercase().contains(query)
            || self.description.to_lowercase().contains(query)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewExercise {
    pub name: Name,
    pub description: String,
    pub category: Category,
    pub image: Image,
    pub video: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExercisePatch {
    pub name: Option<Name>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub image: Option<Image>,
    pub video: Option<Option<String>>,
}

/// Picture of an exercise: a path or URL, or the number of an image bundled with the app.
#[derive(Display, Debug, Clone, PartialEq, Eq)]
pub enum Image {
    #[display("{_0}")]
    Path(String),
    #[display("{_0}")]
    Asset(u32),
}

impl Default for Image {
    fn default() -> Self {
        Self::Path(String::new())
    }
}

impl From<&str> for Image {
    fn from(value: &str) -> Self {
        Self::Path(value.to_string())
    }
}

#[derive(Deref, Display, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseID(u32);

impl ExerciseID {
    /// The id following the highest id in use, or 1 for an empty list.
    #[must_use]
    pub fn next(exercises: &[Exercise]) -> Self {
        Self(exercises.iter().map(|e| e.id.0).max().map_or(1, |id| id + 1))
    }
}

impl From<u32> for ExerciseID {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Name(String);

impl Name {
    pub fn new(name: &str) -> Result<Self, NameError> {
        let trimmed_name = name.trim();

        if trimmed_name.is_empty() {
            return Err(NameError::Empty);
        }

        let len = trimmed_name.chars().count();

        if len > 64 {
            return Err(NameError::TooLong(len));
        }

        Ok(Name(trimmed_name.to_string()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum NameError {
    #[error("Please enter an exercise name")]
    Empty,
    #[error("Name must be 64 characters or fewer ({0} > 64)")]
    TooLong(usize),
}

#[derive(
    AsRefStr,
    EnumIter,
    strum::Display,
    Debug,
    Default,
    Clone,
    Copy,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
)]
pub enum Category {
    #[strum(serialize = "Facial Lift")]
    FacialLift,
    #[strum(serialize = "Slim Arms")]
    SlimArms,
    #[strum(serialize = "Flat Belly")]
    FlatBelly,
    #[strum(serialize = "Slim Thighs")]
    SlimThighs,
    #[strum(serialize = "Calf Shaping")]
    CalfShaping,
    #[strum(serialize = "Tight Core")]
    TightCore,
    #[strum(serialize = "Back Slim")]
    BackSlim,
    #[strum(serialize = "Bra Line")]
    BraLine,
    #[default]
    #[strum(serialize = "Total Body")]
    TotalBody,
}

impl TryFrom<&str> for Category {
    type Error = CategoryError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Category::iter()
            .find(|category| category.as_ref() == value)
            .ok_or_else(|| CategoryError::Unknown(value.to_string()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum CategoryError {
    #[error("unknown category: {0}")]
    Unknown(String),
}

/// Filters by category first, `None` meaning every category, then by a case-insensitive
/// search in name and description.
#[must_use]
pub fn filter_exercises(
    exercises: &[Exercise],
    selection: Option<Category>,
    query: &str,
) -> Vec<Exercise> {
    let query = query.trim().to_lowercase();
    exercises
        .iter()
        .filter(|e| selection.is_none_or(|category| e.category == category))
        .filter(|e| query.is_empty() || e.matches(&query))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use strum::IntoEnumIterator;

    use super::*;

    fn exercise(id: u32, name: &str, category: Category) -> Exercise {
        Exercise {
            id: id.into(),
            name: Name::new(name).unwrap(),
            description: format!("{name} description"),
            category,
            image: "placeholder.jpg".into(),
            video: None,
        }
    }

    #[rstest]
    #[case("Arm Swings", Ok(Name("Arm Swings".to_string())))]
    #[case("  Marches  ", Ok(Name("Marches".to_string())))]
    #[case("", Err(NameError::Empty))]
    #[case("   ", Err(NameError::Empty))]
    #[case(
        "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA",
        Err(NameError::TooLong(65))
    )]
    fn test_name_new(#[case] name: &str, #[case] expected: Result<Name, NameError>) {
        assert_eq!(Name::new(name), expected);
    }

    #[rstest]
    #[case::empty(vec![], 1)]
    #[case::gaps(vec![1, 3, 5], 6)]
    #[case::unordered(vec![4, 2], 5)]
    fn test_exercise_id_next(#[case] ids: Vec<u32>, #[case] expected: u32) {
        let exercises = ids
            .into_iter()
            .map(|id| exercise(id, "A", Category::TotalBody))
            .collect::<Vec<_>>();
        assert_eq!(ExerciseID::next(&exercises), ExerciseID(expected));
    }

    #[test]
    fn test_exercise_apply_keeps_absent_fields() {
        let mut e = exercise(1, "Marches", Category::TotalBody);
        e.video = Some("marches.mp4".to_string());

        e.apply(ExercisePatch {
            name: Some(Name::new("X").unwrap()),
            ..ExercisePatch::default()
        });

        assert_eq!(
            e,
            Exercise {
                id: 1.into(),
                name: Name::new("X").unwrap(),
                description: "Marches description".to_string(),
                category: Category::TotalBody,
                image: "placeholder.jpg".into(),
                video: Some("marches.mp4".to_string()),
            }
        );
    }

    #[test]
    fn test_exercise_apply_clears_video() {
        let mut e = exercise(1, "Marches", Category::TotalBody);
        e.video = Some("marches.mp4".to_string());

        e.apply(ExercisePatch {
            video: Some(None),
            category: Some(Category::TightCore),
            ..ExercisePatch::default()
        });

        assert_eq!(e.video, None);
        assert_eq!(e.category, Category::TightCore);
    }

    #[test]
    fn test_exercise_apply_asset_image() {
        let mut e = exercise(1, "Marches", Category::TotalBody);

        e.apply(ExercisePatch {
            image: Some(Image::Asset(7)),
            ..ExercisePatch::default()
        });

        assert_eq!(e.image, Image::Asset(7));
        assert_eq!(e.image.to_string(), "7");
        assert_eq!(Image::from("a.jpg").to_string(), "a.jpg");
    }

    #[test]
    fn test_category_text_form() {
        assert_eq!(Category::iter().count(), 9);
        for category in Category::iter() {
            assert_eq!(Category::try_from(category.as_ref()), Ok(category));
        }
        assert_eq!(Category::FlatBelly.to_string(), "Flat Belly");
        assert_eq!(
            Category::try_from("All"),
            Err(CategoryError::Unknown("All".to_string()))
        );
    }

    #[test]
    fn test_filter_exercises() {
        let exercises = vec![
            exercise(1, "Arm Swings", Category::SlimArms),
            exercise(2, "Trunk Twists", Category::TightCore),
            exercise(3, "Spinal Twists", Category::BackSlim),
        ];

        assert_eq!(filter_exercises(&exercises, None, ""), exercises);
        assert_eq!(
            filter_exercises(&exercises, Some(Category::TightCore), ""),
            vec![exercises[1].clone()]
        );
        assert_eq!(
            filter_exercises(&exercises, None, "  TWISTS "),
            vec![exercises[1].clone(), exercises[2].clone()]
        );
        assert!(filter_exercises(&exercises, Some(Category::SlimArms), "twist").is_empty());
        assert_eq!(
            filter_exercises(&exercises, None, "swings description"),
            vec![exercises[0].clone()]
        );
    }
}
