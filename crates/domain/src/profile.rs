use crate::{ReadError, UpdateError, ValidationError};

#[allow(async_fn_in_trait)]
pub trait ProfileService {
    async fn get_profile(&self) -> Option<Profile>;
    async fn save_profile(&self, profile: Profile) -> bool;

    fn validate_profile_age(&self, age: &str) -> Result<u32, ValidationError> {
        match age.trim().parse::<u32>() {
            Ok(parsed_age) if parsed_age > 0 => Ok(parsed_age),
            Ok(_) => Err(ValidationError::Other(
                "Age must be a positive whole number".into(),
            )),
            Err(_) => Err(ValidationError::Other("Age must be a whole number".into())),
        }
    }

    fn validate_profile_height(&self, height: &str) -> Result<f64, ValidationError> {
        parse_positive_decimal(height, "Height")
    }

    fn validate_profile_weight(&self, weight: &str) -> Result<f64, ValidationError> {
        parse_positive_decimal(weight, "Weight")
    }
}

#[allow(async_fn_in_trait)]
pub trait ProfileRepository {
    async fn read_profile(&self) -> Result<Option<Profile>, ReadError>;
    async fn replace_profile(&self, profile: Profile) -> Result<Profile, UpdateError>;
}

/// Singleton record, overwritten as a whole on every save.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Profile {
    pub age: u32,
    /// Height in cm.
    pub height: f64,
    /// Weight in kg.
    pub weight: f64,
}

impl Profile {
    #[must_use]
    pub fn bmi(&self) -> Option<f64> {
        if self.height <= 0.0 {
            return None;
        }
        let height_m = self.height / 100.0;
        Some(self.weight / (height_m * height_m))
    }
}

pub(crate) fn parse_positive_decimal(value: &str, field: &str) -> Result<f64, ValidationError> {
    match value.replace(',', ".").trim().parse::<f64>() {
        Ok(parsed_value) => {
            if parsed_value > 0.0 {
                Ok(parsed_value)
            } else {
                Err(ValidationError::Other(
                    format!("{field} must be a positive decimal number").into(),
                ))
            }
        }
        Err(_) => Err(ValidationError::Other(
            format!("{field} must be a decimal number").into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use rstest::rstest;

    use super::*;

    struct Validator;

    impl ProfileService for Validator {
        async fn get_profile(&self) -> Option<Profile> {
            None
        }

        async fn save_profile(&self, _: Profile) -> bool {
            false
        }
    }

    #[rstest]
    #[case("35", Some(35))]
    #[case(" 7 ", Some(7))]
    #[case("0", None)]
    #[case("-1", None)]
    #[case("abc", None)]
    fn test_validate_profile_age(#[case] age: &str, #[case] expected: Option<u32>) {
        assert_eq!(Validator.validate_profile_age(age).ok(), expected);
    }

    #[rstest]
    #[case("172.5", Some(172.5))]
    #[case("172,5", Some(172.5))]
    #[case("0", None)]
    #[case("", None)]
    fn test_validate_profile_height(#[case] height: &str, #[case] expected: Option<f64>) {
        assert_eq!(Validator.validate_profile_height(height).ok(), expected);
    }

    #[test]
    fn test_validate_profile_weight_message() {
        assert_eq!(
            Validator
                .validate_profile_weight("-3")
                .unwrap_err()
                .to_string(),
            "Weight must be a positive decimal number"
        );
    }

    #[test]
    fn test_bmi() {
        let profile = Profile {
            age: 30,
            height: 180.0,
            weight: 81.0,
        };
        assert_approx_eq!(profile.bmi().unwrap(), 25.0, 0.001);
        assert_eq!(
            Profile {
                height: 0.0,
                ..profile
            }
            .bmi(),
            None
        );
    }
}
