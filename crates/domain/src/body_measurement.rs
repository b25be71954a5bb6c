use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::{ReadError, UpdateError};

#[allow(async_fn_in_trait)]
pub trait BodyMeasurementService {
    async fn get_body_measurements(&self) -> BTreeMap<NaiveDate, BodyMeasurement>;
    async fn get_body_measurement(&self, date: NaiveDate) -> Option<BodyMeasurement>;
    async fn save_body_measurement(&self, body_measurement: BodyMeasurement) -> bool;
}

#[allow(async_fn_in_trait)]
pub trait BodyMeasurementRepository {
    async fn read_body_measurements(
        &self,
    ) -> Result<BTreeMap<NaiveDate, BodyMeasurement>, ReadError>;
    async fn replace_body_measurement(
        &self,
        body_measurement: BodyMeasurement,
    ) -> Result<BodyMeasurement, UpdateError>;
}

/// Circumferences in cm. Measurements that were not taken are `None`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyMeasurement {
    pub date: NaiveDate,
    pub waist: Option<f64>,
    pub arms: Option<f64>,
    pub thighs: Option<f64>,
    pub chest: Option<f64>,
    pub hips: Option<f64>,
}

impl BodyMeasurement {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        [self.waist, self.arms, self.thighs, self.chest, self.hips]
            .iter()
            .all(Option::is_none)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_empty() {
        let measurement = BodyMeasurement {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            waist: None,
            arms: None,
            thighs: None,
            chest: None,
            hips: None,
        };
        assert!(measurement.is_empty());
        assert!(
            !BodyMeasurement {
                hips: Some(98.5),
                ..measurement
            }
            .is_empty()
        );
    }
}
