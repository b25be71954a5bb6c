use std::collections::BTreeMap;

use chrono::{Days, Local, NaiveDate};

use crate::{ReadError, UpdateError, ValidationError, profile::parse_positive_decimal};

#[allow(async_fn_in_trait)]
pub trait DailyEntryService {
    async fn get_daily_entries(&self) -> BTreeMap<NaiveDate, DailyEntry>;
    async fn get_daily_entry(&self, date: NaiveDate) -> Option<DailyEntry>;
    async fn save_daily_entry(&self, entry: DailyEntry) -> bool;
    async fn get_week(&self, today: NaiveDate) -> Vec<(NaiveDate, Option<DailyEntry>)>;
    async fn get_weight_trend(&self, today: NaiveDate, days: u64) -> Vec<(NaiveDate, f64)>;

    /// Week ending on the local calendar date.
    async fn get_current_week(&self) -> Vec<(NaiveDate, Option<DailyEntry>)> {
        self.get_week(Local::now().date_naive()).await
    }

    fn validate_daily_entry_weight(&self, weight: &str) -> Result<f64, ValidationError> {
        parse_positive_decimal(weight, "Weight")
    }
}

#[allow(async_fn_in_trait)]
pub trait DailyEntryRepository {
    async fn read_daily_entries(&self) -> Result<BTreeMap<NaiveDate, DailyEntry>, ReadError>;
    async fn replace_daily_entry(&self, entry: DailyEntry) -> Result<DailyEntry, UpdateError>;
}

/// One entry per calendar date. Saving an entry replaces the one stored for its date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyEntry {
    pub date: NaiveDate,
    pub weight: f64,
    pub steps: u32,
    pub vstepper_steps: u32,
}

impl DailyEntry {
    #[must_use]
    pub fn total_steps(&self) -> u32 {
        self.steps.saturating_add(self.vstepper_steps)
    }
}

/// The seven dates ending with `today`, oldest first.
#[must_use]
pub fn week(
    entries: &BTreeMap<NaiveDate, DailyEntry>,
    today: NaiveDate,
) -> Vec<(NaiveDate, Option<DailyEntry>)> {
    trailing_dates(today, 7)
        .map(|date| (date, entries.get(&date).copied()))
        .collect()
}

#[must_use]
pub fn weight_trend(
    entries: &BTreeMap<NaiveDate, DailyEntry>,
    today: NaiveDate,
    days: u64,
) -> Vec<(NaiveDate, f64)> {
    trailing_dates(today, days)
        .filter_map(|date| entries.get(&date))
        .filter(|entry| entry.weight > 0.0)
        .map(|entry| (entry.date, entry.weight))
        .collect()
}

fn trailing_dates(today: NaiveDate, days: u64) -> impl Iterator<Item = NaiveDate> {
    (0..days)
        .rev()
        .filter_map(move |offset| today.checked_sub_days(Days::new(offset)))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn entry(date: NaiveDate, weight: f64) -> DailyEntry {
        DailyEntry {
            date,
            weight,
            steps: 1000,
            vstepper_steps: 200,
        }
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    #[test]
    fn test_week() {
        let entries = BTreeMap::from([
            (date(10), entry(date(10), 80.0)),
            (date(12), entry(date(12), 79.5)),
            (date(1), entry(date(1), 81.0)),
        ]);

        assert_eq!(
            week(&entries, date(12)),
            vec![
                (date(6), None),
                (date(7), None),
                (date(8), None),
                (date(9), None),
                (date(10), Some(entry(date(10), 80.0))),
                (date(11), None),
                (date(12), Some(entry(date(12), 79.5))),
            ]
        );
    }

    #[test]
    fn test_week_without_entries() {
        assert!(
            week(&BTreeMap::new(), date(12))
                .iter()
                .all(|(_, entry)| entry.is_none())
        );
    }

    #[test]
    fn test_weight_trend() {
        let entries = BTreeMap::from([
            (date(1), entry(date(1), 81.0)),
            (date(5), entry(date(5), 0.0)),
            (date(8), entry(date(8), 80.2)),
            (date(10), entry(date(10), 80.0)),
        ]);

        assert_eq!(
            weight_trend(&entries, date(10), 5),
            vec![(date(8), 80.2), (date(10), 80.0)]
        );
        assert_eq!(
            weight_trend(&entries, date(10), 30),
            vec![(date(1), 81.0), (date(8), 80.2), (date(10), 80.0)]
        );
    }

    #[test]
    fn test_total_steps() {
        assert_eq!(entry(date(1), 80.0).total_steps(), 1200);
    }
}
