//! Daily weather input
//!
//! A [`DailyWeatherSeries`] is the temperature record of one weather station:
//! a start date plus one `t_max`/`t_min` pair per contiguous calendar day.
//! Dates and day-of-year values are derived by walking the calendar from the
//! start date, so leap years get a day 366 and no other correction.

use crate::error::CropError;
use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// One day of a [`DailyWeatherSeries`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyRecord {
    /// Calendar date
    pub date: NaiveDate,
    /// Day of year (1-366)
    pub doy: u32,
    /// Daily maximum temperature (°C)
    pub t_max: f64,
    /// Daily minimum temperature (°C)
    pub t_min: f64,
}

impl DailyRecord {
    /// Daily mean temperature (°C)
    pub fn mean_temperature(&self) -> f64 {
        (self.t_max + self.t_min) / 2.0
    }
}

/// Contiguous daily temperature series for one station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SeriesFields")]
pub struct DailyWeatherSeries {
    start: NaiveDate,
    t_max: Vec<f64>,
    t_min: Vec<f64>,
}

#[derive(Deserialize)]
struct SeriesFields {
    start: NaiveDate,
    t_max: Vec<f64>,
    t_min: Vec<f64>,
}

impl TryFrom<SeriesFields> for DailyWeatherSeries {
    type Error = CropError;

    fn try_from(fields: SeriesFields) -> Result<Self, Self::Error> {
        Self::new(fields.start, fields.t_max, fields.t_min)
    }
}

impl DailyWeatherSeries {
    /// Build a series starting on `start`
    ///
    /// # Errors
    /// [`CropError::LengthMismatch`] if `t_min` and `t_max` differ in length.
    pub fn new(start: NaiveDate, t_max: Vec<f64>, t_min: Vec<f64>) -> Result<Self, CropError> {
        CropError::check_len("t_min", t_max.len(), t_min.len())?;
        Ok(Self { start, t_max, t_min })
    }

    /// Number of days in the series
    pub fn len(&self) -> usize {
        self.t_max.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t_max.is_empty()
    }

    /// Date of the first day
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn t_max(&self) -> &[f64] {
        &self.t_max
    }

    pub fn t_min(&self) -> &[f64] {
        &self.t_min
    }

    /// Calendar date of day `index`
    pub fn date(&self, index: usize) -> NaiveDate {
        date_at(self.start, index)
    }

    /// Day of year of day `index`
    pub fn doy(&self, index: usize) -> u32 {
        self.date(index).ordinal()
    }

    /// Mean temperature of day `index`
    pub fn mean_temperature(&self, index: usize) -> f64 {
        (self.t_max[index] + self.t_min[index]) / 2.0
    }

    /// Day `index` as a record
    pub fn record(&self, index: usize) -> DailyRecord {
        DailyRecord {
            date: self.date(index),
            doy: self.doy(index),
            t_max: self.t_max[index],
            t_min: self.t_min[index],
        }
    }

    /// Iterate over every day of the series
    pub fn records(&self) -> impl Iterator<Item = DailyRecord> + '_ {
        (0..self.len()).map(|index| self.record(index))
    }

    /// Temperature slices for a sub-range of days, clamped to the series end
    pub fn window(&self, range: Range<usize>) -> (&[f64], &[f64]) {
        let end = range.end.min(self.len());
        let start = range.start.min(end);
        (&self.t_max[start..end], &self.t_min[start..end])
    }
}

/// Date `index` days after `start`
pub(crate) fn date_at(start: NaiveDate, index: usize) -> NaiveDate {
    start
        .checked_add_days(Days::new(index as u64))
        .unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_rejects_mismatched_lengths() {
        let err = DailyWeatherSeries::new(ymd(2001, 1, 1), vec![10.0; 3], vec![0.0; 2]).unwrap_err();
        assert!(matches!(
            err,
            CropError::LengthMismatch {
                expected: 3,
                actual: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_calendar_walk_across_leap_year() {
        let series = DailyWeatherSeries::new(ymd(2000, 12, 30), vec![5.0; 4], vec![1.0; 4]).unwrap();
        let doys: Vec<u32> = series.records().map(|r| r.doy).collect();
        assert_eq!(doys, vec![365, 366, 1, 2]);
        assert_eq!(series.date(3), ymd(2001, 1, 2));
        assert_eq!(series.mean_temperature(0), 3.0);
    }

    #[test]
    fn test_window_is_clamped() {
        let series =
            DailyWeatherSeries::new(ymd(2001, 1, 1), vec![1.0, 2.0, 3.0], vec![0.0, 0.0, 0.0]).unwrap();
        let (t_max, t_min) = series.window(1..10);
        assert_eq!(t_max, &[2.0, 3.0]);
        assert_eq!(t_min.len(), 2);
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"{"start":"2001-03-01","t_max":[20.0,21.0],"t_min":[10.0]}"#;
        assert!(serde_json::from_str::<DailyWeatherSeries>(json).is_err());

        let json = r#"{"start":"2001-03-01","t_max":[20.0,21.0],"t_min":[10.0,11.0]}"#;
        let series: DailyWeatherSeries = serde_json::from_str(json).unwrap();
        assert_eq!(series.doy(0), 60);
    }
}
