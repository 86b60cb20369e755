//! Thermal-time accumulator
//!
//! Combines day length, sine-wave degree days, vernalization and photoperiod
//! into a corrected daily increment and its running sum for one crop over a
//! window of days.

use super::daylength::daylight_hours;
use super::degree_days::daily_degree_days;
use super::photoperiod::photoperiod_factor;
use super::vernalization::vernalization_series;
use crate::core_types::weather::date_at;
use crate::core_types::ThermalParams;
use crate::error::CropError;
use chrono::{Datelike, NaiveDate};

/// Every intermediate series of the thermal-time computation, one entry per day
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ThermalSeries {
    pub doy: Vec<u32>,
    pub daylight_hours: Vec<f64>,
    /// Degree days before any correction
    pub raw_gdd: Vec<f64>,
    /// Running vernalization-day total (all zero for non-vernalizing crops)
    pub cumulative_vernalization_days: Vec<f64>,
    pub vernalization_factor: Vec<f64>,
    pub photoperiod_factor: Vec<f64>,
    /// `raw_gdd × min(vernalization_factor, photoperiod_factor)`
    pub gdd: Vec<f64>,
    /// Running sum of `gdd`
    pub cumulative_gdd: Vec<f64>,
}

impl ThermalSeries {
    pub fn len(&self) -> usize {
        self.gdd.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gdd.is_empty()
    }

    /// First day whose cumulative GDD strictly exceeds `threshold`
    pub fn first_exceeding(&self, threshold: f64) -> Option<usize> {
        first_exceeding(&self.cumulative_gdd, threshold)
    }
}

pub(crate) fn first_exceeding(cumulative: &[f64], threshold: f64) -> Option<usize> {
    cumulative.iter().position(|&value| value > threshold)
}

/// Running sum of a daily series
pub(crate) fn cumulative_sum(values: &[f64]) -> Vec<f64> {
    let mut total = 0.0;
    values
        .iter()
        .map(|&value| {
            total += value;
            total
        })
        .collect()
}

/// Thermal time for one crop over a window of days starting on `start`
///
/// # Arguments
/// * `latitude` - Station latitude (decimal degrees)
/// * `start` - Date of the first day of the window
/// * `t_max`, `t_min` - Daily temperature extremes (°C), same length
/// * `params` - Crop thermal, vernalization and photoperiod parameters
///
/// # Errors
/// [`CropError::InvalidParameter`] if `params` fail [`ThermalParams::validate`],
/// [`CropError::LengthMismatch`] if `t_max` and `t_min` differ in length.
pub fn compute_gdd(
    latitude: f64,
    start: NaiveDate,
    t_max: &[f64],
    t_min: &[f64],
    params: &ThermalParams,
) -> Result<ThermalSeries, CropError> {
    params.validate()?;
    CropError::check_len("t_min", t_max.len(), t_min.len())?;
    let days = t_max.len();

    let doy: Vec<u32> = (0..days).map(|i| date_at(start, i).ordinal()).collect();
    let daylight: Vec<f64> = doy.iter().map(|&d| daylight_hours(latitude, d)).collect();
    let raw_gdd: Vec<f64> = t_max
        .iter()
        .zip(t_min)
        .map(|(&hi, &lo)| daily_degree_days(hi, lo, params.t_base, params.t_cutoff))
        .collect();

    let (cumulative_vernalization_days, vernalization_factor) = match &params.vernalization {
        Some(vern) => {
            let t_mean: Vec<f64> = t_max.iter().zip(t_min).map(|(hi, lo)| (hi + lo) / 2.0).collect();
            vernalization_series(&t_mean, vern)
        }
        None => (vec![0.0; days], vec![1.0; days]),
    };

    let photoperiod_factor: Vec<f64> = daylight
        .iter()
        .map(|&hours| photoperiod_factor(hours, &params.photoperiod))
        .collect();

    let gdd: Vec<f64> = (0..days)
        .map(|i| raw_gdd[i] * vernalization_factor[i].min(photoperiod_factor[i]))
        .collect();
    let cumulative_gdd = cumulative_sum(&gdd);

    Ok(ThermalSeries {
        doy,
        daylight_hours: daylight,
        raw_gdd,
        cumulative_vernalization_days,
        vernalization_factor,
        photoperiod_factor,
        gdd,
        cumulative_gdd,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::{PhotoperiodResponse, VernalizationParams};
    use approx::assert_relative_eq;

    fn jan_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2003, 1, 1).unwrap()
    }

    #[test]
    fn test_invalid_params_rejected_before_computation() {
        let inverted = ThermalParams::new(30.0, 10.0);
        assert!(matches!(
            compute_gdd(45.0, jan_first(), &[25.0], &[15.0], &inverted),
            Err(CropError::InvalidParameter { field: "t_cutoff", .. })
        ));

        let vern = VernalizationParams {
            t_vern_min: 3.0,
            t_vern_max: 10.0,
            vern_slope: 0.0,
            vern_start_days: 10.0,
            vern_end_days: 50.0,
            vern_factor_min: 0.0,
        };
        let flat = ThermalParams::new(0.0, 30.0).with_vernalization(vern);
        assert!(matches!(
            compute_gdd(45.0, jan_first(), &[5.0], &[1.0], &flat),
            Err(CropError::InvalidParameter { field: "vern_slope", .. })
        ));
    }

    #[test]
    fn test_plain_accumulation() {
        let params = ThermalParams::new(10.0, 30.0);
        let series = compute_gdd(45.0, jan_first(), &[25.0, 20.0, 8.0, 40.0], &[15.0, 5.0, 2.0, 32.0], &params).unwrap();
        assert_eq!(series.doy, vec![1, 2, 3, 4]);
        assert_eq!(series.raw_gdd[0], 10.0);
        assert_relative_eq!(series.raw_gdd[1], 3.7712244103162473, epsilon = 1e-12);
        assert_eq!(series.raw_gdd[2], 0.0);
        assert_eq!(series.gdd, series.raw_gdd);
        assert_relative_eq!(series.cumulative_gdd[3], 33.77122441031625, epsilon = 1e-12);
        assert!(series.vernalization_factor.iter().all(|&f| f == 1.0));
        assert_eq!(series.first_exceeding(13.0), Some(1));
        assert_eq!(series.first_exceeding(40.0), None);
    }

    #[test]
    fn test_mismatched_lengths_fail_fast() {
        let params = ThermalParams::new(10.0, 30.0);
        assert!(matches!(
            compute_gdd(45.0, jan_first(), &[20.0, 20.0], &[10.0], &params),
            Err(CropError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_corrections_use_the_smaller_factor() {
        let vern = VernalizationParams {
            t_vern_min: 3.0,
            t_vern_max: 10.0,
            vern_slope: 7.0,
            vern_start_days: 1.0,
            vern_end_days: 5.0,
            vern_factor_min: 0.5,
        };
        let params = ThermalParams::new(0.0, 30.0)
            .with_vernalization(vern)
            .with_photoperiod(PhotoperiodResponse::LongDay {
                critical_daylength: 6.0,
                insensitive_daylength: 12.0,
            });
        // 45°N in early January: about 8.7 h of daylight
        let t_max = [10.0; 6];
        let t_min = [2.0; 6];
        let series = compute_gdd(45.0, jan_first(), &t_max, &t_min, &params).unwrap();

        for i in 0..6 {
            let expected = series.raw_gdd[i] * series.vernalization_factor[i].min(series.photoperiod_factor[i]);
            assert_relative_eq!(series.gdd[i], expected, epsilon = 1e-12);
            assert!(series.gdd[i] <= series.raw_gdd[i]);
        }
        assert_eq!(series.cumulative_vernalization_days, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_relative_eq!(series.vernalization_factor[0], 0.5, epsilon = 1e-12);
        assert_eq!(series.vernalization_factor[5], 1.0);
        assert!(series.photoperiod_factor[0] > 0.0 && series.photoperiod_factor[0] < 1.0);
    }

    #[test]
    fn test_empty_window() {
        let series = compute_gdd(45.0, jan_first(), &[], &[], &ThermalParams::new(0.0, 30.0)).unwrap();
        assert!(series.is_empty());
    }
}
