//! Shared fixtures for the integration tests: synthetic climates and a small
//! set of calibrated crops.
#![allow(dead_code)]

use chrono::{Datelike, NaiveDate};
use idragra_crop_core::{
    CropDefinition, DailyWeatherSeries, PhotoperiodResponse, VernalizationParams,
};
use std::f64::consts::PI;

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub const LATITUDE: f64 = 45.0;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Sinusoidal seasonal climate: the daily mean follows
/// `base - amplitude * cos(2π (doy - 20) / 365)`, coldest on 20 January, and
/// the daily range is `2 * half_range`.
pub fn seasonal_weather(
    start: NaiveDate,
    end: NaiveDate,
    base: f64,
    amplitude: f64,
    half_range: f64,
) -> DailyWeatherSeries {
    let days = usize::try_from((end - start).num_days()).unwrap();
    let (mut t_max, mut t_min) = (Vec::with_capacity(days), Vec::with_capacity(days));
    for date in start.iter_days().take(days) {
        let doy = f64::from(date.ordinal());
        let mean = base - amplitude * (2.0 * PI * (doy - 20.0) / 365.0).cos();
        t_max.push(mean + half_range);
        t_min.push(mean - half_range);
    }
    DailyWeatherSeries::new(start, t_max, t_min).unwrap()
}

/// Temperate climate with hot summers, suitable for maize
pub fn maize_climate(years: i32) -> DailyWeatherSeries {
    seasonal_weather(date(2000, 1, 1), date(2000 + years, 1, 1), 13.0, 11.0, 6.0)
}

pub fn maize() -> CropDefinition {
    CropDefinition::new(1, "maize", 10.0, 30.0, vec![35.0, 40.0, 170.0, 650.0, 1400.0, 1720.0])
        .with_sowing_window(1, 365, 14.0)
        .with_curve("kcb", vec![0.15, 0.15, 0.3, 1.15, 1.15, 0.5])
        .with_curve("height", vec![0.05, 0.1, 0.4, 2.0, 2.5, 2.5])
}

pub fn winter_wheat() -> CropDefinition {
    CropDefinition::new(2, "winter wheat", 0.0, 30.0, vec![150.0, 300.0, 900.0, 1500.0, 2000.0])
        .with_sowing_window(240, 60, 8.0)
        .with_vernalization(VernalizationParams {
            t_vern_min: 3.0,
            t_vern_max: 10.0,
            vern_slope: 7.0,
            vern_start_days: 10.0,
            vern_end_days: 50.0,
            vern_factor_min: 0.0,
        })
        .with_photoperiod(PhotoperiodResponse::LongDay {
            critical_daylength: 6.0,
            insensitive_daylength: 12.0,
        })
        .with_curve("kcb", vec![0.15, 0.4, 1.1, 1.1, 0.3])
}

pub fn soybean() -> CropDefinition {
    CropDefinition::new(3, "soybean", 10.0, 30.0, vec![100.0, 400.0, 900.0, 1100.0])
        .with_sowing_window(150, 60, 16.0)
}
