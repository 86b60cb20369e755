//! Vernalization response
//!
//! Each day contributes a vernalization-day value in `[0, 1]` from a trapezoidal
//! response to mean temperature. The running total of those values sets a
//! development factor: no suppression before `vern_start_days`, suppression
//! to `vern_factor_min` when that total is reached, linear release back to 1
//! at `vern_end_days`, and no suppression afterwards.
//!
//! # Scientific References
//! - Stöckle, C.O. et al. (2003). "CropSyst, a cropping systems simulation model".
//!   European Journal of Agronomy, 18(3-4), 289-307

use crate::core_types::VernalizationParams;

/// Vernalization-day value of one day
///
/// # Arguments
/// * `t_mean` - Daily mean temperature (°C)
/// * `params` - Crop vernalization parameters
///
/// # Returns
/// 0 outside `[t_vern_min - slope, t_vern_max + slope]`, 1 on the optimum
/// plateau, linear in between
pub fn vernalization_day_value(t_mean: f64, params: &VernalizationParams) -> f64 {
    let slope = params.vern_slope;
    let lower = params.t_vern_min - slope;
    let upper = params.t_vern_max + slope;

    if t_mean < lower || t_mean > upper {
        0.0
    } else if t_mean < params.t_vern_min {
        (t_mean - lower) / slope
    } else if t_mean <= params.t_vern_max {
        1.0
    } else {
        (upper - t_mean) / slope
    }
}

/// Development factor for a cumulative vernalization-day count
pub fn vernalization_factor(cumulative_days: f64, params: &VernalizationParams) -> f64 {
    if cumulative_days < params.vern_start_days || cumulative_days >= params.vern_end_days {
        return 1.0;
    }
    let progress = (cumulative_days - params.vern_start_days)
        / (params.vern_end_days - params.vern_start_days);
    params.vern_factor_min + (1.0 - params.vern_factor_min) * progress
}

/// Running vernalization-day totals and factors for a window of days
///
/// # Returns
/// `(cumulative_days, factors)`, both with one entry per day
pub fn vernalization_series(t_mean: &[f64], params: &VernalizationParams) -> (Vec<f64>, Vec<f64>) {
    let mut total = 0.0;
    let cumulative: Vec<f64> = t_mean
        .iter()
        .map(|&t| {
            total += vernalization_day_value(t, params);
            total
        })
        .collect();
    let factors = cumulative
        .iter()
        .map(|&days| vernalization_factor(days, params))
        .collect();
    (cumulative, factors)
}
