//! Daily degree days with a single-sine within-day temperature curve
//!
//! The day's temperature is approximated by a sine wave between `t_min` and
//! `t_max`; degree days are the area of that wave between the base and the
//! (horizontal) cutoff temperature. Five regimes are distinguished depending on
//! where the thresholds fall relative to the daily range; a day entirely below
//! the base contributes nothing.
//!
//! # Scientific References
//! - Baskerville, G.L. & Emin, P. (1969). "Rapid estimation of heat accumulation
//!   from maximum and minimum temperatures". Ecology, 50(3), 514-517
//! - Zalom, F.G. et al. (1983). "Degree-days: the calculation and use of heat
//!   units in pest management". University of California Leaflet 21373

use std::f64::consts::{FRAC_PI_2, PI};

/// Degree days accumulated in one day
///
/// # Arguments
/// * `t_max` - Daily maximum temperature (°C)
/// * `t_min` - Daily minimum temperature (°C)
/// * `t_base` - Base temperature (°C)
/// * `t_cutoff` - Cutoff temperature (°C), above `t_base`
///
/// # Returns
/// Degree days in `[0, t_cutoff - t_base]`, or 0 when the thresholds are out
/// of order or NaN
pub fn daily_degree_days(t_max: f64, t_min: f64, t_base: f64, t_cutoff: f64) -> f64 {
    let (t_min, t_max) = (t_min.min(t_max), t_max.max(t_min));
    let saturated = t_cutoff - t_base;
    if saturated.is_nan() || saturated <= 0.0 {
        return 0.0;
    }

    if t_min >= t_cutoff {
        return saturated;
    }
    if t_max <= t_base {
        return 0.0;
    }

    let mean = (t_max + t_min) / 2.0;
    let half_range = (t_max - t_min) / 2.0;

    let dd = if t_min >= t_base && t_max <= t_cutoff {
        mean - t_base
    } else if t_max <= t_cutoff {
        // lower threshold intercepted
        let theta1 = ((t_base - mean) / half_range).asin();
        ((mean - t_base) * (FRAC_PI_2 - theta1) + half_range * theta1.cos()) / PI
    } else if t_min >= t_base {
        // upper threshold intercepted
        let theta2 = ((t_cutoff - mean) / half_range).asin();
        ((mean - t_base) * (theta2 + FRAC_PI_2) + saturated * (FRAC_PI_2 - theta2)
            - half_range * theta2.cos())
            / PI
    } else {
        // both thresholds intercepted
        let theta1 = ((t_base - mean) / half_range).asin();
        let theta2 = ((t_cutoff - mean) / half_range).asin();
        ((mean - t_base) * (theta2 - theta1)
            + half_range * (theta1.cos() - theta2.cos())
            + saturated * (FRAC_PI_2 - theta2))
            / PI
    };

    dd.clamp(0.0, saturated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_within_thresholds_is_mean_minus_base() {
        assert_eq!(daily_degree_days(25.0, 15.0, 10.0, 30.0), 10.0);
        assert_eq!(daily_degree_days(30.0, 10.0, 10.0, 30.0), 10.0);
    }

    #[test]
    fn test_inverted_thresholds_give_nothing() {
        assert_eq!(daily_degree_days(25.0, 15.0, 30.0, 10.0), 0.0);
        assert_eq!(daily_degree_days(25.0, 15.0, f64::NAN, 30.0), 0.0);
    }

    #[test]
    fn test_lower_threshold_intercepted() {
        assert_relative_eq!(daily_degree_days(20.0, 5.0, 10.0, 30.0), 3.7712244103162473, epsilon = 1e-12);
        assert_relative_eq!(daily_degree_days(12.0, 6.0, 10.0, 30.0), 0.5084897641264987, epsilon = 1e-12);
    }

    #[test]
    fn test_upper_threshold_intercepted() {
        assert_relative_eq!(daily_degree_days(35.0, 20.0, 10.0, 30.0), 16.22877558968375, epsilon = 1e-12);
    }

    #[test]
    fn test_both_thresholds_intercepted() {
        assert_relative_eq!(daily_degree_days(38.0, 4.0, 10.0, 30.0), 10.400764409327701, epsilon = 1e-12);
        // symmetric range around the threshold midpoint
        assert_relative_eq!(daily_degree_days(36.0, 4.0, 10.0, 30.0), 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_saturated_and_cold_days() {
        assert_eq!(daily_degree_days(40.0, 32.0, 10.0, 30.0), 20.0);
        assert_eq!(daily_degree_days(8.0, 2.0, 10.0, 30.0), 0.0);
        assert_eq!(daily_degree_days(10.0, -5.0, 10.0, 30.0), 0.0);
    }

    #[test]
    fn test_bounds_over_a_grid() {
        for t_min in (-10..40).map(f64::from) {
            for spread in (0..25).map(f64::from) {
                let dd = daily_degree_days(t_min + spread, t_min, 8.0, 28.0);
                assert!((0.0..=20.0).contains(&dd), "t_min={t_min} spread={spread} dd={dd}");
            }
        }
    }
}
