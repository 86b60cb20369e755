//! Climate adjustment of the basal crop coefficient
//!
//! FAO-56 tabulates Kcb for a sub-humid climate with moderate wind. Where the
//! distributed Kcb curve is on a plateau (mid season) or declining (late
//! season), the coefficient is corrected for the actual minimum relative
//! humidity, wind speed and canopy height averaged over that segment.
//!
//! # Scientific References
//! - Allen, R.G. et al. (1998). FAO Irrigation and Drainage Paper 56, Eq. 70

use crate::error::CropError;
use std::ops::RangeInclusive;

/// Validity range of minimum relative humidity in the correction (%)
pub const RH_MIN_BOUNDS: (f64, f64) = (20.0, 80.0);
/// Validity range of 2 m wind speed in the correction (m/s)
pub const WIND_SPEED_BOUNDS: (f64, f64) = (1.0, 6.0);
/// Validity range of canopy height in the correction (m)
pub const CANOPY_HEIGHT_BOUNDS: (f64, f64) = (0.1, 10.0);

/// FAO-56 climate correction term added to a tabulated Kcb
///
/// `[0.04 (u2 − 2) − 0.004 (RHmin − 45)] (h / 3)^0.3`, with each input clamped
/// to its validity range first.
pub fn climate_correction(rh_min: f64, wind_speed: f64, canopy_height: f64) -> f64 {
    let rh_min = rh_min.clamp(RH_MIN_BOUNDS.0, RH_MIN_BOUNDS.1);
    let wind_speed = wind_speed.clamp(WIND_SPEED_BOUNDS.0, WIND_SPEED_BOUNDS.1);
    let canopy_height = canopy_height.clamp(CANOPY_HEIGHT_BOUNDS.0, CANOPY_HEIGHT_BOUNDS.1);
    (0.04 * (wind_speed - 2.0) - 0.004 * (rh_min - 45.0)) * (canopy_height / 3.0).powf(0.3)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trend {
    Flat,
    Declining,
}

/// Maximal runs of days whose rounded day-to-day change matches `trend`,
/// as inclusive ranges of Kcb indices
fn segments(kcb: &[f64], trend: Trend) -> Vec<RangeInclusive<usize>> {
    let matches = |step: usize| {
        let diff = ((kcb[step + 1] - kcb[step]) * 1e6).round() / 1e6;
        match trend {
            Trend::Flat => diff == 0.0,
            Trend::Declining => diff < 0.0,
        }
    };

    let steps = kcb.len().saturating_sub(1);
    let mut runs = Vec::new();
    let mut step = 0;
    while step < steps {
        if !matches(step) {
            step += 1;
            continue;
        }
        let first = step;
        while step < steps && matches(step) {
            step += 1;
        }
        runs.push(first..=step);
    }
    runs
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Climate-adjusted copy of a daily Kcb series
///
/// Flat segments with a non-zero mean and strictly declining segments receive
/// the correction computed from that segment's mean climate. A day shared by a
/// plateau and the decline following it is corrected once, with the plateau's
/// term, and days with Kcb of exactly 0 (no crop) are never corrected. This
/// departs from adding each run's correction to all of its values, which would
/// correct the shared day twice and lift fallow days above 0.
///
/// # Arguments
/// * `kcb` - Daily basal crop coefficient
/// * `rh_min` - Daily minimum relative humidity (%)
/// * `wind_speed` - Daily mean wind speed at 2 m (m/s)
/// * `canopy_height` - Daily canopy height (m)
///
/// # Errors
/// [`CropError::LengthMismatch`] if the climate arrays do not match `kcb`.
pub fn adjust_kcb(
    kcb: &[f64],
    rh_min: &[f64],
    wind_speed: &[f64],
    canopy_height: &[f64],
) -> Result<Vec<f64>, CropError> {
    CropError::check_len("rh_min", kcb.len(), rh_min.len())?;
    CropError::check_len("wind_speed", kcb.len(), wind_speed.len())?;
    CropError::check_len("canopy_height", kcb.len(), canopy_height.len())?;

    let mut adjusted = kcb.to_vec();
    let mut corrected = vec![false; kcb.len()];

    let plateaus = segments(kcb, Trend::Flat)
        .into_iter()
        .filter(|run| mean(&kcb[run.clone()]) != 0.0);
    let declines = segments(kcb, Trend::Declining);

    for run in plateaus.chain(declines) {
        let correction = climate_correction(
            mean(&rh_min[run.clone()]),
            mean(&wind_speed[run.clone()]),
            mean(&canopy_height[run.clone()]),
        );
        for day in run {
            if !corrected[day] && kcb[day] != 0.0 {
                adjusted[day] = kcb[day] + correction;
                corrected[day] = true;
            }
        }
    }
    Ok(adjusted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_climate_needs_no_correction() {
        assert_eq!(climate_correction(45.0, 2.0, 3.0), 0.0);
    }

    #[test]
    fn test_correction_clamps_inputs() {
        assert_relative_eq!(climate_correction(10.0, 8.0, 20.0), 0.37311007088327636, epsilon = 1e-12);
        assert_relative_eq!(climate_correction(95.0, 0.2, 0.01), -0.0648837778507809, epsilon = 1e-12);
    }

    #[test]
    fn test_segments() {
        let kcb = [0.2, 0.6, 1.1, 1.1, 1.1, 0.8, 0.4, 0.0, 0.0];
        assert_eq!(segments(&kcb, Trend::Flat), vec![2..=4, 7..=8]);
        assert_eq!(segments(&kcb, Trend::Declining), vec![4..=7]);
        assert!(segments(&[], Trend::Flat).is_empty());
        assert!(segments(&[1.0], Trend::Declining).is_empty());
    }

    #[test]
    fn test_rounding_hides_float_noise() {
        let kcb = [1.1, 1.1 + 1e-9, 1.1];
        assert_eq!(segments(&kcb, Trend::Flat), vec![0..=2]);
    }

    #[test]
    fn test_plateau_and_decline_adjusted() {
        let kcb = [0.2, 0.6, 1.1, 1.1, 1.1, 0.8, 0.4, 0.0];
        // CF = 0.04 × 2 + 0.004 × 15 = 0.14 at 3 m canopy
        let adjusted = adjust_kcb(&kcb, &[30.0; 8], &[4.0; 8], &[3.0; 8]).unwrap();
        let expected = [0.2, 0.6, 1.24, 1.24, 1.24, 0.94, 0.54, 0.0];
        for (got, want) in adjusted.iter().zip(expected) {
            assert_relative_eq!(*got, want, epsilon = 1e-9);
        }
        // untouched days are copied bit for bit
        assert_eq!(adjusted[0].to_bits(), kcb[0].to_bits());
        assert_eq!(adjusted[7], 0.0);
    }

    #[test]
    fn test_segments_use_their_own_climate() {
        let kcb = [1.0, 1.0, 0.5, 0.3, 0.3];
        let rh_min = [45.0, 45.0, 45.0, 45.0, 45.0];
        let wind = [2.0, 2.0, 2.0, 4.5, 4.5];
        let height = [3.0; 5];
        let adjusted = adjust_kcb(&kcb, &rh_min, &wind, &height).unwrap();
        // first plateau at reference climate, second one windy (CF = 0.1)
        assert_eq!(&adjusted[..2], &[1.0, 1.0]);
        assert_relative_eq!(adjusted[3], 0.4, epsilon = 1e-12);
        assert_relative_eq!(adjusted[4], 0.4, epsilon = 1e-12);
        // decline 1..=3: day 1 and 3 already corrected, day 2 uses the decline mean wind
        let decline_wind = (2.0 + 2.0 + 4.5) / 3.0;
        assert_relative_eq!(adjusted[2], 0.5 + 0.04 * (decline_wind - 2.0), epsilon = 1e-12);
    }

    #[test]
    fn test_increasing_series_unchanged() {
        let kcb: Vec<f64> = (0..20).map(|i| 0.15 + 0.05 * f64::from(i)).collect();
        let adjusted = adjust_kcb(&kcb, &[25.0; 20], &[5.0; 20], &[2.0; 20]).unwrap();
        assert_eq!(adjusted, kcb);
    }

    #[test]
    fn test_length_mismatch() {
        assert!(matches!(
            adjust_kcb(&[1.0, 1.0], &[40.0], &[2.0, 2.0], &[1.0, 1.0]),
            Err(CropError::LengthMismatch { what: "rh_min", .. })
        ));
    }
}
