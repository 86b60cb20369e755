//! Astronomical day length
//!
//! # Scientific References
//! - Allen, R.G. et al. (1998). "Crop evapotranspiration - Guidelines for computing
//!   crop water requirements". FAO Irrigation and Drainage Paper 56, Eq. 24-25, 34

use std::f64::consts::PI;

/// Solar declination (rad) for a day of year
///
/// FAO-56 Eq. 24: δ = 0.409 × sin(2π/365 × J − 1.39)
pub fn solar_declination(doy: u32) -> f64 {
    0.409 * (2.0 * PI / 365.0 * f64::from(doy) - 1.39).sin()
}

/// Sunset hour angle (rad)
///
/// FAO-56 Eq. 25. The cosine argument is clamped so polar day and polar night
/// yield 24 h and 0 h instead of NaN.
pub fn sunset_hour_angle(latitude_deg: f64, doy: u32) -> f64 {
    let lat_rad = latitude_deg.to_radians();
    (-lat_rad.tan() * solar_declination(doy).tan())
        .clamp(-1.0, 1.0)
        .acos()
}

/// Daylight hours
///
/// FAO-56 Eq. 34: N = 24/π × ω_s
///
/// # Arguments
/// * `latitude_deg` - Station latitude (decimal degrees, north positive)
/// * `doy` - Day of year (1-366)
pub fn daylight_hours(latitude_deg: f64, doy: u32) -> f64 {
    24.0 / PI * sunset_hour_angle(latitude_deg, doy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_equator_is_twelve_hours_at_equinox() {
        assert_relative_eq!(daylight_hours(0.0, 80), 12.0, epsilon = 1e-9);
    }

    #[test]
    fn test_mid_latitude_solstices() {
        // 45°N: long summer days, short winter days
        assert_relative_eq!(daylight_hours(45.0, 172), 15.4248, epsilon = 1e-3);
        assert_relative_eq!(daylight_hours(45.0, 355), 8.5753, epsilon = 1e-3);
        // Southern hemisphere mirrors it
        assert_relative_eq!(daylight_hours(-45.0, 172), 24.0 - 15.4248, epsilon = 1e-3);
    }

    #[test]
    fn test_polar_day_and_night() {
        assert_relative_eq!(daylight_hours(80.0, 172), 24.0, epsilon = 1e-9);
        assert_relative_eq!(daylight_hours(80.0, 355), 0.0, epsilon = 1e-9);
    }
}
