//! Photoperiod response
//!
//! Long-day crops develop only when days are long enough, short-day crops only
//! when days are short enough. Between the critical and the insensitive day
//! length the response is linear. For short-day crops the insensitive length is
//! the *shorter* of the two, so the ramp runs downwards with day length.

use crate::core_types::PhotoperiodResponse;

/// Development factor for a day of `daylight_hours`
///
/// # Returns
/// Factor in `[0, 1]`; always 1 for [`PhotoperiodResponse::None`]
pub fn photoperiod_factor(daylight_hours: f64, response: &PhotoperiodResponse) -> f64 {
    match *response {
        PhotoperiodResponse::None => 1.0,
        PhotoperiodResponse::LongDay {
            critical_daylength,
            insensitive_daylength,
        } => {
            if daylight_hours <= critical_daylength {
                0.0
            } else if daylight_hours >= insensitive_daylength {
                1.0
            } else {
                (daylight_hours - critical_daylength) / (insensitive_daylength - critical_daylength)
            }
        }
        PhotoperiodResponse::ShortDay {
            critical_daylength,
            insensitive_daylength,
        } => {
            if daylight_hours >= critical_daylength {
                0.0
            } else if daylight_hours <= insensitive_daylength {
                1.0
            } else {
                (critical_daylength - daylight_hours) / (critical_daylength - insensitive_daylength)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_long_day() {
        let response = PhotoperiodResponse::LongDay {
            critical_daylength: 8.0,
            insensitive_daylength: 14.0,
        };
        assert_eq!(photoperiod_factor(7.0, &response), 0.0);
        assert_relative_eq!(photoperiod_factor(10.0, &response), 1.0 / 3.0, epsilon = 1e-12);
        assert_eq!(photoperiod_factor(15.0, &response), 1.0);
    }

    #[test]
    fn test_short_day() {
        let response = PhotoperiodResponse::ShortDay {
            critical_daylength: 13.0,
            insensitive_daylength: 10.0,
        };
        assert_eq!(photoperiod_factor(9.0, &response), 1.0);
        assert_relative_eq!(photoperiod_factor(11.0, &response), 2.0 / 3.0, epsilon = 1e-12);
        assert_eq!(photoperiod_factor(13.5, &response), 0.0);
    }

    #[test]
    fn test_insensitive_crop() {
        assert_eq!(photoperiod_factor(3.0, &PhotoperiodResponse::None), 1.0);
    }
}
