//! Sowing search and growth simulation for a single sowing attempt

use crate::core_types::{CropDefinition, DailyWeatherSeries, SowingRejection};
use crate::error::CropError;
use crate::physics::thermal_time::{compute_gdd, cumulative_sum, first_exceeding};
use crate::scheduler::SchedulerConfig;
use std::ops::Range;

/// A crop that reached maturity inside its look-ahead window
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Harvest {
    /// Harvest day, counted from the sowing day
    pub offset: usize,
    /// Cumulative corrected GDD from the sowing day, up to the end of the window
    pub cumulative: Vec<f64>,
    pub reached_full_maturity: bool,
}

impl Harvest {
    pub fn gdd_at_harvest(&self) -> f64 {
        self.cumulative[self.offset]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum GrowthOutcome {
    Mature(Harvest),
    Rejected(SowingRejection),
}

/// First day of `days` inside the crop's sowing window and warmer than its
/// minimum sowing temperature
pub(crate) fn find_sowing_day(
    weather: &DailyWeatherSeries,
    crop: &CropDefinition,
    mut days: Range<usize>,
) -> Option<usize> {
    days.find(|&day| {
        crop.accepts_sowing_doy(weather.doy(day))
            && weather.mean_temperature(day) > crop.min_sowing_temperature
    })
}

/// Simulate `crop` sown on the first day of `days` until harvest or the last
/// day of `days`
///
/// `days` ends where the look-ahead window that found the sowing day ends, so
/// a late sowing leaves a shorter season.
pub(crate) fn simulate_growth(
    latitude: f64,
    weather: &DailyWeatherSeries,
    crop: &CropDefinition,
    days: Range<usize>,
    config: &SchedulerConfig,
) -> Result<GrowthOutcome, CropError> {
    let sowing = days.start;
    let (t_max, t_min) = weather.window(days);
    let thermal = compute_gdd(latitude, weather.date(sowing), t_max, t_min, &crop.thermal_params())?;
    let maturity = crop.maturity_threshold();

    let mut gdd = thermal.gdd.clone();
    match &crop.vernalization {
        Some(vern) => {
            let completed = thermal
                .cumulative_vernalization_days
                .iter()
                .any(|&days| days >= vern.vern_end_days);
            if !completed {
                return Ok(GrowthOutcome::Rejected(SowingRejection::VernalizationIncomplete));
            }
        }
        None => {
            // a day entirely below the base temperature ends thermal development
            if let Some(cold_day) = thermal.raw_gdd.iter().position(|&dd| dd == 0.0) {
                gdd[cold_day..].fill(0.0);
            }
        }
    }

    if crop.photoperiod.is_active() && !thermal.photoperiod_factor.iter().any(|&f| f == 1.0) {
        return Ok(GrowthOutcome::Rejected(SowingRejection::NoPhotoperiodRelease));
    }

    let cumulative = cumulative_sum(&gdd);

    if let Some(vern) = &crop.vernalization {
        let onset = thermal
            .cumulative_vernalization_days
            .iter()
            .position(|&days| days >= vern.vern_start_days);
        if let Some(onset) = onset {
            if cumulative[onset] < config.min_gdd_fraction_for_vernalization * maturity {
                return Ok(GrowthOutcome::Rejected(
                    SowingRejection::InsufficientPreVernalizationGrowth,
                ));
            }
        }
    }

    let (offset, reached_full_maturity) = match first_exceeding(&cumulative, maturity) {
        Some(offset) => (offset, true),
        None => match first_exceeding(&cumulative, config.maturity_tolerance * maturity) {
            Some(offset) => (offset, false),
            None => return Ok(GrowthOutcome::Rejected(SowingRejection::MaturityNotReached)),
        },
    };

    Ok(GrowthOutcome::Mature(Harvest {
        offset,
        cumulative,
        reached_full_maturity,
    }))
}
