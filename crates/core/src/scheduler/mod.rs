//! Crop-sequence scheduler
//!
//! Fits a cyclic [`CropRotation`] onto a multi-year daily weather series. The
//! scheduler walks the horizon with a position pointer and a rotation cursor,
//! as a small state machine:
//!
//! ```text
//! SelectCrop -> SearchSowing -> SimulateGrowth -> Commit -> SelectCrop
//!                  ^    |            |
//!                  +----+------------+   (rejection: advance one day, same crop)
//! ```
//!
//! The look-ahead window starts at the position, not at the sowing day: the
//! sowing search and the growth simulation share the same window end. A
//! rejected attempt never advances the rotation cursor, only the position by
//! one day, so the loop ends after at most one attempt per day of the horizon.

mod config;
mod growth;

pub use config::SchedulerConfig;

use crate::core_types::{
    CropOccupancy, CropRotation, DailyWeatherSeries, ScheduleResult, SowingRejection,
};
use crate::error::CropError;
use growth::{find_sowing_day, simulate_growth, GrowthOutcome, Harvest};
use tracing::{debug, info, warn};

#[derive(Debug)]
enum Step {
    SelectCrop,
    SearchSowing { cursor: usize },
    SimulateGrowth { cursor: usize, sowing: usize, window_end: usize },
    Commit { cursor: usize, sowing: usize, harvest: Harvest },
}

/// Assign crops of `rotation` to the days of `weather`
///
/// # Arguments
/// * `latitude` - Station latitude (decimal degrees), for day length
/// * `weather` - Daily temperatures over the whole horizon
/// * `rotation` - Crops cycled in order
/// * `config` - Look-ahead, maturity tolerance, pre-vernalization growth fraction
///
/// # Returns
/// Per-day crop ids and cumulative GDD, committed occupancies and the tally of
/// rejected sowing attempts. Days no crop could be fitted to stay unassigned.
///
/// # Errors
/// [`CropError::InvalidConfig`] for an out-of-range `config`.
pub fn compute_crop_sequence(
    latitude: f64,
    weather: &DailyWeatherSeries,
    rotation: &CropRotation,
    config: &SchedulerConfig,
) -> Result<ScheduleResult, CropError> {
    config.validate()?;

    let horizon = weather.len();
    let mut schedule = ScheduleResult::empty(weather.start(), horizon);
    let mut position = 0;
    let mut rotation_cursor = 0;
    let mut previous_overlap = 0;
    let mut step = Step::SelectCrop;

    while position < horizon {
        step = match step {
            Step::SelectCrop => Step::SearchSowing {
                cursor: rotation_cursor,
            },

            Step::SearchSowing { cursor } => {
                let crop = rotation.nth_cyclic(cursor);
                let search_end = position.saturating_add(config.look_ahead_days).min(horizon);
                if let Some(sowing) = find_sowing_day(weather, crop, position..search_end) {
                    Step::SimulateGrowth {
                        cursor,
                        sowing,
                        window_end: search_end,
                    }
                } else {
                    reject(&mut schedule, crop.id, position, SowingRejection::NoSowingDay);
                    position += 1;
                    Step::SearchSowing { cursor }
                }
            }

            Step::SimulateGrowth {
                cursor,
                sowing,
                window_end,
            } => {
                let crop = rotation.nth_cyclic(cursor);
                match simulate_growth(latitude, weather, crop, sowing..window_end, config)? {
                    GrowthOutcome::Mature(harvest) => Step::Commit {
                        cursor,
                        sowing,
                        harvest,
                    },
                    GrowthOutcome::Rejected(reason) => {
                        reject(&mut schedule, crop.id, sowing, reason);
                        position += 1;
                        Step::SearchSowing { cursor }
                    }
                }
            }

            Step::Commit {
                cursor,
                sowing,
                harvest,
            } => {
                let crop = rotation.nth_cyclic(cursor);
                let harvest_index = sowing + harvest.offset;

                let gap_start = sowing.saturating_sub(previous_overlap as usize);
                schedule.clear(gap_start..sowing);

                let occupancy = CropOccupancy {
                    crop_id: crop.id,
                    sowing_index: sowing,
                    harvest_index,
                    sowing_date: weather.date(sowing),
                    harvest_date: weather.date(harvest_index),
                    gdd_at_harvest: harvest.gdd_at_harvest(),
                    reached_full_maturity: harvest.reached_full_maturity,
                };
                info!(
                    "Crop {} ({}) sown {} harvested {} at {:.1} GDD",
                    crop.id,
                    crop.name,
                    occupancy.sowing_date,
                    occupancy.harvest_date,
                    occupancy.gdd_at_harvest
                );
                schedule.commit(occupancy, &harvest.cumulative[..harvest.offset]);

                previous_overlap = crop.crop_overlap_days;
                position = harvest_index + 1;
                rotation_cursor = cursor + 1;
                Step::SelectCrop
            }
        };
    }

    let rejections = schedule.rejections().total();
    if schedule.occupancies().is_empty() && horizon > 0 {
        warn!(
            "No crop of the rotation could be fitted over {} days ({} rejected attempts)",
            horizon, rejections
        );
    } else {
        info!(
            "Crop sequence complete: {} occupancies over {} days, {} rejected attempts",
            schedule.occupancies().len(),
            horizon,
            rejections
        );
    }
    Ok(schedule)
}

fn reject(schedule: &mut ScheduleResult, crop_id: u32, day: usize, reason: SowingRejection) {
    debug!("Crop {} rejected at day {}: {}", crop_id, day, reason);
    schedule.record_rejection(reason);
}
