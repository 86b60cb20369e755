//! Parameter-curve distribution
//!
//! Crop parameters (Kcb, LAI, canopy height, root depth, ...) are tabulated
//! against GDD breakpoints. Distributing a curve places each tabulated value on
//! the first day its breakpoint is reached inside every occupancy of the crop,
//! then fills the days in between by linear interpolation over the day index.
//! Days outside the crop's occupancy are 0, so the tail of an occupancy that
//! never reached its last breakpoint ramps down to the 0 of the following day.

use crate::core_types::crop::validate_breakpoints;
use crate::core_types::{CropRotation, ScheduleResult};
use crate::error::CropError;
use tracing::warn;

/// Daily series of one parameter for one crop over the whole horizon
///
/// A breakpoint of 0 GDD with value 0 is prepended to the table, so the series
/// starts from 0 on each sowing day.
///
/// # Arguments
/// * `schedule` - Scheduler output
/// * `crop_id` - Crop whose occupancy is distributed
/// * `breakpoints` - GDD breakpoints, strictly increasing
/// * `values` - Parameter value at each breakpoint
///
/// # Errors
/// [`CropError::LengthMismatch`] if the table columns differ in length,
/// [`CropError::NonIncreasingBreakpoints`] if the breakpoints are not ascending.
pub fn distribute_parameter(
    schedule: &ScheduleResult,
    crop_id: u32,
    breakpoints: &[f64],
    values: &[f64],
) -> Result<Vec<f64>, CropError> {
    CropError::check_len("values", breakpoints.len(), values.len())?;
    validate_breakpoints(crop_id, breakpoints)?;

    let table = std::iter::once((0.0, 0.0)).chain(breakpoints.iter().copied().zip(values.iter().copied()));

    let crop_ids = schedule.crop_ids();
    let cumulative = schedule.cumulative_gdd();
    let mut series: Vec<f64> = crop_ids
        .iter()
        .map(|&id| if id == crop_id { f64::NAN } else { 0.0 })
        .collect();

    for (breakpoint, value) in table {
        let mut reached_before = false;
        for day in 0..series.len() {
            let reached = crop_ids[day] == crop_id && cumulative[day] >= breakpoint;
            if reached && !reached_before {
                series[day] = value;
            }
            reached_before = reached;
        }
    }

    fill_by_interpolation(&mut series);
    Ok(series)
}

/// Sum of the distributed `parameter` over every crop of the rotation
///
/// Crops without a curve of that name contribute nothing.
///
/// # Errors
/// [`CropError::UnknownParameter`] if no crop defines the curve, or any error of
/// [`distribute_parameter`].
pub fn distribute_rotation_parameter(
    schedule: &ScheduleResult,
    rotation: &CropRotation,
    parameter: &str,
) -> Result<Vec<f64>, CropError> {
    let mut total = vec![0.0; schedule.len()];
    let mut found = false;

    for crop in rotation.crops() {
        let Some(values) = crop.curve(parameter) else {
            warn!("Crop {} ({}) has no '{}' curve", crop.id, crop.name, parameter);
            continue;
        };
        found = true;
        let series = distribute_parameter(schedule, crop.id, &crop.maturity_gdd, values)?;
        for (sum, value) in total.iter_mut().zip(series) {
            *sum += value;
        }
    }

    if found {
        Ok(total)
    } else {
        Err(CropError::UnknownParameter {
            crop_id: 0,
            parameter: parameter.to_string(),
        })
    }
}

/// Replace NaN entries by linear interpolation between the nearest defined
/// neighbours; leading/trailing gaps take the nearest defined value and an
/// all-NaN series becomes all zero.
fn fill_by_interpolation(series: &mut [f64]) {
    let defined: Vec<usize> = (0..series.len()).filter(|&i| !series[i].is_nan()).collect();
    let (Some(&first), Some(&last)) = (defined.first(), defined.last()) else {
        series.fill(0.0);
        return;
    };

    let head = series[first];
    series[..first].fill(head);
    let tail = series[last];
    series[last + 1..].fill(tail);

    for pair in defined.windows(2) {
        let (left, right) = (pair[0], pair[1]);
        if right - left < 2 {
            continue;
        }
        let (from, to) = (series[left], series[right]);
        let span = (right - left) as f64;
        for day in left + 1..right {
            series[day] = from + (to - from) * (day - left) as f64 / span;
        }
    }
}
