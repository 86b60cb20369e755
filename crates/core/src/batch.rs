//! Multi-station scheduling
//!
//! A study area is usually covered by several weather stations, each with its
//! own temperature record and latitude. Stations are independent, so the
//! rotation is fitted to each of them in parallel.

use crate::core_types::{CropRotation, DailyWeatherSeries, ScheduleResult};
use crate::error::CropError;
use crate::scheduler::{compute_crop_sequence, SchedulerConfig};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Weather record of one station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationSeries {
    pub station_id: u32,
    /// Decimal degrees, north positive
    pub latitude: f64,
    pub weather: DailyWeatherSeries,
}

/// Schedule of one station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationSchedule {
    pub station_id: u32,
    pub schedule: ScheduleResult,
}

/// Run [`compute_crop_sequence`] for every station, in parallel
///
/// Results are returned in the order of `stations`.
///
/// # Errors
/// The first error raised by any station.
pub fn compute_crop_sequences(
    stations: &[StationSeries],
    rotation: &CropRotation,
    config: &SchedulerConfig,
) -> Result<Vec<StationSchedule>, CropError> {
    config.validate()?;
    info!("Scheduling {} crops on {} stations", rotation.len(), stations.len());

    stations
        .par_iter()
        .map(|station| {
            let schedule = compute_crop_sequence(station.latitude, &station.weather, rotation, config)?;
            Ok(StationSchedule {
                station_id: station.station_id,
                schedule,
            })
        })
        .collect()
}
