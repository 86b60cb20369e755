//! Crop development physics
//!
//! Daily building blocks of the thermal-time model:
//! - [`daylength`] - astronomical day length (FAO-56)
//! - [`degree_days`] - single-sine degree days with horizontal cutoff
//! - [`vernalization`] - cold requirement and development suppression
//! - [`photoperiod`] - long-day / short-day development gating
//! - [`thermal_time`] - the combined accumulator, [`compute_gdd`]

pub mod daylength;
pub mod degree_days;
pub mod photoperiod;
pub mod thermal_time;
pub mod vernalization;

pub use daylength::{daylight_hours, solar_declination};
pub use degree_days::daily_degree_days;
pub use photoperiod::photoperiod_factor;
pub use thermal_time::{compute_gdd, ThermalSeries};
pub use vernalization::{vernalization_day_value, vernalization_factor};
