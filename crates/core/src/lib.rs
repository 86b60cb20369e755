//! Crop-sequence and thermal-time engine
//!
//! Daily crop development for the IdrAgra agro-hydrological model: fits a
//! rotation of crops onto a multi-year temperature record and derives the
//! daily crop-parameter series the water balance consumes.
//!
//! ## Stages
//!
//! 1. [`compute_gdd`] - sine-wave degree days with vernalization and
//!    photoperiod corrections for one crop over a window of days
//! 2. [`compute_crop_sequence`] - sowing-date search and rotation fitting over
//!    the whole horizon ([`compute_crop_sequences`] for many stations)
//! 3. [`distribute_parameter`] - GDD-tabulated curves (Kcb, LAI, height, ...)
//!    mapped onto the daily timeline
//! 4. [`adjust_kcb`] - FAO-56 climate correction of the Kcb curve
//!
//! Every stage is a pure function over plain arrays; nothing here reads files
//! or keeps global state.

pub mod batch;
pub mod core_types;
pub mod distribution;
pub mod error;
pub mod kcb;
pub mod physics;
pub mod scheduler;

pub use batch::{compute_crop_sequences, StationSchedule, StationSeries};
pub use core_types::{
    CropDefinition, CropOccupancy, CropRotation, DailyRecord, DailyWeatherSeries,
    PhotoperiodResponse, RejectionCounts, ScheduleResult, SowingRejection, ThermalParams,
    VernalizationParams, NO_CROP,
};
pub use distribution::{distribute_parameter, distribute_rotation_parameter};
pub use error::CropError;
pub use kcb::{adjust_kcb, climate_correction};
pub use physics::{compute_gdd, ThermalSeries};
pub use scheduler::{compute_crop_sequence, SchedulerConfig};
