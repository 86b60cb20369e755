//! C-compatible mirrors of the core parameter types

use crate::error::DefaultIdragraError;
use crate::helpers::input_slice;
use chrono::NaiveDate;
use idragra_crop_core::{
    CropDefinition, PhotoperiodResponse, SchedulerConfig, ThermalParams, VernalizationParams,
};

/// Calendar date of the first element of every daily array
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdragraDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl IdragraDate {
    pub(crate) fn to_naive(self) -> Result<NaiveDate, DefaultIdragraError> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
            .ok_or_else(|| DefaultIdragraError::invalid_date(self.year, self.month, self.day))
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdragraPhotoperiodKind {
    /// Day length does not affect development
    None = 0,
    LongDay = 1,
    ShortDay = 2,
}

/// Temperature and day-length response of one crop
///
/// The vernalization fields are ignored unless `vernalizing` is set, the
/// day-length fields unless `photoperiod` is not `None`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdragraThermalParams {
    pub t_base: f64,
    pub t_cutoff: f64,
    pub vernalizing: bool,
    pub t_vern_min: f64,
    pub t_vern_max: f64,
    pub vern_slope: f64,
    pub vern_start_days: f64,
    pub vern_end_days: f64,
    pub vern_factor_min: f64,
    pub photoperiod: IdragraPhotoperiodKind,
    pub critical_daylength: f64,
    pub insensitive_daylength: f64,
}

impl IdragraThermalParams {
    fn vernalization(&self) -> Option<VernalizationParams> {
        self.vernalizing.then_some(VernalizationParams {
            t_vern_min: self.t_vern_min,
            t_vern_max: self.t_vern_max,
            vern_slope: self.vern_slope,
            vern_start_days: self.vern_start_days,
            vern_end_days: self.vern_end_days,
            vern_factor_min: self.vern_factor_min,
        })
    }

    fn photoperiod_response(&self) -> PhotoperiodResponse {
        let (critical_daylength, insensitive_daylength) =
            (self.critical_daylength, self.insensitive_daylength);
        match self.photoperiod {
            IdragraPhotoperiodKind::None => PhotoperiodResponse::None,
            IdragraPhotoperiodKind::LongDay => PhotoperiodResponse::LongDay {
                critical_daylength,
                insensitive_daylength,
            },
            IdragraPhotoperiodKind::ShortDay => PhotoperiodResponse::ShortDay {
                critical_daylength,
                insensitive_daylength,
            },
        }
    }

    pub(crate) fn to_thermal_params(self) -> ThermalParams {
        ThermalParams {
            t_base: self.t_base,
            t_cutoff: self.t_cutoff,
            vernalization: self.vernalization(),
            photoperiod: self.photoperiod_response(),
        }
    }
}

/// One crop of a rotation; parameter curves are distributed separately with
/// `idragra_distribute_parameter`
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct IdragraCrop {
    pub id: u32,
    pub min_sowing_doy: u32,
    pub sowing_delay_days: u32,
    pub min_sowing_temperature: f64,
    pub thermal: IdragraThermalParams,
    /// GDD breakpoints, the last one is the maturity threshold
    pub maturity_gdd: *const f64,
    pub maturity_len: usize,
    pub crop_overlap_days: u32,
}

impl IdragraCrop {
    /// # Safety
    /// `maturity_gdd` must point to `maturity_len` valid values.
    pub(crate) unsafe fn to_crop_definition(self) -> Result<CropDefinition, DefaultIdragraError> {
        let maturity = unsafe { input_slice(self.maturity_gdd, self.maturity_len, "maturity_gdd") }?;
        let mut crop = CropDefinition::new(
            self.id,
            format!("crop {}", self.id),
            self.thermal.t_base,
            self.thermal.t_cutoff,
            maturity.to_vec(),
        )
        .with_sowing_window(self.min_sowing_doy, self.sowing_delay_days, self.min_sowing_temperature)
        .with_photoperiod(self.thermal.photoperiod_response())
        .with_overlap_days(self.crop_overlap_days);
        crop.vernalization = self.thermal.vernalization();
        Ok(crop)
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdragraSchedulerConfig {
    pub look_ahead_days: usize,
    pub maturity_tolerance: f64,
    pub min_gdd_fraction_for_vernalization: f64,
}

impl From<&IdragraSchedulerConfig> for SchedulerConfig {
    fn from(config: &IdragraSchedulerConfig) -> Self {
        Self {
            look_ahead_days: config.look_ahead_days,
            maturity_tolerance: config.maturity_tolerance,
            min_gdd_fraction_for_vernalization: config.min_gdd_fraction_for_vernalization,
        }
    }
}

/// Default scheduler settings (366-day look-ahead, 0.9 tolerance, 0.2 fraction)
#[no_mangle]
pub extern "C" fn idragra_default_scheduler_config() -> IdragraSchedulerConfig {
    let config = SchedulerConfig::default();
    IdragraSchedulerConfig {
        look_ahead_days: config.look_ahead_days,
        maturity_tolerance: config.maturity_tolerance,
        min_gdd_fraction_for_vernalization: config.min_gdd_fraction_for_vernalization,
    }
}
