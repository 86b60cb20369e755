//! Crop catalogue entries and rotations
//!
//! A [`CropDefinition`] carries everything the engine needs to know about one
//! crop variant: its sowing window, thermal thresholds, optional vernalization
//! and photoperiod responses, GDD breakpoints and the parameter curves tabulated
//! against those breakpoints (Kcb, LAI, canopy height, root depth, ...).

use crate::error::CropError;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Crop id reserved for "no crop on this day"
pub const NO_CROP: u32 = 0;

/// Length of the calendar year used to wrap sowing windows
const YEAR_DAYS: u32 = 365;

/// Cold requirement of a vernalizing crop
///
/// Daily vernalization is a trapezoid over mean temperature: it ramps from 0 at
/// `t_vern_min - vern_slope` to 1 at `t_vern_min`, stays at 1 up to
/// `t_vern_max` and ramps back to 0 at `t_vern_max + vern_slope`. The running
/// sum of those daily values drives the development suppression factor between
/// `vern_start_days` and `vern_end_days`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VernalizationParams {
    /// Lower bound of optimal vernalizing temperature (°C)
    pub t_vern_min: f64,
    /// Upper bound of optimal vernalizing temperature (°C)
    pub t_vern_max: f64,
    /// Width of the ramps either side of the optimum (°C)
    pub vern_slope: f64,
    /// Cumulative vernalization days at which suppression starts
    pub vern_start_days: f64,
    /// Cumulative vernalization days at which vernalization is complete
    pub vern_end_days: f64,
    /// Development factor applied when suppression starts (0-1)
    pub vern_factor_min: f64,
}

/// Day-length sensitivity of crop development
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PhotoperiodResponse {
    /// Development does not depend on day length
    #[default]
    None,
    /// Development stops below `critical_daylength` and is unrestricted above
    /// `insensitive_daylength` (`critical < insensitive`)
    LongDay {
        /// Day length (h) below which development stops
        critical_daylength: f64,
        /// Day length (h) above which development is unrestricted
        insensitive_daylength: f64,
    },
    /// Development stops above `critical_daylength` and is unrestricted below
    /// `insensitive_daylength` (`insensitive < critical`)
    ShortDay {
        /// Day length (h) above which development stops
        critical_daylength: f64,
        /// Day length (h) below which development is unrestricted
        insensitive_daylength: f64,
    },
}

impl PhotoperiodResponse {
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::None)
    }

    fn validate(self, crop_id: u32) -> Result<(), CropError> {
        match self {
            Self::None => Ok(()),
            Self::LongDay {
                critical_daylength,
                insensitive_daylength,
            } => {
                if !critical_daylength.is_finite() || !insensitive_daylength.is_finite() {
                    return Err(CropError::invalid(crop_id, "photoperiod", "day lengths must be finite"));
                }
                if insensitive_daylength <= critical_daylength {
                    return Err(CropError::invalid(
                        crop_id,
                        "insensitive_daylength",
                        "long-day crops need insensitive > critical",
                    ));
                }
                Ok(())
            }
            Self::ShortDay {
                critical_daylength,
                insensitive_daylength,
            } => {
                if !critical_daylength.is_finite() || !insensitive_daylength.is_finite() {
                    return Err(CropError::invalid(crop_id, "photoperiod", "day lengths must be finite"));
                }
                if insensitive_daylength >= critical_daylength {
                    return Err(CropError::invalid(
                        crop_id,
                        "insensitive_daylength",
                        "short-day crops need insensitive < critical",
                    ));
                }
                Ok(())
            }
        }
    }
}

/// Thermal parameters consumed by [`crate::compute_gdd`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermalParams {
    /// Base temperature below which no development occurs (°C)
    pub t_base: f64,
    /// Cutoff temperature above which development does not increase (°C)
    pub t_cutoff: f64,
    /// Vernalization requirement, if any
    pub vernalization: Option<VernalizationParams>,
    /// Photoperiod response
    pub photoperiod: PhotoperiodResponse,
}

impl ThermalParams {
    /// Plain degree-day accumulation between `t_base` and `t_cutoff`
    pub fn new(t_base: f64, t_cutoff: f64) -> Self {
        Self {
            t_base,
            t_cutoff,
            vernalization: None,
            photoperiod: PhotoperiodResponse::None,
        }
    }

    pub fn with_vernalization(mut self, vernalization: VernalizationParams) -> Self {
        self.vernalization = Some(vernalization);
        self
    }

    pub fn with_photoperiod(mut self, photoperiod: PhotoperiodResponse) -> Self {
        self.photoperiod = photoperiod;
        self
    }

    /// Check the thresholds before any degree-day computation
    ///
    /// # Errors
    /// [`CropError::InvalidParameter`] (crop id 0) for non-finite thresholds,
    /// `t_cutoff <= t_base`, or inconsistent vernalization/photoperiod values.
    pub fn validate(&self) -> Result<(), CropError> {
        self.validate_for(NO_CROP)
    }

    pub(crate) fn validate_for(&self, crop_id: u32) -> Result<(), CropError> {
        if !self.t_base.is_finite() || !self.t_cutoff.is_finite() {
            return Err(CropError::invalid(crop_id, "t_base", "thresholds must be finite"));
        }
        if self.t_cutoff <= self.t_base {
            return Err(CropError::invalid(
                crop_id,
                "t_cutoff",
                format!("must exceed t_base ({} <= {})", self.t_cutoff, self.t_base),
            ));
        }
        if let Some(vern) = &self.vernalization {
            vern.validate(crop_id)?;
        }
        self.photoperiod.validate(crop_id)
    }
}

impl VernalizationParams {
    fn validate(&self, crop_id: u32) -> Result<(), CropError> {
        let values = [
            self.t_vern_min,
            self.t_vern_max,
            self.vern_slope,
            self.vern_start_days,
            self.vern_end_days,
            self.vern_factor_min,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(CropError::invalid(crop_id, "vernalization", "values must be finite"));
        }
        // both divide the daily value and the suppression factor
        if self.vern_slope <= 0.0 {
            return Err(CropError::invalid(crop_id, "vern_slope", "must be positive"));
        }
        if self.vern_end_days <= self.vern_start_days {
            return Err(CropError::invalid(crop_id, "vern_end_days", "must exceed vern_start_days"));
        }
        if self.t_vern_max < self.t_vern_min {
            return Err(CropError::invalid(crop_id, "t_vern_max", "must not be below t_vern_min"));
        }
        if !(0.0..=1.0).contains(&self.vern_factor_min) {
            return Err(CropError::invalid(crop_id, "vern_factor_min", "must be within 0..=1"));
        }
        Ok(())
    }
}

/// One crop variant of the catalogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropDefinition {
    /// Positive id, unique within a rotation
    pub id: u32,
    /// Display label
    pub name: String,
    /// First admissible sowing day of year
    pub min_sowing_doy: u32,
    /// Sowing may happen up to this many days after `min_sowing_doy`
    pub sowing_delay_days: u32,
    /// Daily mean temperature that must be exceeded on the sowing day (°C)
    pub min_sowing_temperature: f64,
    /// Base temperature (°C)
    pub t_base: f64,
    /// Cutoff temperature (°C)
    pub t_cutoff: f64,
    #[serde(default)]
    pub vernalization: Option<VernalizationParams>,
    #[serde(default)]
    pub photoperiod: PhotoperiodResponse,
    /// GDD breakpoints, strictly increasing; the last one is full maturity
    pub maturity_gdd: Vec<f64>,
    /// Parameter curves aligned 1:1 with `maturity_gdd`
    #[serde(default)]
    pub curves: FxHashMap<String, Vec<f64>>,
    /// Days before the next sowing cleared from this crop's occupancy
    #[serde(default)]
    pub crop_overlap_days: u32,
}

impl CropDefinition {
    /// Crop that can be sown any day of the year with no vernalization or
    /// photoperiod response; refine it with the `with_*` methods.
    pub fn new(id: u32, name: impl Into<String>, t_base: f64, t_cutoff: f64, maturity_gdd: Vec<f64>) -> Self {
        Self {
            id,
            name: name.into(),
            min_sowing_doy: 1,
            sowing_delay_days: YEAR_DAYS,
            min_sowing_temperature: t_base,
            t_base,
            t_cutoff,
            vernalization: None,
            photoperiod: PhotoperiodResponse::None,
            maturity_gdd,
            curves: FxHashMap::default(),
            crop_overlap_days: 0,
        }
    }

    pub fn with_sowing_window(mut self, min_sowing_doy: u32, sowing_delay_days: u32, min_sowing_temperature: f64) -> Self {
        self.min_sowing_doy = min_sowing_doy;
        self.sowing_delay_days = sowing_delay_days;
        self.min_sowing_temperature = min_sowing_temperature;
        self
    }

    pub fn with_vernalization(mut self, vernalization: VernalizationParams) -> Self {
        self.vernalization = Some(vernalization);
        self
    }

    pub fn with_photoperiod(mut self, photoperiod: PhotoperiodResponse) -> Self {
        self.photoperiod = photoperiod;
        self
    }

    pub fn with_curve(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.curves.insert(name.into(), values);
        self
    }

    pub fn with_overlap_days(mut self, days: u32) -> Self {
        self.crop_overlap_days = days;
        self
    }

    pub fn is_vernalizing(&self) -> bool {
        self.vernalization.is_some()
    }

    /// Cumulative GDD at full maturity
    pub fn maturity_threshold(&self) -> f64 {
        self.maturity_gdd.last().copied().unwrap_or(0.0)
    }

    /// Values of the named curve, if the crop defines it
    pub fn curve(&self, name: &str) -> Option<&[f64]> {
        self.curves.get(name).map(Vec::as_slice)
    }

    pub fn thermal_params(&self) -> ThermalParams {
        ThermalParams {
            t_base: self.t_base,
            t_cutoff: self.t_cutoff,
            vernalization: self.vernalization,
            photoperiod: self.photoperiod,
        }
    }

    /// Whether `doy` falls inside `[min_sowing_doy, min_sowing_doy + sowing_delay_days]`
    ///
    /// Windows running past the end of the year continue from day 1.
    pub fn accepts_sowing_doy(&self, doy: u32) -> bool {
        let last = self.min_sowing_doy.saturating_add(self.sowing_delay_days);
        (self.min_sowing_doy..=last).contains(&doy) || (last > YEAR_DAYS && doy.saturating_add(YEAR_DAYS) <= last)
    }

    /// Check the catalogue entry
    ///
    /// # Errors
    /// Returns the first problem found: reserved id, sowing window out of
    /// range, invalid [`ThermalParams`], non-ascending breakpoints or
    /// misaligned curves.
    pub fn validate(&self) -> Result<(), CropError> {
        let id = self.id;
        if id == NO_CROP {
            return Err(CropError::invalid(id, "id", "0 is reserved for days without a crop"));
        }
        if !(1..=366).contains(&self.min_sowing_doy) {
            return Err(CropError::invalid(
                id,
                "min_sowing_doy",
                format!("must be within 1..=366, got {}", self.min_sowing_doy),
            ));
        }
        if self.sowing_delay_days > YEAR_DAYS + 1 {
            return Err(CropError::invalid(
                id,
                "sowing_delay_days",
                format!("must be within 0..=366, got {}", self.sowing_delay_days),
            ));
        }
        self.thermal_params().validate_for(id)?;
        validate_breakpoints(id, &self.maturity_gdd)?;

        let mut names: Vec<&String> = self.curves.keys().collect();
        names.sort();
        for name in names {
            let values = &self.curves[name];
            if values.len() != self.maturity_gdd.len() {
                return Err(CropError::CurveLengthMismatch {
                    crop_id: id,
                    parameter: name.clone(),
                    expected: self.maturity_gdd.len(),
                    actual: values.len(),
                });
            }
        }

        Ok(())
    }
}

/// Breakpoints must be non-empty and strictly ascending
pub(crate) fn validate_breakpoints(crop_id: u32, breakpoints: &[f64]) -> Result<(), CropError> {
    if breakpoints.is_empty() {
        return Err(CropError::NonIncreasingBreakpoints { crop_id, index: 0 });
    }
    for (index, pair) in breakpoints.windows(2).enumerate() {
        if pair[1].partial_cmp(&pair[0]) != Some(std::cmp::Ordering::Greater) {
            return Err(CropError::NonIncreasingBreakpoints {
                crop_id,
                index: index + 1,
            });
        }
    }
    Ok(())
}

/// Ordered crop list cycled by the scheduler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CropDefinition>", into = "Vec<CropDefinition>")]
pub struct CropRotation {
    crops: Vec<CropDefinition>,
}

impl TryFrom<Vec<CropDefinition>> for CropRotation {
    type Error = CropError;

    fn try_from(crops: Vec<CropDefinition>) -> Result<Self, Self::Error> {
        Self::new(crops)
    }
}

impl From<CropRotation> for Vec<CropDefinition> {
    fn from(rotation: CropRotation) -> Self {
        rotation.crops
    }
}

impl CropRotation {
    /// Validate every crop and build the rotation
    ///
    /// # Errors
    /// [`CropError::EmptyRotation`] for an empty list, the crop's own
    /// validation error, or [`CropError::InvalidParameter`] for a repeated id.
    pub fn new(crops: Vec<CropDefinition>) -> Result<Self, CropError> {
        if crops.is_empty() {
            return Err(CropError::EmptyRotation);
        }
        for (index, crop) in crops.iter().enumerate() {
            crop.validate()?;
            if crops[..index].iter().any(|other| other.id == crop.id) {
                return Err(CropError::invalid(crop.id, "id", "appears twice in the rotation"));
            }
        }
        Ok(Self { crops })
    }

    pub fn len(&self) -> usize {
        self.crops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }

    pub fn crops(&self) -> &[CropDefinition] {
        &self.crops
    }

    /// Crop at `position` of an endless cycle through the rotation
    pub fn nth_cyclic(&self, position: usize) -> &CropDefinition {
        &self.crops[position % self.crops.len()]
    }

    pub fn get(&self, crop_id: u32) -> Option<&CropDefinition> {
        self.crops.iter().find(|crop| crop.id == crop_id)
    }
}
