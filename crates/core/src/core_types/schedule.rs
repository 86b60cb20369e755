//! Scheduler output
//!
//! [`ScheduleResult`] holds one crop id and one cumulative GDD value per day
//! of the horizon, plus the list of committed occupancies and the tally of
//! rejected sowing attempts.

use crate::core_types::crop::NO_CROP;
use crate::core_types::weather::date_at;
use crate::error::CropError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One crop cycle committed by the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropOccupancy {
    pub crop_id: u32,
    /// Horizon index of the sowing day (first occupied day)
    pub sowing_index: usize,
    /// Horizon index of the harvest day (first day after the occupancy)
    pub harvest_index: usize,
    pub sowing_date: NaiveDate,
    pub harvest_date: NaiveDate,
    /// Cumulative corrected GDD on the harvest day
    pub gdd_at_harvest: f64,
    /// `false` when harvest fell back to the maturity tolerance
    pub reached_full_maturity: bool,
}

impl CropOccupancy {
    /// Number of days assigned to the crop
    pub fn duration_days(&self) -> usize {
        self.harvest_index - self.sowing_index
    }
}

/// Why a sowing attempt was abandoned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SowingRejection {
    /// No admissible sowing day inside the look-ahead window
    NoSowingDay,
    /// Cumulative vernalization never reached `vern_end_days`
    VernalizationIncomplete,
    /// Too little thermal time before vernalization suppression started
    InsufficientPreVernalizationGrowth,
    /// The photoperiod factor never reached 1
    NoPhotoperiodRelease,
    /// Cumulative GDD never crossed the tolerance threshold
    MaturityNotReached,
}

impl fmt::Display for SowingRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::NoSowingDay => "no admissible sowing day",
            Self::VernalizationIncomplete => "vernalization incomplete",
            Self::InsufficientPreVernalizationGrowth => "insufficient growth before vernalization",
            Self::NoPhotoperiodRelease => "photoperiod never released",
            Self::MaturityNotReached => "maturity not reached",
        };
        f.write_str(text)
    }
}

/// Rejected sowing attempts by reason
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RejectionCounts {
    pub no_sowing_day: usize,
    pub vernalization_incomplete: usize,
    pub insufficient_pre_vernalization_growth: usize,
    pub no_photoperiod_release: usize,
    pub maturity_not_reached: usize,
}

impl RejectionCounts {
    pub fn record(&mut self, reason: SowingRejection) {
        let counter = match reason {
            SowingRejection::NoSowingDay => &mut self.no_sowing_day,
            SowingRejection::VernalizationIncomplete => &mut self.vernalization_incomplete,
            SowingRejection::InsufficientPreVernalizationGrowth => {
                &mut self.insufficient_pre_vernalization_growth
            }
            SowingRejection::NoPhotoperiodRelease => &mut self.no_photoperiod_release,
            SowingRejection::MaturityNotReached => &mut self.maturity_not_reached,
        };
        *counter += 1;
    }

    pub fn get(&self, reason: SowingRejection) -> usize {
        match reason {
            SowingRejection::NoSowingDay => self.no_sowing_day,
            SowingRejection::VernalizationIncomplete => self.vernalization_incomplete,
            SowingRejection::InsufficientPreVernalizationGrowth => {
                self.insufficient_pre_vernalization_growth
            }
            SowingRejection::NoPhotoperiodRelease => self.no_photoperiod_release,
            SowingRejection::MaturityNotReached => self.maturity_not_reached,
        }
    }

    pub fn total(&self) -> usize {
        self.no_sowing_day
            + self.vernalization_incomplete
            + self.insufficient_pre_vernalization_growth
            + self.no_photoperiod_release
            + self.maturity_not_reached
    }
}

/// Daily crop assignment over the whole horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    start: NaiveDate,
    crop_ids: Vec<u32>,
    cumulative_gdd: Vec<f64>,
    occupancies: Vec<CropOccupancy>,
    rejections: RejectionCounts,
}

impl ScheduleResult {
    /// Empty schedule: no crop on any day
    pub fn empty(start: NaiveDate, len: usize) -> Self {
        Self {
            start,
            crop_ids: vec![NO_CROP; len],
            cumulative_gdd: vec![0.0; len],
            occupancies: Vec::new(),
            rejections: RejectionCounts::default(),
        }
    }

    /// Build from raw daily arrays, e.g. produced by an earlier run and stored
    /// elsewhere. Occupancies are reconstructed from runs of equal crop id;
    /// their harvest GDD is the value of the last occupied day.
    ///
    /// # Errors
    /// [`CropError::LengthMismatch`] if the two arrays differ in length.
    pub fn from_daily(start: NaiveDate, crop_ids: Vec<u32>, cumulative_gdd: Vec<f64>) -> Result<Self, CropError> {
        CropError::check_len("cumulative_gdd", crop_ids.len(), cumulative_gdd.len())?;
        let mut occupancies = Vec::new();
        let mut index = 0;
        while index < crop_ids.len() {
            let crop_id = crop_ids[index];
            let run_start = index;
            while index < crop_ids.len() && crop_ids[index] == crop_id {
                index += 1;
            }
            if crop_id != NO_CROP {
                occupancies.push(CropOccupancy {
                    crop_id,
                    sowing_index: run_start,
                    harvest_index: index,
                    sowing_date: date_at(start, run_start),
                    harvest_date: date_at(start, index),
                    gdd_at_harvest: cumulative_gdd[index - 1],
                    reached_full_maturity: true,
                });
            }
        }
        Ok(Self {
            start,
            crop_ids,
            cumulative_gdd,
            occupancies,
            rejections: RejectionCounts::default(),
        })
    }

    pub fn len(&self) -> usize {
        self.crop_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crop_ids.is_empty()
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Crop id per day, [`NO_CROP`] on unassigned days
    pub fn crop_ids(&self) -> &[u32] {
        &self.crop_ids
    }

    /// Cumulative GDD per day since the occupying crop's sowing, 0 on unassigned days
    pub fn cumulative_gdd(&self) -> &[f64] {
        &self.cumulative_gdd
    }

    pub fn occupancies(&self) -> &[CropOccupancy] {
        &self.occupancies
    }

    pub fn occupancies_of(&self, crop_id: u32) -> impl Iterator<Item = &CropOccupancy> + '_ {
        self.occupancies.iter().filter(move |occ| occ.crop_id == crop_id)
    }

    pub fn sowing_dates(&self) -> Vec<NaiveDate> {
        self.occupancies.iter().map(|occ| occ.sowing_date).collect()
    }

    pub fn harvest_dates(&self) -> Vec<NaiveDate> {
        self.occupancies.iter().map(|occ| occ.harvest_date).collect()
    }

    pub fn rejections(&self) -> &RejectionCounts {
        &self.rejections
    }

    pub fn date(&self, index: usize) -> NaiveDate {
        date_at(self.start, index)
    }

    pub(crate) fn record_rejection(&mut self, reason: SowingRejection) {
        self.rejections.record(reason);
    }

    /// Unassign `range` (used to open the transition gap before a new sowing)
    pub(crate) fn clear(&mut self, range: std::ops::Range<usize>) {
        for index in range {
            self.crop_ids[index] = NO_CROP;
            self.cumulative_gdd[index] = 0.0;
        }
    }

    /// Assign `cumulative` to the days starting at `occupancy.sowing_index`
    pub(crate) fn commit(&mut self, occupancy: CropOccupancy, cumulative: &[f64]) {
        let days = occupancy.sowing_index..occupancy.harvest_index;
        for (index, gdd) in days.zip(cumulative) {
            self.crop_ids[index] = occupancy.crop_id;
            self.cumulative_gdd[index] = *gdd;
        }
        self.occupancies.push(occupancy);
    }
}
