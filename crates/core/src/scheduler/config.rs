//! Scheduler configuration

use crate::error::CropError;
use serde::{Deserialize, Serialize};

/// Engine-level constants of the crop-sequence scheduler
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Days scanned for a sowing day, and simulated after it
    pub look_ahead_days: usize,
    /// Fraction of the maturity GDD accepted when full maturity is never reached
    pub maturity_tolerance: f64,
    /// Fraction of the maturity GDD a vernalizing crop must accumulate before
    /// vernalization suppression starts
    pub min_gdd_fraction_for_vernalization: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            look_ahead_days: 366,
            maturity_tolerance: 0.9,
            min_gdd_fraction_for_vernalization: 0.2,
        }
    }
}

impl SchedulerConfig {
    /// # Errors
    /// [`CropError::InvalidConfig`] naming the first field out of range.
    pub fn validate(&self) -> Result<(), CropError> {
        if self.look_ahead_days == 0 {
            return Err(CropError::InvalidConfig {
                field: "look_ahead_days",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(self.maturity_tolerance > 0.0 && self.maturity_tolerance <= 1.0) {
            return Err(CropError::InvalidConfig {
                field: "maturity_tolerance",
                reason: format!("must be within (0, 1], got {}", self.maturity_tolerance),
            });
        }
        if !(0.0..1.0).contains(&self.min_gdd_fraction_for_vernalization) {
            return Err(CropError::InvalidConfig {
                field: "min_gdd_fraction_for_vernalization",
                reason: format!(
                    "must be within [0, 1), got {}",
                    self.min_gdd_fraction_for_vernalization
                ),
            });
        }
        Ok(())
    }
}
