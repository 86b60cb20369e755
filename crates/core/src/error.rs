//! Error type shared by every engine entry point
//!
//! Validation failures are configuration or programmer errors: a weather series
//! with arrays of different length, an empty rotation, a crop whose breakpoints
//! are not strictly ascending. They are reported eagerly, before any simulation
//! work starts. Scheduling failures (a crop that cannot be sown or does not
//! mature) are *not* errors; see [`crate::SowingRejection`].

use thiserror::Error;

/// Errors raised while validating engine inputs
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CropError {
    /// Two arrays that must describe the same days have different lengths
    #[error("{what}: expected {expected} values, got {actual}")]
    LengthMismatch {
        /// Name of the offending array
        what: &'static str,
        /// Length of the reference array
        expected: usize,
        /// Length actually supplied
        actual: usize,
    },

    /// A rotation must contain at least one crop
    #[error("crop rotation is empty")]
    EmptyRotation,

    /// `maturity_gdd` (or a distributor breakpoint list) is empty or not strictly ascending
    #[error("crop {crop_id}: GDD breakpoints must be non-empty and strictly increasing (offending index {index})")]
    NonIncreasingBreakpoints {
        /// Crop the breakpoints belong to
        crop_id: u32,
        /// First index that breaks the ordering
        index: usize,
    },

    /// A parameter curve does not have one value per GDD breakpoint
    #[error("crop {crop_id}: curve '{parameter}' has {actual} values, expected {expected}")]
    CurveLengthMismatch {
        /// Crop the curve belongs to
        crop_id: u32,
        /// Curve name
        parameter: String,
        /// Number of breakpoints
        expected: usize,
        /// Number of curve values
        actual: usize,
    },

    /// A crop field holds a value the engine cannot work with
    #[error("crop {crop_id}: invalid {field}: {reason}")]
    InvalidParameter {
        /// Crop the field belongs to (0 for thermal parameters checked on their own)
        crop_id: u32,
        /// Field name
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// No crop of the rotation defines the requested curve
    #[error("crop {crop_id}: no parameter curve named '{parameter}'")]
    UnknownParameter {
        /// Crop that was asked for the curve (0 when the whole rotation was searched)
        crop_id: u32,
        /// Curve name
        parameter: String,
    },

    /// Scheduler configuration out of range
    #[error("invalid scheduler configuration {field}: {reason}")]
    InvalidConfig {
        /// Field name
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

impl CropError {
    pub(crate) fn invalid(crop_id: u32, field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            crop_id,
            field,
            reason: reason.into(),
        }
    }

    /// Check that a parallel array has the reference length
    pub(crate) fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<(), Self> {
        if expected == actual {
            Ok(())
        } else {
            Err(Self::LengthMismatch {
                what,
                expected,
                actual,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offender() {
        let err = CropError::CurveLengthMismatch {
            crop_id: 4,
            parameter: "kcb".to_string(),
            expected: 6,
            actual: 5,
        };
        assert_eq!(err.to_string(), "crop 4: curve 'kcb' has 5 values, expected 6");

        let err = CropError::check_len("t_min", 365, 364).unwrap_err();
        assert_eq!(err.to_string(), "t_min: expected 365 values, got 364");
    }

    #[test]
    fn test_check_len_accepts_equal_lengths() {
        assert!(CropError::check_len("t_max", 10, 10).is_ok());
    }
}
