use crate::error::{DefaultIdragraError, IdragraErrorCode};
use crate::helpers::{handle_ffi_result, input_slice, output_slice};
use crate::types::{IdragraDate, IdragraThermalParams};
use idragra_crop_core::compute_gdd;

/// Corrected daily GDD and their running sum for one crop, from the first day
/// of the temperature arrays.
///
/// # Safety
/// - `t_max`, `t_min`, `out_gdd` and `out_cumulative_gdd` must each point to
///   `len` `double`s (they may be null when `len` is 0).
/// - `params` must point to a valid `IdragraThermalParams`.
#[no_mangle]
pub unsafe extern "C" fn idragra_compute_gdd(
    latitude: f64,
    start: IdragraDate,
    t_max: *const f64,
    t_min: *const f64,
    len: usize,
    params: *const IdragraThermalParams,
    out_gdd: *mut f64,
    out_cumulative_gdd: *mut f64,
) -> IdragraErrorCode {
    handle_ffi_result(|| {
        let params = unsafe { params.as_ref() }.ok_or_else(|| DefaultIdragraError::null_pointer("params"))?;
        let start = start.to_naive()?;
        let t_max = unsafe { input_slice(t_max, len, "t_max") }?;
        let t_min = unsafe { input_slice(t_min, len, "t_min") }?;
        let out_gdd = unsafe { output_slice(out_gdd, len, "out_gdd") }?;
        let out_cumulative_gdd = unsafe { output_slice(out_cumulative_gdd, len, "out_cumulative_gdd") }?;

        let series = compute_gdd(latitude, start, t_max, t_min, &params.to_thermal_params())?;
        out_gdd.copy_from_slice(&series.gdd);
        out_cumulative_gdd.copy_from_slice(&series.cumulative_gdd);
        Ok(())
    })
}
