use crate::error::IdragraErrorCode;
use crate::helpers::{handle_ffi_result, input_slice, output_slice};
use chrono::NaiveDate;
use idragra_crop_core::{adjust_kcb, distribute_parameter, ScheduleResult};

/// Distribute a GDD-tabulated parameter curve of one crop onto the days it
/// occupies (as produced by `idragra_compute_crop_sequence`).
///
/// # Safety
/// - `crop_ids`, `cumulative_gdd` and `out` must each point to `len` elements.
/// - `breakpoints` and `values` must each point to `table_len` `double`s.
#[no_mangle]
pub unsafe extern "C" fn idragra_distribute_parameter(
    crop_ids: *const u32,
    cumulative_gdd: *const f64,
    len: usize,
    crop_id: u32,
    breakpoints: *const f64,
    values: *const f64,
    table_len: usize,
    out: *mut f64,
) -> IdragraErrorCode {
    handle_ffi_result(|| {
        let crop_ids = unsafe { input_slice(crop_ids, len, "crop_ids") }?;
        let cumulative_gdd = unsafe { input_slice(cumulative_gdd, len, "cumulative_gdd") }?;
        let breakpoints = unsafe { input_slice(breakpoints, table_len, "breakpoints") }?;
        let values = unsafe { input_slice(values, table_len, "values") }?;
        let out = unsafe { output_slice(out, len, "out") }?;

        // dates play no part in the distribution
        let schedule = ScheduleResult::from_daily(NaiveDate::default(), crop_ids.to_vec(), cumulative_gdd.to_vec())?;
        out.copy_from_slice(&distribute_parameter(&schedule, crop_id, breakpoints, values)?);
        Ok(())
    })
}

/// Apply the FAO-56 climate correction to a daily Kcb series.
///
/// # Safety
/// `kcb`, `rh_min`, `wind_speed`, `canopy_height` and `out` must each point to
/// `len` `double`s. `out` may alias `kcb`.
#[no_mangle]
pub unsafe extern "C" fn idragra_adjust_kcb(
    kcb: *const f64,
    rh_min: *const f64,
    wind_speed: *const f64,
    canopy_height: *const f64,
    len: usize,
    out: *mut f64,
) -> IdragraErrorCode {
    handle_ffi_result(|| {
        let adjusted = {
            let kcb = unsafe { input_slice(kcb, len, "kcb") }?;
            let rh_min = unsafe { input_slice(rh_min, len, "rh_min") }?;
            let wind_speed = unsafe { input_slice(wind_speed, len, "wind_speed") }?;
            let canopy_height = unsafe { input_slice(canopy_height, len, "canopy_height") }?;
            adjust_kcb(kcb, rh_min, wind_speed, canopy_height)?
        };
        unsafe { output_slice(out, len, "out") }?.copy_from_slice(&adjusted);
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distribute_parameter() {
        let crop_ids = [0, 3, 3, 3, 3, 0];
        let cumulative = [0.0, 10.0, 20.0, 30.0, 40.0, 0.0];
        let breakpoints = [20.0, 40.0];
        let values = [1.0, 1.0];
        let mut out = [f64::NAN; 6];
        let code = unsafe {
            idragra_distribute_parameter(
                crop_ids.as_ptr(),
                cumulative.as_ptr(),
                6,
                3,
                breakpoints.as_ptr(),
                values.as_ptr(),
                2,
                out.as_mut_ptr(),
            )
        };
        assert_eq!(code, IdragraErrorCode::Ok);
        assert_eq!(out, [0.0, 0.0, 1.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_adjust_kcb_in_place() {
        let mut kcb = [0.0, 0.5, 1.0, 1.0, 1.0, 0.6, 0.0];
        let rh = [30.0; 7];
        let wind = [4.0; 7];
        let height = [2.0; 7];
        let ptr = kcb.as_mut_ptr();
        let code = unsafe { idragra_adjust_kcb(ptr, rh.as_ptr(), wind.as_ptr(), height.as_ptr(), 7, ptr) };
        assert_eq!(code, IdragraErrorCode::Ok);
        assert_eq!(kcb[1], 0.5);
        assert!(kcb[2] > 1.0 && kcb[5] > 0.6);
        assert_eq!(kcb[6], 0.0);
    }

    #[test]
    fn test_unordered_breakpoints_are_reported() {
        let crop_ids = [1u32; 4];
        let cumulative = [10.0, 20.0, 30.0, 40.0];
        let breakpoints = [20.0, 10.0];
        let mut out = [0.0; 4];
        let code = unsafe {
            idragra_distribute_parameter(
                crop_ids.as_ptr(),
                cumulative.as_ptr(),
                4,
                1,
                breakpoints.as_ptr(),
                breakpoints.as_ptr(),
                2,
                out.as_mut_ptr(),
            )
        };
        assert_eq!(code, IdragraErrorCode::InvalidParameter);
    }
}
