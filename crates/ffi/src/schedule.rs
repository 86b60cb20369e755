use crate::error::{DefaultIdragraError, IdragraErrorCode};
use crate::helpers::{handle_ffi_result, input_slice, output_slice};
use crate::types::{IdragraCrop, IdragraDate, IdragraSchedulerConfig};
use idragra_crop_core::{compute_crop_sequence, CropRotation, DailyWeatherSeries, SchedulerConfig};

/// Fit a crop rotation onto a daily temperature record.
///
/// Writes the crop id occupying each day (0 when fallow) and the cumulative
/// GDD of that crop. `out_occupancy_count`, when non-null, receives the number
/// of committed crop cycles.
///
/// # Safety
/// - `t_max`, `t_min`, `out_crop_ids` and `out_cumulative_gdd` must each point
///   to `len` elements.
/// - `crops` must point to `crop_count` valid `IdragraCrop`s, each with a
///   valid `maturity_gdd` array.
/// - `config` may be null (defaults are used) or point to a valid config.
#[no_mangle]
pub unsafe extern "C" fn idragra_compute_crop_sequence(
    latitude: f64,
    start: IdragraDate,
    t_max: *const f64,
    t_min: *const f64,
    len: usize,
    crops: *const IdragraCrop,
    crop_count: usize,
    config: *const IdragraSchedulerConfig,
    out_crop_ids: *mut u32,
    out_cumulative_gdd: *mut f64,
    out_occupancy_count: *mut usize,
) -> IdragraErrorCode {
    handle_ffi_result(|| {
        let start = start.to_naive()?;
        let t_max = unsafe { input_slice(t_max, len, "t_max") }?;
        let t_min = unsafe { input_slice(t_min, len, "t_min") }?;
        let crops = unsafe { input_slice(crops, crop_count, "crops") }?;
        let out_crop_ids = unsafe { output_slice(out_crop_ids, len, "out_crop_ids") }?;
        let out_cumulative_gdd = unsafe { output_slice(out_cumulative_gdd, len, "out_cumulative_gdd") }?;
        let config = unsafe { config.as_ref() }.map_or_else(SchedulerConfig::default, SchedulerConfig::from);

        let definitions = crops
            .iter()
            .map(|crop| unsafe { crop.to_crop_definition() })
            .collect::<Result<Vec<_>, DefaultIdragraError>>()?;
        let rotation = CropRotation::new(definitions)?;
        let weather = DailyWeatherSeries::new(start, t_max.to_vec(), t_min.to_vec())?;

        let schedule = compute_crop_sequence(latitude, &weather, &rotation, &config)?;
        out_crop_ids.copy_from_slice(schedule.crop_ids());
        out_cumulative_gdd.copy_from_slice(schedule.cumulative_gdd());
        if let Some(count) = unsafe { out_occupancy_count.as_mut() } {
            *count = schedule.occupancies().len();
        }
        Ok(())
    })
}
