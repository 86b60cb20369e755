//! Parameter curves and Kcb climate adjustment on scheduled seasons
mod common;

use approx::assert_relative_eq;
use common::{maize, maize_climate, soybean, winter_wheat, LATITUDE};
use idragra_crop_core::{
    adjust_kcb, climate_correction, compute_crop_sequence, distribute_parameter,
    distribute_rotation_parameter, CropError, CropRotation, ScheduleResult, SchedulerConfig, NO_CROP,
};

fn maize_schedule(years: i32) -> ScheduleResult {
    let rotation = CropRotation::new(vec![maize()]).unwrap();
    compute_crop_sequence(LATITUDE, &maize_climate(years), &rotation, &SchedulerConfig::default()).unwrap()
}

#[test]
fn test_kcb_curve_follows_each_season() {
    let schedule = maize_schedule(3);
    let crop = maize();
    let kcb = distribute_parameter(&schedule, crop.id, &crop.maturity_gdd, crop.curve("kcb").unwrap()).unwrap();
    assert_eq!(kcb.len(), schedule.len());

    for (day, (&id, &value)) in schedule.crop_ids().iter().zip(&kcb).enumerate() {
        assert!((0.0..=1.15).contains(&value), "day {day}: {value}");
        if id == NO_CROP {
            assert_eq!(value, 0.0, "fallow day {day}");
        }
    }

    let cumulative = schedule.cumulative_gdd();
    for occupancy in schedule.occupancies() {
        let season = occupancy.sowing_index..occupancy.harvest_index;
        assert_eq!(kcb[occupancy.sowing_index], 0.0);
        // mid-season plateau between the 650 and 1400 GDD breakpoints
        let plateau_start = season.clone().find(|&d| cumulative[d] >= 650.0).unwrap();
        let plateau_end = season.clone().find(|&d| cumulative[d] >= 1400.0).unwrap();
        assert!(kcb[plateau_start..=plateau_end].iter().all(|&v| v == 1.15));
        // the final 1720 GDD breakpoint lies beyond the last occupied day
        assert!(kcb[plateau_end + 1..occupancy.harvest_index]
            .windows(2)
            .all(|w| w[1] < w[0]));
    }
}

#[test]
fn test_rotation_parameter_sums_crop_curves() {
    let rotation = CropRotation::new(vec![maize(), winter_wheat(), soybean()]).unwrap();
    let schedule =
        compute_crop_sequence(LATITUDE, &maize_climate(4), &rotation, &SchedulerConfig::default()).unwrap();

    let total = distribute_rotation_parameter(&schedule, &rotation, "kcb").unwrap();
    let mut expected = vec![0.0; schedule.len()];
    for crop in [maize(), winter_wheat()] {
        let series = distribute_parameter(&schedule, crop.id, &crop.maturity_gdd, crop.curve("kcb").unwrap()).unwrap();
        for (sum, value) in expected.iter_mut().zip(series) {
            *sum += value;
        }
    }
    for (a, b) in total.iter().zip(&expected) {
        assert_relative_eq!(*a, *b, epsilon = 1e-12);
    }

    // soybean has no kcb curve, so its days stay at 0
    for occupancy in schedule.occupancies_of(3) {
        assert!(total[occupancy.sowing_index..occupancy.harvest_index].iter().all(|&v| v == 0.0));
    }

    assert!(matches!(
        distribute_rotation_parameter(&schedule, &rotation, "lai"),
        Err(CropError::UnknownParameter { .. })
    ));
}

#[test]
fn test_kcb_unchanged_in_reference_climate() {
    let schedule = maize_schedule(2);
    let crop = maize();
    let kcb = distribute_parameter(&schedule, crop.id, &crop.maturity_gdd, crop.curve("kcb").unwrap()).unwrap();
    let n = kcb.len();

    let adjusted = adjust_kcb(&kcb, &vec![45.0; n], &vec![2.0; n], &vec![2.5; n]).unwrap();
    assert_eq!(adjusted, kcb);
}

#[test]
fn test_kcb_raised_in_windy_dry_climate() {
    let schedule = maize_schedule(2);
    let crop = maize();
    let kcb = distribute_parameter(&schedule, crop.id, &crop.maturity_gdd, crop.curve("kcb").unwrap()).unwrap();
    let n = kcb.len();

    let adjusted = adjust_kcb(&kcb, &vec![30.0; n], &vec![4.0; n], &vec![2.5; n]).unwrap();
    let correction = climate_correction(30.0, 4.0, 2.5);
    assert!(correction > 0.0);

    let peak = adjusted.iter().copied().fold(f64::MIN, f64::max);
    assert_relative_eq!(peak, 1.15 + correction, epsilon = 1e-12);
    for ((&before, &after), &id) in kcb.iter().zip(&adjusted).zip(schedule.crop_ids()) {
        if before == 0.0 || id == NO_CROP {
            assert_eq!(after, before);
        } else {
            assert!(after >= before);
        }
    }
}
