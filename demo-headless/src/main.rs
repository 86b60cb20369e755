use anyhow::{ensure, Context, Result};
use chrono::{Datelike, NaiveDate};
use clap::Parser;
use idragra_crop_core::{
    adjust_kcb, compute_crop_sequence, distribute_rotation_parameter, CropDefinition,
    CropRotation, DailyWeatherSeries, PhotoperiodResponse, ScheduleResult, SchedulerConfig,
    VernalizationParams,
};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Crop-sequence demo: fits a rotation onto a daily climate and reports the
/// resulting crop cycles
#[derive(Parser, Debug)]
#[command(name = "idragra-crop-demo")]
#[command(about = "Crop rotation scheduling and Kcb distribution demo", long_about = None)]
struct Args {
    /// JSON scenario (latitude, start date, temperatures, rotation)
    #[arg(short, long, conflicts_with = "synthetic")]
    scenario: Option<PathBuf>,

    /// Generate a sinusoidal mid-latitude climate with a maize / wheat / soybean rotation
    #[arg(long)]
    synthetic: bool,

    /// Latitude of the synthetic climate (decimal degrees)
    #[arg(long, default_value_t = 45.0)]
    latitude: f64,

    /// Length of the synthetic climate in years
    #[arg(short, long, default_value_t = 6)]
    years: u32,

    /// First year of the synthetic climate
    #[arg(long, default_value_t = 2000)]
    start_year: i32,

    /// Write the daily table (date, crop, GDD, Kcb) to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,
}

/// Everything needed for one run, as read from a scenario file
#[derive(Debug, Deserialize)]
struct Scenario {
    latitude: f64,
    start: NaiveDate,
    t_max: Vec<f64>,
    t_min: Vec<f64>,
    /// Daily minimum relative humidity (%), 45 % if omitted
    #[serde(default)]
    rh_min: Option<Vec<f64>>,
    /// Daily wind speed at 2 m (m/s), 2 m/s if omitted
    #[serde(default)]
    wind_speed: Option<Vec<f64>>,
    rotation: CropRotation,
    #[serde(default)]
    config: SchedulerConfig,
}

#[derive(Debug, Serialize)]
struct DailyRow {
    date: NaiveDate,
    crop_id: u32,
    cumulative_gdd: f64,
    kcb: f64,
    kcb_adjusted: f64,
}

fn synthetic_scenario(latitude: f64, start_year: i32, years: u32) -> Result<Scenario> {
    let start = NaiveDate::from_ymd_opt(start_year, 1, 1).context("invalid start year")?;
    let end_year = start_year + i32::try_from(years).context("too many years")?;
    let end = NaiveDate::from_ymd_opt(end_year, 1, 1).context("invalid end year")?;
    let days = usize::try_from((end - start).num_days())?;

    // coldest day is 20 days after the winter solstice in either hemisphere
    let coldest_doy = if latitude >= 0.0 { 20.0 } else { 202.0 };
    let (mut t_max, mut t_min) = (Vec::with_capacity(days), Vec::with_capacity(days));
    for date in start.iter_days().take(days) {
        let phase = 2.0 * PI * (f64::from(date.ordinal()) - coldest_doy) / 365.0;
        let mean = 13.0 - 11.0 * phase.cos();
        t_max.push(mean + 6.0);
        t_min.push(mean - 6.0);
    }

    let maize = CropDefinition::new(1, "maize", 10.0, 30.0, vec![35.0, 40.0, 170.0, 650.0, 1400.0, 1720.0])
        .with_sowing_window(90, 60, 14.0)
        .with_overlap_days(10)
        .with_curve("kcb", vec![0.15, 0.15, 0.3, 1.15, 1.15, 0.5]);
    let wheat = CropDefinition::new(2, "winter wheat", 0.0, 30.0, vec![150.0, 300.0, 900.0, 1500.0, 2000.0])
        .with_sowing_window(240, 60, 8.0)
        .with_vernalization(VernalizationParams {
            t_vern_min: 3.0,
            t_vern_max: 10.0,
            vern_slope: 7.0,
            vern_start_days: 10.0,
            vern_end_days: 50.0,
            vern_factor_min: 0.0,
        })
        .with_photoperiod(PhotoperiodResponse::LongDay {
            critical_daylength: 6.0,
            insensitive_daylength: 12.0,
        })
        .with_curve("kcb", vec![0.15, 0.4, 1.1, 1.1, 0.3]);
    let soybean = CropDefinition::new(3, "soybean", 10.0, 30.0, vec![100.0, 400.0, 900.0, 1100.0])
        .with_sowing_window(150, 60, 16.0)
        .with_curve("kcb", vec![0.15, 0.5, 1.1, 0.5]);

    Ok(Scenario {
        latitude,
        start,
        rh_min: Some(vec![35.0; days]),
        wind_speed: Some(vec![2.5; days]),
        t_max,
        t_min,
        rotation: CropRotation::new(vec![maize, wheat, soybean])?,
        config: SchedulerConfig::default(),
    })
}

fn load_scenario(path: &Path) -> Result<Scenario> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn print_schedule(schedule: &ScheduleResult, rotation: &CropRotation) {
    println!("\n=== Crop cycles ===");
    println!("{:<16} {:<12} {:<12} {:>6} {:>10}", "crop", "sown", "harvested", "days", "GDD");
    for occupancy in schedule.occupancies() {
        let name = rotation.get(occupancy.crop_id).map_or("?", |crop| crop.name.as_str());
        println!(
            "{:<16} {:<12} {:<12} {:>6} {:>10.1}{}",
            name,
            occupancy.sowing_date,
            occupancy.harvest_date,
            occupancy.duration_days(),
            occupancy.gdd_at_harvest,
            if occupancy.reached_full_maturity { "" } else { " (partial)" }
        );
    }

    let rejections = schedule.rejections();
    println!("\n=== Rejected sowing attempts ===");
    println!("no sowing day:              {}", rejections.no_sowing_day);
    println!("vernalization incomplete:   {}", rejections.vernalization_incomplete);
    println!("low pre-vernalization GDD:  {}", rejections.insufficient_pre_vernalization_growth);
    println!("no photoperiod release:     {}", rejections.no_photoperiod_release);
    println!("maturity not reached:       {}", rejections.maturity_not_reached);
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let scenario = match &args.scenario {
        Some(path) => load_scenario(path)?,
        None => {
            ensure!(args.synthetic, "either --scenario or --synthetic is required");
            synthetic_scenario(args.latitude, args.start_year, args.years)?
        }
    };

    println!("=== IdrAgra crop sequence demo ===");
    let weather = DailyWeatherSeries::new(scenario.start, scenario.t_max, scenario.t_min)?;
    info!(
        "{} days from {} at latitude {:.2}, {} crops in rotation",
        weather.len(),
        weather.start(),
        scenario.latitude,
        scenario.rotation.len()
    );

    let schedule = compute_crop_sequence(scenario.latitude, &weather, &scenario.rotation, &scenario.config)?;
    print_schedule(&schedule, &scenario.rotation);

    let Some(csv_path) = args.csv else {
        return Ok(());
    };

    let days = schedule.len();
    let kcb = distribute_rotation_parameter(&schedule, &scenario.rotation, "kcb")?;
    let rh_min = scenario.rh_min.unwrap_or_else(|| vec![45.0; days]);
    let wind_speed = scenario.wind_speed.unwrap_or_else(|| vec![2.0; days]);
    let canopy_height = distribute_rotation_parameter(&schedule, &scenario.rotation, "height")
        .unwrap_or_else(|_| vec![1.0; days]);
    let kcb_adjusted = adjust_kcb(&kcb, &rh_min, &wind_speed, &canopy_height)?;

    let mut writer = csv::Writer::from_path(&csv_path).with_context(|| format!("creating {}", csv_path.display()))?;
    for day in 0..days {
        writer.serialize(DailyRow {
            date: schedule.date(day),
            crop_id: schedule.crop_ids()[day],
            cumulative_gdd: schedule.cumulative_gdd()[day],
            kcb: kcb[day],
            kcb_adjusted: kcb_adjusted[day],
        })?;
    }
    writer.flush()?;
    println!("\nDaily table written to {}", csv_path.display());
    Ok(())
}
