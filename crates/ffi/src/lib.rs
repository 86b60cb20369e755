//! C ABI for the IdrAgra crop engine
//!
//! Every entry point works on caller-owned buffers (pointer + length) and
//! returns an [`IdragraErrorCode`]; details of the last failure on the calling
//! thread are available from [`idragra_last_error_message`]. The C header
//! `IdragraCropFFI.h` is generated by `build.rs`.
//!
//! ```c
//! IdragraSchedulerConfig config = idragra_default_scheduler_config();
//! IdragraErrorCode err = idragra_compute_crop_sequence(
//!     45.0, start, t_max, t_min, n_days, crops, n_crops, &config,
//!     crop_ids, cumulative_gdd, NULL);
//! if (err == Ok) {
//!     err = idragra_distribute_parameter(crop_ids, cumulative_gdd, n_days,
//!         maize.id, maize.maturity_gdd, maize_kcb, maize.maturity_len, kcb);
//! }
//! if (err == Ok) {
//!     err = idragra_adjust_kcb(kcb, rh_min, wind, height, n_days, kcb);
//! }
//! if (err != Ok) {
//!     fprintf(stderr, "%s\n", idragra_last_error_message());
//! }
//! ```

mod error;
mod helpers;
mod parameters;
mod schedule;
mod thermal;
mod types;

pub use error::{idragra_last_error_code, idragra_last_error_message, IdragraErrorCode};
pub use parameters::{idragra_adjust_kcb, idragra_distribute_parameter};
pub use schedule::idragra_compute_crop_sequence;
pub use thermal::idragra_compute_gdd;
pub use types::{
    idragra_default_scheduler_config, IdragraCrop, IdragraDate, IdragraPhotoperiodKind,
    IdragraSchedulerConfig, IdragraThermalParams,
};
