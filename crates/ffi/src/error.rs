use idragra_crop_core::CropError;
use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

/// Common interface for errors crossing the FFI boundary.
///
/// - `code()` - error code returned to the caller
/// - `msg()` - message kept for `idragra_last_error_message`
pub(crate) trait IdragraError {
    fn code(&self) -> IdragraErrorCode;

    fn msg(&self) -> &str;
}

/// Default [`IdragraError`] carrying a code and a formatted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultIdragraError {
    code: IdragraErrorCode,
    msg: String,
}

impl DefaultIdragraError {
    /// Create error for null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"t_max"`, `"out_gdd"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: IdragraErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Create error for a calendar date that does not exist.
    pub fn invalid_date(year: i32, month: u32, day: u32) -> Self {
        Self {
            code: IdragraErrorCode::InvalidDate,
            msg: format!("Invalid date {year:04}-{month:02}-{day:02}"),
        }
    }
}

impl IdragraError for DefaultIdragraError {
    fn code(&self) -> IdragraErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

impl From<CropError> for DefaultIdragraError {
    fn from(error: CropError) -> Self {
        let code = match &error {
            CropError::LengthMismatch { .. } | CropError::CurveLengthMismatch { .. } => {
                IdragraErrorCode::LengthMismatch
            }
            CropError::InvalidConfig { .. } => IdragraErrorCode::InvalidConfig,
            CropError::EmptyRotation
            | CropError::NonIncreasingBreakpoints { .. }
            | CropError::InvalidParameter { .. }
            | CropError::UnknownParameter { .. } => IdragraErrorCode::InvalidParameter,
        };
        Self {
            code,
            msg: error.to_string(),
        }
    }
}

/// FFI error codes returned by every `idragra_*` function.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdragraErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// The start date is not a valid calendar date.
    InvalidDate = 2,

    /// Input arrays or curve tables of inconsistent length.
    LengthMismatch = 3,

    /// Invalid crop, rotation or curve parameter.
    InvalidParameter = 4,

    /// Invalid scheduler configuration.
    InvalidConfig = 5,
}

impl From<DefaultIdragraError> for IdragraErrorCode {
    fn from(error: DefaultIdragraError) -> Self {
        error.code
    }
}

thread_local! {
    /// Most recent FFI error on this thread (C string, error code).
    /// The CString is owned here so the pointer handed out stays valid.
    static LAST_ERROR: RefCell<(Option<CString>, IdragraErrorCode)> = const { RefCell::new((None, IdragraErrorCode::Ok)) };
}

pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, IdragraErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, IdragraErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns:
/// - A borrowed pointer to the error message if the last call on this thread failed.
/// - `null` if the last call succeeded.
///
/// # Lifetime
/// The returned pointer is valid until the next `idragra_*` call on this thread.
///
/// **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```c
/// IdragraErrorCode err = idragra_adjust_kcb(kcb, rh, wind, height, n, out);
/// if (err != Ok) {
///     const char* error = idragra_last_error_message();
///     if (error) {
///         fprintf(stderr, "Kcb adjustment failed: %s\n", error);
///     }
/// }
/// ```
#[no_mangle]
pub extern "C" fn idragra_last_error_message() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code on this thread (`Ok` after a successful call).
#[no_mangle]
pub extern "C" fn idragra_last_error_code() -> IdragraErrorCode {
    with_last_error(|(_cstring, code)| *code)
}
