use crate::error::{with_last_error_mut, DefaultIdragraError, IdragraError, IdragraErrorCode};
use std::ffi::CString;
use std::slice;
use tracing::warn;

/// Set the thread-local error message and code.
pub(crate) fn set_last_error(error: &impl IdragraError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Record `error` in thread-local storage and return its code.
#[inline]
pub(crate) fn track_error(error: &impl IdragraError) -> IdragraErrorCode {
    warn!("FFI call failed: {}", error.msg());
    set_last_error(error);
    error.code()
}

/// Clear the thread-local error message and code.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = IdragraErrorCode::Ok;
    });
}

/// Run an FFI body, translating its result into an error code and the
/// thread-local error state.
pub(crate) fn handle_ffi_result<F>(body: F) -> IdragraErrorCode
where
    F: FnOnce() -> Result<(), DefaultIdragraError>,
{
    match body() {
        Ok(()) => {
            clear_last_error();
            IdragraErrorCode::Ok
        }
        Err(error) => track_error(&error),
    }
}

/// Borrow a caller-owned input array.
///
/// A null pointer is accepted only when `len` is 0.
///
/// # Safety
/// When non-null, `ptr` must point to `len` initialized values that stay
/// valid and unmodified for `'a`.
pub(crate) unsafe fn input_slice<'a, T>(
    ptr: *const T,
    len: usize,
    param_name: &str,
) -> Result<&'a [T], DefaultIdragraError> {
    if len == 0 {
        return Ok(&[]);
    }
    if ptr.is_null() {
        return Err(DefaultIdragraError::null_pointer(param_name));
    }
    Ok(unsafe { slice::from_raw_parts(ptr, len) })
}

/// Borrow a caller-owned output buffer.
///
/// # Safety
/// When non-null, `ptr` must point to `len` writable values not aliased by
/// any other slice for `'a`.
pub(crate) unsafe fn output_slice<'a, T>(
    ptr: *mut T,
    len: usize,
    param_name: &str,
) -> Result<&'a mut [T], DefaultIdragraError> {
    if len == 0 {
        return Ok(&mut []);
    }
    if ptr.is_null() {
        return Err(DefaultIdragraError::null_pointer(param_name));
    }
    Ok(unsafe { slice::from_raw_parts_mut(ptr, len) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{idragra_last_error_code, idragra_last_error_message};
    use std::ffi::CStr;

    #[test]
    fn test_error_state_follows_last_call() {
        let code = handle_ffi_result(|| Err(DefaultIdragraError::null_pointer("t_max")));
        assert_eq!(code, IdragraErrorCode::NullPointer);
        assert_eq!(idragra_last_error_code(), IdragraErrorCode::NullPointer);
        let message = unsafe { CStr::from_ptr(idragra_last_error_message()) };
        assert_eq!(message.to_str().unwrap(), "Parameter 't_max' cannot be null");

        assert_eq!(handle_ffi_result(|| Ok(())), IdragraErrorCode::Ok);
        assert!(idragra_last_error_message().is_null());
        assert_eq!(idragra_last_error_code(), IdragraErrorCode::Ok);
    }

    #[test]
    fn test_null_slices() {
        let empty: &[f64] = unsafe { input_slice(std::ptr::null(), 0, "x") }.unwrap();
        assert!(empty.is_empty());
        let err = unsafe { input_slice::<f64>(std::ptr::null(), 3, "x") }.unwrap_err();
        assert_eq!(err.code(), IdragraErrorCode::NullPointer);
        let err = unsafe { output_slice::<f64>(std::ptr::null_mut(), 3, "out") }.unwrap_err();
        assert_eq!(err.code(), IdragraErrorCode::NullPointer);
    }
}
