//! C ABI for the autolink shortcut writer.
//!
//! Exports one symbol for autostart libraries written in other languages:
//!
//! ```c
//! uint64_t CreateShortcut(char *shortcut, char *path, char *args);
//! ```
//!
//! All three strings are NUL-terminated and encoded in the active ANSI code
//! page. The return value is `0` on success, otherwise a stage marker in bits
//! 24..31 over the low 24 bits of the failing `HRESULT` (see
//! `autolink_core::status`).
//!
//! On platforms other than Windows this crate exports nothing.

#![allow(unsafe_code)]

#[cfg(windows)]
mod abi {
    use autolink_core::platform::ansi_to_os_string;
    use autolink_core::{
        ComRuntime, PlatformCode, ShortcutRequest, ShortcutWriter, Stage, StageFailure, StatusCode,
    };
    use std::ffi::{c_char, CStr, OsString};
    use tracing::debug;

    /// Create or overwrite a shortcut from ANSI strings.
    ///
    /// A string that cannot be decoded fails at the stage that consumes it:
    /// the target at [`Stage::SetTarget`], the arguments at
    /// [`Stage::SetArguments`], the shortcut path at [`Stage::Save`].
    pub fn create_shortcut_from_ansi(shortcut: &CStr, path: &CStr, args: &CStr) -> StatusCode {
        StatusCode::from(write_ansi(
            Some(shortcut),
            Some(path),
            Some(args),
        ))
    }

    fn write_ansi(
        shortcut: Option<&CStr>,
        path: Option<&CStr>,
        args: Option<&CStr>,
    ) -> Result<(), StageFailure> {
        let target = decode(path, Stage::SetTarget)?;
        let arguments = decode(args, Stage::SetArguments)?;
        let shortcut = decode(shortcut, Stage::Save)?;
        debug!("CreateShortcut {:?} -> {:?}", shortcut, target);

        let request = ShortcutRequest::new(shortcut, target, arguments);
        ShortcutWriter::new(ComRuntime).write(&request)
    }

    fn decode(text: Option<&CStr>, stage: Stage) -> Result<OsString, StageFailure> {
        let text = text.ok_or(StageFailure::new(stage, PlatformCode::E_POINTER))?;
        ansi_to_os_string(text.to_bytes()).map_err(|code| StageFailure::new(stage, code))
    }

    /// # Safety
    ///
    /// Each pointer must be null or point to a NUL-terminated string that
    /// stays valid for the duration of the call.
    unsafe fn borrow<'a>(ptr: *const c_char) -> Option<&'a CStr> {
        if ptr.is_null() {
            None
        } else {
            // SAFETY: non-null and NUL-terminated per the caller's contract.
            Some(unsafe { CStr::from_ptr(ptr) })
        }
    }

    /// Create or overwrite the shortcut `shortcut` launching `path` with `args`.
    ///
    /// Returns `0` on success or a composite status code.
    ///
    /// # Safety
    ///
    /// Each argument must be null or point to a NUL-terminated string that
    /// stays valid for the duration of the call. Null arguments fail with
    /// `E_POINTER` at the stage that would consume them.
    #[no_mangle]
    #[allow(non_snake_case)]
    pub unsafe extern "C" fn CreateShortcut(
        shortcut: *const c_char,
        path: *const c_char,
        args: *const c_char,
    ) -> u64 {
        // SAFETY: forwarded from this function's contract.
        let (shortcut, path, args) = unsafe { (borrow(shortcut), borrow(path), borrow(args)) };
        StatusCode::from(write_ansi(shortcut, path, args)).into()
    }
}

#[cfg(windows)]
pub use abi::{create_shortcut_from_ansi, CreateShortcut};
