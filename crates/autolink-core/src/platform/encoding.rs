//! Narrow (ANSI code page) to wide text conversion.
//!
//! The C entry point receives `char*` strings in the active code page. They
//! are decoded with `MultiByteToWideChar(CP_ACP)` into an exactly sized
//! buffer, so long paths are never truncated here; the shell applies its own
//! path limits when the shortcut is saved.

#![allow(unsafe_code)]

use crate::status::PlatformCode;
use std::ffi::OsString;
use std::os::windows::ffi::OsStringExt;
use std::ptr;
use windows_sys::Win32::Foundation::{GetLastError, ERROR_INVALID_PARAMETER};
use windows_sys::Win32::Globalization::{MultiByteToWideChar, CP_ACP};

/// Decode `bytes` (no trailing NUL) from the active ANSI code page.
pub fn ansi_to_os_string(bytes: &[u8]) -> Result<OsString, PlatformCode> {
    if bytes.is_empty() {
        return Ok(OsString::new());
    }
    let len = i32::try_from(bytes.len())
        .map_err(|_| PlatformCode::from_win32(ERROR_INVALID_PARAMETER))?;

    // SAFETY: `bytes` is valid for `len` bytes; a null output buffer with
    // size 0 asks only for the required length.
    let needed = unsafe { MultiByteToWideChar(CP_ACP, 0, bytes.as_ptr(), len, ptr::null_mut(), 0) };
    if needed <= 0 {
        return Err(last_error());
    }

    let mut wide = vec![0u16; needed as usize];
    // SAFETY: `wide` holds exactly `needed` u16 slots.
    let written =
        unsafe { MultiByteToWideChar(CP_ACP, 0, bytes.as_ptr(), len, wide.as_mut_ptr(), needed) };
    if written <= 0 {
        return Err(last_error());
    }
    wide.truncate(written as usize);

    Ok(OsString::from_wide(&wide))
}

fn last_error() -> PlatformCode {
    // SAFETY: reads the calling thread's last-error value.
    let code = unsafe { GetLastError() };
    PlatformCode::from_win32(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_path() {
        let decoded = ansi_to_os_string(br"C:\Tools\app.exe").unwrap();
        assert_eq!(decoded, OsString::from(r"C:\Tools\app.exe"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(ansi_to_os_string(b"").unwrap(), OsString::new());
    }

    #[test]
    fn test_long_path_not_truncated() {
        let long = format!(r"C:\{}\app.lnk", "d".repeat(600));
        let decoded = ansi_to_os_string(long.as_bytes()).unwrap();
        assert_eq!(decoded.len(), long.len());
    }
}
