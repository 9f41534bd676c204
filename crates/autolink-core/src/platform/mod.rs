//! Platform abstraction layer.
//!
//! All `#[cfg]` blocks for OS-specific paths and text handling live here
//! rather than scattered through the shortcut code.
//!
//! - `paths` - Startup folder location
//! - `encoding` - ANSI code page decoding (Windows only)

#[cfg(windows)]
pub mod encoding;
pub mod paths;

pub use paths::startup_dir;

#[cfg(windows)]
pub use encoding::ansi_to_os_string;

/// Returns the current platform name.
pub fn current_platform() -> &'static str {
    #[cfg(target_os = "windows")]
    {
        "windows"
    }
    #[cfg(target_os = "linux")]
    {
        "linux"
    }
    #[cfg(target_os = "macos")]
    {
        "macos"
    }
    #[cfg(not(any(target_os = "linux", target_os = "windows", target_os = "macos")))]
    {
        "unknown"
    }
}

/// Returns true if shell links can be written on this platform.
pub fn supports_shell_links() -> bool {
    cfg!(windows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_platform() {
        let platform = current_platform();
        assert!(["linux", "windows", "macos", "unknown"].contains(&platform));
    }

    #[test]
    fn test_supports_shell_links() {
        assert_eq!(supports_shell_links(), current_platform() == "windows");
    }
}
