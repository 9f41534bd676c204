//! Platform-specific path utilities.

use crate::config::ShortcutConfig;
use crate::error::{AutolinkError, Result};
use std::path::PathBuf;

/// Get the per-user Startup folder.
///
/// # Platform Behavior
/// - **Windows**: `%APPDATA%\Microsoft\Windows\Start Menu\Programs\Startup`
/// - **Others**: configuration error; there is no Startup folder
pub fn startup_dir() -> Result<PathBuf> {
    #[cfg(windows)]
    {
        let data_dir = dirs::data_dir().ok_or_else(|| AutolinkError::Config {
            message: "Could not determine app data directory".to_string(),
        })?;
        Ok(ShortcutConfig::STARTUP_SUBDIRS
            .iter()
            .fold(data_dir, |dir, part| dir.join(part)))
    }

    #[cfg(not(windows))]
    {
        Err(AutolinkError::Config {
            message: format!(
                "The Startup folder ({}) only exists on Windows",
                ShortcutConfig::STARTUP_SUBDIRS.join("/")
            ),
        })
    }
}

/// File name of the shortcut for `stem`.
pub fn shortcut_file_name(stem: &str) -> String {
    format!("{}.{}", stem, ShortcutConfig::EXTENSION)
}
