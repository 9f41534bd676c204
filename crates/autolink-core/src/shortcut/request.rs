//! Inputs of one shortcut write.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Destination, target and arguments of a shortcut.
///
/// Nothing is validated here. A bad destination only shows up as a save
/// failure, and the target is never checked for existence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutRequest {
    shortcut_path: PathBuf,
    target_path: PathBuf,
    arguments: OsString,
}

impl ShortcutRequest {
    /// # Arguments
    ///
    /// * `shortcut_path` - Destination file, including the `.lnk` extension
    /// * `target_path` - Program launched when the shortcut is activated
    /// * `arguments` - Command line passed to the program, possibly empty
    pub fn new(
        shortcut_path: impl Into<PathBuf>,
        target_path: impl Into<PathBuf>,
        arguments: impl Into<OsString>,
    ) -> Self {
        Self {
            shortcut_path: shortcut_path.into(),
            target_path: target_path.into(),
            arguments: arguments.into(),
        }
    }

    pub fn shortcut_path(&self) -> &Path {
        &self.shortcut_path
    }

    pub fn target_path(&self) -> &Path {
        &self.target_path
    }

    pub fn arguments(&self) -> &OsStr {
        &self.arguments
    }
}
