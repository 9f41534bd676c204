//! Shell shortcut (`.lnk`) creation.
//!
//! [`ShortcutWriter`] runs the creation pipeline against any
//! [`ShellLinkRuntime`]. On Windows the runtime is [`ComRuntime`], and
//! [`create_shortcut`] wires the two together for the common case.

mod request;
mod runtime;
mod writer;

#[cfg(windows)]
mod com;

#[cfg(test)]
pub(crate) mod memory;

pub use request::ShortcutRequest;
pub use runtime::{PersistFile, ShellLinkObject, ShellLinkRuntime};
pub use writer::ShortcutWriter;

#[cfg(windows)]
pub use com::{ComApartment, ComPersistFile, ComRuntime, ComShellLink};

/// Create or overwrite a shortcut at `shortcut_path` that launches
/// `target_path` with `arguments`.
///
/// # Example
///
/// ```no_run
/// # #[cfg(windows)]
/// # fn main() -> Result<(), autolink_core::StageFailure> {
/// use autolink_core::shortcut::create_shortcut;
///
/// create_shortcut(
///     r"C:\Users\me\Desktop\Editor.lnk",
///     r"C:\Program Files\Editor\editor.exe",
///     "--restore-session",
/// )?;
/// # Ok(())
/// # }
/// # #[cfg(not(windows))]
/// # fn main() {}
/// ```
#[cfg(windows)]
pub fn create_shortcut(
    shortcut_path: impl Into<std::path::PathBuf>,
    target_path: impl Into<std::path::PathBuf>,
    arguments: impl Into<std::ffi::OsString>,
) -> Result<(), crate::error::StageFailure> {
    let request = ShortcutRequest::new(shortcut_path, target_path, arguments);
    ShortcutWriter::new(ComRuntime).write(&request)
}
