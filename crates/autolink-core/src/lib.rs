//! Windows shell shortcut writer for start-on-login registration.
//!
//! The core operation writes a `.lnk` file that launches a target program
//! with an argument string. It runs as five gated steps (instantiate, set
//! target, set arguments, acquire persistence, save) and reports failures
//! either as a [`StageFailure`] or as the composite [`StatusCode`] used by
//! the C entry point.
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(windows)]
//! # fn main() -> autolink_core::Result<()> {
//! use autolink_core::{autostart, AutostartApp};
//!
//! let app = AutostartApp::new("syncd", [r"C:\Tools\syncd.exe", "--background"]);
//! let path = autostart::enable(&app)?;
//! println!("registered at {}", path.display());
//! # Ok(())
//! # }
//! # #[cfg(not(windows))]
//! # fn main() {}
//! ```

pub mod autostart;
pub mod config;
pub mod error;
pub mod platform;
pub mod shortcut;
pub mod status;

// Re-exports
pub use autostart::{AutostartApp, StartupFolder};
pub use error::{AutolinkError, Result, StageFailure};
pub use shortcut::{ShortcutRequest, ShortcutWriter};
pub use status::{PlatformCode, Stage, StatusCode};

#[cfg(windows)]
pub use shortcut::{create_shortcut, ComRuntime};
