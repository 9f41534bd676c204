//! Centralized configuration for autolink.
//!
//! Constants for shortcut naming, status code layout and logging.

/// Shortcut file naming and startup folder layout.
pub struct ShortcutConfig;

impl ShortcutConfig {
    /// Extension of shell link files.
    pub const EXTENSION: &'static str = "lnk";
    /// Startup folder, relative to the roaming application data directory.
    pub const STARTUP_SUBDIRS: [&'static str; 5] =
        ["Microsoft", "Windows", "Start Menu", "Programs", "Startup"];
    /// Characters rejected in autostart app names (they become file names).
    pub const FORBIDDEN_NAME_CHARS: &'static [char] =
        &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];
}

/// Layout of the composite status code.
pub struct StatusConfig;

impl StatusConfig {
    pub const STAGE_SHIFT: u32 = 24;
    pub const PLATFORM_CODE_MASK: u64 = 0x00FF_FFFF;
}

/// Logging configuration.
pub struct LoggingConfig;

impl LoggingConfig {
    /// Environment variable holding a `tracing` filter directive.
    pub const ENV_FILTER_VAR: &'static str = "AUTOLINK_LOG";
}
