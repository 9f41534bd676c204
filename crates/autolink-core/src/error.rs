//! Error types for autolink.
//!
//! Two layers of errors live here:
//! - [`StageFailure`] is what the shortcut pipeline returns. It carries the
//!   stage that failed and the raw platform code, and maps one-to-one onto the
//!   numeric status channel in [`crate::status`].
//! - [`AutolinkError`] is the general error for everything built around the
//!   pipeline (startup folder lookup, app validation, JSON descriptions).

use crate::status::{PlatformCode, Stage, StatusCode};
use std::path::PathBuf;
use thiserror::Error;

/// A failed shortcut write: which stage stopped the pipeline, and why.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{stage} failed with {code}")]
pub struct StageFailure {
    pub stage: Stage,
    pub code: PlatformCode,
}

impl StageFailure {
    pub fn new(stage: Stage, code: PlatformCode) -> Self {
        Self { stage, code }
    }

    /// Composite status code for this failure.
    pub fn status(&self) -> StatusCode {
        StatusCode::failure(self.stage, self.code)
    }
}

/// Main error type for autolink.
#[derive(Debug, Error)]
pub enum AutolinkError {
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Validation error for {field}: {message}")]
    Validation { field: String, message: String },

    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    #[error("autostart: cannot create shortcut '{}' error code: {status}", path.display())]
    ShortcutFailed {
        path: PathBuf,
        status: StatusCode,
        #[source]
        source: StageFailure,
    },

    #[error("{0}")]
    Other(String),
}

/// Result type alias for autolink operations.
pub type Result<T> = std::result::Result<T, AutolinkError>;

impl From<std::io::Error> for AutolinkError {
    fn from(err: std::io::Error) -> Self {
        AutolinkError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for AutolinkError {
    fn from(err: serde_json::Error) -> Self {
        AutolinkError::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl AutolinkError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        AutolinkError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Wrap a pipeline failure for the shortcut at `path`.
    pub fn shortcut_failed(path: impl Into<PathBuf>, failure: StageFailure) -> Self {
        AutolinkError::ShortcutFailed {
            path: path.into(),
            status: failure.status(),
            source: failure,
        }
    }

    /// Numeric status code, when this error came out of the pipeline.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            AutolinkError::ShortcutFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_failure_display() {
        let failure = StageFailure::new(Stage::Save, PlatformCode(0x8007_0003_u32 as i32));
        assert_eq!(failure.to_string(), "save to disk failed with HRESULT 0x80070003");
    }

    #[test]
    fn test_shortcut_failed_message_matches_autostart_format() {
        let failure = StageFailure::new(Stage::Save, PlatformCode(0x8007_0005_u32 as i32));
        let err = AutolinkError::shortcut_failed(PathBuf::from("Startup/app.lnk"), failure);

        assert_eq!(
            err.to_string(),
            "autostart: cannot create shortcut 'Startup/app.lnk' error code: 0x05070005"
        );
        assert_eq!(err.status(), Some(StatusCode(0x0507_0005)));
    }

    #[test]
    fn test_io_error_keeps_path() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = AutolinkError::io_with_path(io, "/nowhere");
        match err {
            AutolinkError::Io { path, .. } => assert_eq!(path, Some(PathBuf::from("/nowhere"))),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(AutolinkError::Other("x".into()).status().is_none());
    }
}
