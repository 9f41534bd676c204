//! Composite status codes.
//!
//! The C entry point reports its outcome through a single `u64`. Zero means
//! success. A failure puts the stage marker in bits 24..31 and the low 24
//! bits of the platform `HRESULT` underneath it, so a caller can tell which
//! step failed and why from one number:
//!
//! | Stage                             | Marker       |
//! |-----------------------------------|--------------|
//! | Component instantiation failed    | `0x01000000` |
//! | Target path assignment failed     | `0x02000000` |
//! | Arguments assignment failed       | `0x03000000` |
//! | File-interface acquisition failed | `0x04000000` |
//! | Save failed                       | `0x05000000` |

use crate::config::StatusConfig;
use crate::error::StageFailure;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pipeline step that can fail, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Instantiate,
    SetTarget,
    SetArguments,
    QueryPersist,
    Save,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::Instantiate,
        Stage::SetTarget,
        Stage::SetArguments,
        Stage::QueryPersist,
        Stage::Save,
    ];

    /// High-order tag stored in bits 24..31 of the status code.
    pub const fn tag(self) -> u8 {
        match self {
            Stage::Instantiate => 0x01,
            Stage::SetTarget => 0x02,
            Stage::SetArguments => 0x03,
            Stage::QueryPersist => 0x04,
            Stage::Save => 0x05,
        }
    }

    /// The tag shifted into place.
    pub const fn marker(self) -> u64 {
        (self.tag() as u64) << StatusConfig::STAGE_SHIFT
    }

    pub fn from_tag(tag: u8) -> Option<Stage> {
        Stage::ALL.into_iter().find(|stage| stage.tag() == tag)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Instantiate => "component instantiation",
            Stage::SetTarget => "target path assignment",
            Stage::SetArguments => "arguments assignment",
            Stage::QueryPersist => "file interface acquisition",
            Stage::Save => "save to disk",
        };
        f.write_str(name)
    }
}

/// A raw `HRESULT` as returned by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlatformCode(pub i32);

impl PlatformCode {
    pub const E_POINTER: PlatformCode = PlatformCode(0x8000_4003_u32 as i32);
    pub const E_FAIL: PlatformCode = PlatformCode(0x8000_4005_u32 as i32);
    pub const E_INVALIDARG: PlatformCode = PlatformCode(0x8007_0057_u32 as i32);

    /// `HRESULT_FROM_WIN32`.
    pub const fn from_win32(error: u32) -> PlatformCode {
        if error as i32 <= 0 {
            PlatformCode(error as i32)
        } else {
            PlatformCode(((error & 0x0000_FFFF) | (7 << 16) | 0x8000_0000) as i32)
        }
    }

    pub const fn is_failure(self) -> bool {
        self.0 < 0
    }

    pub const fn as_u32(self) -> u32 {
        self.0 as u32
    }
}

impl fmt::Display for PlatformCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HRESULT 0x{:08X}", self.as_u32())
    }
}

impl From<std::io::Error> for PlatformCode {
    fn from(err: std::io::Error) -> Self {
        match err.raw_os_error() {
            Some(code) => PlatformCode::from_win32(code as u32),
            None => PlatformCode::E_FAIL,
        }
    }
}

#[cfg(windows)]
impl From<windows::core::Error> for PlatformCode {
    fn from(err: windows::core::Error) -> Self {
        PlatformCode(err.code().0)
    }
}

/// The numeric outcome of one shortcut write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusCode(pub u64);

impl StatusCode {
    pub const SUCCESS: StatusCode = StatusCode(0);

    pub const fn failure(stage: Stage, code: PlatformCode) -> StatusCode {
        StatusCode(stage.marker() | (code.as_u32() as u64 & StatusConfig::PLATFORM_CODE_MASK))
    }

    pub const fn is_success(self) -> bool {
        self.0 == 0
    }

    /// Failing stage, if this is a well-formed failure code.
    pub fn stage(self) -> Option<Stage> {
        if self.0 >> 32 != 0 {
            return None;
        }
        Stage::from_tag((self.0 >> StatusConfig::STAGE_SHIFT) as u8)
    }

    /// Platform code carried below the marker.
    ///
    /// Only the low 24 bits survive encoding; the severity bit is restored
    /// because every encoded code is a failure.
    pub fn platform_code(self) -> Option<PlatformCode> {
        self.stage()?;
        let low = (self.0 & StatusConfig::PLATFORM_CODE_MASK) as u32;
        Some(PlatformCode((0x8000_0000 | low) as i32))
    }

    /// Decode back into the pipeline result.
    ///
    /// Codes that are neither zero nor a known stage come back as `Err(None)`.
    pub fn into_result(self) -> Result<(), Option<StageFailure>> {
        if self.is_success() {
            return Ok(());
        }
        match (self.stage(), self.platform_code()) {
            (Some(stage), Some(code)) => Err(Some(StageFailure::new(stage, code))),
            _ => Err(None),
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

impl<E> From<Result<(), E>> for StatusCode
where
    E: Into<StageFailure>,
{
    fn from(result: Result<(), E>) -> Self {
        match result {
            Ok(()) => StatusCode::SUCCESS,
            Err(err) => err.into().status(),
        }
    }
}

impl From<StatusCode> for u64 {
    fn from(status: StatusCode) -> Self {
        status.0
    }
}
