//! The shell-link object model the writer drives.
//!
//! On Windows these are implemented over COM (see `com.rs`). Every handle is
//! released by `Drop`, so dropping a value is the only release the writer
//! ever performs.

use crate::status::PlatformCode;
use std::ffi::OsStr;
use std::path::Path;

/// Factory for shell-link objects, scoped to the calling thread.
pub trait ShellLinkRuntime {
    /// Guard that keeps the component runtime alive for one call.
    type Apartment;
    type Link: ShellLinkObject;

    /// Enter the runtime on the calling thread.
    ///
    /// Failing to enter is not reported here: a runtime that is not usable
    /// makes [`create_link`](Self::create_link) fail instead.
    fn enter(&self) -> Self::Apartment;

    /// Instantiate a fresh shell-link object.
    fn create_link(&self) -> Result<Self::Link, PlatformCode>;
}

/// An in-memory shell link, not yet saved.
pub trait ShellLinkObject {
    type Persist: PersistFile;

    fn set_target(&self, target: &Path) -> Result<(), PlatformCode>;

    fn set_arguments(&self, arguments: &OsStr) -> Result<(), PlatformCode>;

    /// Acquire the persistence interface of this same object.
    fn persist_file(&self) -> Result<Self::Persist, PlatformCode>;
}

/// Serializes a shell link to a file.
pub trait PersistFile {
    /// Save to `path` without making it the object's current file.
    fn save(&self, path: &Path) -> Result<(), PlatformCode>;
}
