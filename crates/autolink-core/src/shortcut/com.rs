//! COM implementation of the shell-link runtime.
//!
//! Uses `CLSID_ShellLink` through `IShellLinkW` and saves it with
//! `IPersistFile`. The `windows` interface wrappers release on `Drop`.

#![allow(unsafe_code)]

use super::runtime::{PersistFile, ShellLinkObject, ShellLinkRuntime};
use crate::status::PlatformCode;
use std::ffi::OsStr;
use std::marker::PhantomData;
use std::path::Path;
use tracing::{debug, warn};
use windows::core::{Interface, HSTRING};
use windows::Win32::Foundation::{FALSE, RPC_E_CHANGED_MODE};
use windows::Win32::System::Com::{
    CoCreateInstance, CoInitializeEx, CoUninitialize, IPersistFile, CLSCTX_INPROC_SERVER,
    COINIT_MULTITHREADED,
};
use windows::Win32::UI::Shell::{IShellLinkW, ShellLink};

/// Per-thread COM initialization, undone when dropped.
///
/// Only an apartment whose `CoInitializeEx` succeeded (`S_OK` or `S_FALSE`)
/// calls `CoUninitialize`. A thread that already lives in a single-threaded
/// apartment keeps it and is left untouched.
pub struct ComApartment {
    initialized: bool,
    // COM initialization is per thread; the guard must not move threads.
    _not_send: PhantomData<*const ()>,
}

impl ComApartment {
    pub fn enter() -> Self {
        // SAFETY: the reserved pointer must be null; the matching
        // CoUninitialize runs in Drop on this same thread.
        let hr = unsafe { CoInitializeEx(None, COINIT_MULTITHREADED) };
        let initialized = if hr.is_ok() {
            true
        } else if hr == RPC_E_CHANGED_MODE {
            debug!("Thread already in a single-threaded apartment, reusing it");
            false
        } else {
            warn!("CoInitializeEx failed: {}", PlatformCode(hr.0));
            false
        };

        Self {
            initialized,
            _not_send: PhantomData,
        }
    }

    /// Whether dropping this guard will call `CoUninitialize`.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

impl Drop for ComApartment {
    fn drop(&mut self) {
        if self.initialized {
            // SAFETY: balances the successful CoInitializeEx in `enter`; the
            // guard is !Send so this is the initializing thread.
            unsafe { CoUninitialize() };
        }
    }
}

/// Shell links backed by the Windows shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComRuntime;

impl ShellLinkRuntime for ComRuntime {
    type Apartment = ComApartment;
    type Link = ComShellLink;

    fn enter(&self) -> ComApartment {
        ComApartment::enter()
    }

    fn create_link(&self) -> Result<ComShellLink, PlatformCode> {
        // SAFETY: plain in-process activation with no outer unknown.
        let link: IShellLinkW =
            unsafe { CoCreateInstance(&ShellLink, None, CLSCTX_INPROC_SERVER) }?;
        Ok(ComShellLink { link })
    }
}

pub struct ComShellLink {
    link: IShellLinkW,
}

impl ShellLinkObject for ComShellLink {
    type Persist = ComPersistFile;

    fn set_target(&self, target: &Path) -> Result<(), PlatformCode> {
        let target = HSTRING::from(target);
        // SAFETY: `target` is a NUL-terminated wide string that outlives the call.
        unsafe { self.link.SetPath(&target) }?;
        Ok(())
    }

    fn set_arguments(&self, arguments: &OsStr) -> Result<(), PlatformCode> {
        let arguments = HSTRING::from(arguments);
        // SAFETY: as above.
        unsafe { self.link.SetArguments(&arguments) }?;
        Ok(())
    }

    fn persist_file(&self) -> Result<ComPersistFile, PlatformCode> {
        let file = self.link.cast::<IPersistFile>()?;
        Ok(ComPersistFile { file })
    }
}

pub struct ComPersistFile {
    file: IPersistFile,
}

impl PersistFile for ComPersistFile {
    fn save(&self, path: &Path) -> Result<(), PlatformCode> {
        let path = HSTRING::from(path);
        // SAFETY: `path` outlives the call; FALSE keeps the object's current
        // file unchanged.
        unsafe { self.file.Save(&path, FALSE) }?;
        Ok(())
    }
}
