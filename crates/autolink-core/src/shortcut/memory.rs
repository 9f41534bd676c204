//! In-memory shell-link runtime for tests.
//!
//! Links are saved as a two-line text file (`target=`, `arguments=`). Every
//! live apartment, link and persistence handle is counted so tests can check
//! that nothing outlives a call.

use super::runtime::{PersistFile, ShellLinkObject, ShellLinkRuntime};
use crate::status::{PlatformCode, Stage};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub(crate) struct Tracked(Arc<AtomicUsize>);

impl Tracked {
    fn new(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(counter))
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
struct LinkState {
    target: Option<PathBuf>,
    arguments: Option<OsString>,
}

#[derive(Clone, Default)]
pub(crate) struct MemoryRuntime {
    fail_at: Option<(Stage, PlatformCode)>,
    live: Arc<AtomicUsize>,
}

impl MemoryRuntime {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing_at(stage: Stage, code: PlatformCode) -> Self {
        Self {
            fail_at: Some((stage, code)),
            ..Self::default()
        }
    }

    /// Apartments and handles currently alive.
    pub(crate) fn live_handles(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    fn check(&self, stage: Stage) -> Result<(), PlatformCode> {
        match self.fail_at {
            Some((failing, code)) if failing == stage => Err(code),
            _ => Ok(()),
        }
    }
}

pub(crate) struct MemoryLink {
    runtime: MemoryRuntime,
    state: Arc<Mutex<LinkState>>,
    _handle: Tracked,
}

pub(crate) struct MemoryPersist {
    runtime: MemoryRuntime,
    state: Arc<Mutex<LinkState>>,
    _handle: Tracked,
}

impl ShellLinkRuntime for MemoryRuntime {
    type Apartment = Tracked;
    type Link = MemoryLink;

    fn enter(&self) -> Self::Apartment {
        Tracked::new(&self.live)
    }

    fn create_link(&self) -> Result<MemoryLink, PlatformCode> {
        self.check(Stage::Instantiate)?;
        Ok(MemoryLink {
            runtime: self.clone(),
            state: Arc::default(),
            _handle: Tracked::new(&self.live),
        })
    }
}

impl ShellLinkObject for MemoryLink {
    type Persist = MemoryPersist;

    fn set_target(&self, target: &Path) -> Result<(), PlatformCode> {
        self.runtime.check(Stage::SetTarget)?;
        self.state.lock().map_err(|_| PlatformCode::E_FAIL)?.target = Some(target.to_path_buf());
        Ok(())
    }

    fn set_arguments(&self, arguments: &OsStr) -> Result<(), PlatformCode> {
        self.runtime.check(Stage::SetArguments)?;
        self.state.lock().map_err(|_| PlatformCode::E_FAIL)?.arguments =
            Some(arguments.to_os_string());
        Ok(())
    }

    fn persist_file(&self) -> Result<MemoryPersist, PlatformCode> {
        self.runtime.check(Stage::QueryPersist)?;
        Ok(MemoryPersist {
            runtime: self.runtime.clone(),
            state: Arc::clone(&self.state),
            _handle: Tracked::new(&self.runtime.live),
        })
    }
}

impl PersistFile for MemoryPersist {
    fn save(&self, path: &Path) -> Result<(), PlatformCode> {
        self.runtime.check(Stage::Save)?;
        let state = self.state.lock().map_err(|_| PlatformCode::E_FAIL)?;
        let target = state.target.as_deref().unwrap_or(Path::new(""));
        let arguments = state.arguments.as_deref().unwrap_or(OsStr::new(""));
        let contents = format!(
            "target={}\narguments={}\n",
            target.display(),
            arguments.to_string_lossy()
        );
        std::fs::write(path, contents).map_err(PlatformCode::from)
    }
}

/// Read back `(target, arguments)` from a file saved by [`MemoryPersist`].
pub(crate) fn read_link(path: &Path) -> (String, String) {
    let contents = std::fs::read_to_string(path).unwrap();
    let mut target = String::new();
    let mut arguments = String::new();
    for line in contents.lines() {
        if let Some(value) = line.strip_prefix("target=") {
            target = value.to_string();
        } else if let Some(value) = line.strip_prefix("arguments=") {
            arguments = value.to_string();
        }
    }
    (target, arguments)
}
