//! The shortcut pipeline.
//!
//! One call runs five gated steps and stops at the first failure:
//! instantiate, set target, set arguments, acquire the persistence interface,
//! save. Handles are plain locals, so every exit path releases whatever was
//! acquired, newest first, and leaves the runtime apartment last.

use super::request::ShortcutRequest;
use super::runtime::{PersistFile, ShellLinkObject, ShellLinkRuntime};
use crate::error::StageFailure;
use crate::status::{PlatformCode, Stage, StatusCode};
use tracing::{debug, warn};

/// Writes shell-link files through a [`ShellLinkRuntime`].
///
/// The writer holds no per-call state. Concurrent writes to different
/// destinations are independent; writes to the same destination race and
/// the last save wins.
#[derive(Debug, Clone, Default)]
pub struct ShortcutWriter<R> {
    runtime: R,
}

impl<R: ShellLinkRuntime> ShortcutWriter<R> {
    pub fn new(runtime: R) -> Self {
        Self { runtime }
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    /// Create or overwrite the shortcut described by `request`.
    pub fn write(&self, request: &ShortcutRequest) -> Result<(), StageFailure> {
        // Declared first so it drops after every handle below.
        let _apartment = self.runtime.enter();

        let link = self
            .runtime
            .create_link()
            .map_err(|code| stage_failed(Stage::Instantiate, code, request))?;

        link.set_target(request.target_path())
            .map_err(|code| stage_failed(Stage::SetTarget, code, request))?;

        link.set_arguments(request.arguments())
            .map_err(|code| stage_failed(Stage::SetArguments, code, request))?;

        let file = link
            .persist_file()
            .map_err(|code| stage_failed(Stage::QueryPersist, code, request))?;

        file.save(request.shortcut_path())
            .map_err(|code| stage_failed(Stage::Save, code, request))?;

        debug!(
            "Wrote shortcut {} -> {}",
            request.shortcut_path().display(),
            request.target_path().display()
        );
        Ok(())
    }

    /// Same as [`write`](Self::write), collapsed into the numeric status.
    pub fn write_status(&self, request: &ShortcutRequest) -> StatusCode {
        StatusCode::from(self.write(request))
    }
}

fn stage_failed(stage: Stage, code: PlatformCode, request: &ShortcutRequest) -> StageFailure {
    let failure = StageFailure::new(stage, code);
    warn!(
        "Shortcut {} failed at {}: {} (status {})",
        request.shortcut_path().display(),
        stage,
        code,
        failure.status()
    );
    failure
}
