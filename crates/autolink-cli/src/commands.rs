//! Subcommand implementations, kept apart from argument parsing.

use anyhow::{bail, Context, Result};
use autolink_core::autostart::join_arguments;
use autolink_core::shortcut::ShellLinkRuntime;
use autolink_core::{AutostartApp, ShortcutRequest, ShortcutWriter, Stage, StartupFolder, StatusCode};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Write one shortcut; arguments are quoted and joined into a command line.
#[cfg_attr(not(windows), allow(dead_code))]
pub fn create<R: ShellLinkRuntime>(
    writer: &ShortcutWriter<R>,
    shortcut: &Path,
    target: &Path,
    args: &[String],
) -> Result<()> {
    let arguments = join_arguments(args.iter().map(String::as_str));
    let status = writer.write_status(&ShortcutRequest::new(shortcut, target, arguments));
    if !status.is_success() {
        bail!(
            "cannot create shortcut '{}': {}",
            shortcut.display(),
            decode_status(status).description
        );
    }
    info!("Created {}", shortcut.display());
    Ok(())
}

/// Build the app to register from flags or a JSON description.
pub fn load_app(
    name: Option<String>,
    display_name: Option<String>,
    from: Option<&Path>,
    exec: Vec<String>,
) -> Result<AutostartApp> {
    let mut app = match (from, name) {
        (Some(path), _) => AutostartApp::from_json_file(path)
            .with_context(|| format!("reading app description {}", path.display()))?,
        (None, Some(name)) => AutostartApp::new(name, exec),
        (None, None) => bail!("either --name or --from is required"),
    };
    if display_name.is_some() {
        app.display_name = display_name;
    }
    app.validate()?;
    Ok(app)
}

/// Explicit directory, or the current user's Startup folder.
pub fn resolve_folder(dir: Option<PathBuf>) -> Result<StartupFolder> {
    match dir {
        Some(dir) => Ok(StartupFolder::at(dir)),
        None => Ok(StartupFolder::current_user()?),
    }
}

/// Accepts `0x`-prefixed hex or decimal.
pub fn parse_status(text: &str) -> Result<StatusCode> {
    let text = text.trim();
    let value = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => text.parse::<u64>(),
    }
    .with_context(|| format!("'{}' is not a status code", text))?;
    Ok(StatusCode(value))
}

/// Human and JSON view of a status code.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedStatus {
    pub code: String,
    pub success: bool,
    pub stage: Option<Stage>,
    pub platform_code: Option<String>,
    pub description: String,
}

pub fn decode_status(status: StatusCode) -> DecodedStatus {
    let stage = status.stage();
    let platform_code = status.platform_code();
    let description = match (status.is_success(), stage, platform_code) {
        (true, _, _) => "success".to_string(),
        (false, Some(stage), Some(code)) => format!("{} failed with {}", stage, code),
        _ => format!("unrecognized status {}", status),
    };

    DecodedStatus {
        code: status.to_string(),
        success: status.is_success(),
        stage,
        platform_code: platform_code.map(|code| format!("0x{:08X}", code.as_u32())),
        description,
    }
}
