//! Start-on-login registration through the per-user Startup folder.
//!
//! Windows launches every shortcut in the Startup folder when the user logs
//! in. An [`AutostartApp`] is registered by writing `<name>.lnk` there.

use crate::config::ShortcutConfig;
use crate::error::{AutolinkError, Result};
use crate::platform::paths::{shortcut_file_name, startup_dir};
use crate::shortcut::{ShellLinkRuntime, ShortcutRequest, ShortcutWriter};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// An application that will be started when the user logs in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutostartApp {
    /// Unique identifier; also the shortcut's file stem.
    pub name: String,
    /// The program to execute, followed by its arguments.
    pub exec: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Accepted for compatibility with other autostart backends; the
    /// shortcut itself is written without an icon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl AutostartApp {
    pub fn new<I, S>(name: impl Into<String>, exec: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            exec: exec.into_iter().map(Into::into).collect(),
            display_name: None,
            icon: None,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Load an app description from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|e| AutolinkError::io_with_path(e, path))?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Program to launch.
    pub fn program(&self) -> Option<&str> {
        self.exec.first().map(String::as_str)
    }

    /// Everything after the program, joined into one Windows command line.
    pub fn arguments(&self) -> String {
        join_arguments(self.exec.iter().skip(1).map(String::as_str))
    }

    /// Check the app can be turned into a shortcut.
    pub fn validate(&self) -> Result<()> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AutolinkError::Validation {
                field: "name".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if name == "." || name == ".." || self.name.contains(ShortcutConfig::FORBIDDEN_NAME_CHARS)
        {
            return Err(AutolinkError::Validation {
                field: "name".to_string(),
                message: format!("'{}' is not a valid file name", self.name),
            });
        }
        match self.program() {
            Some(program) if !program.trim().is_empty() => Ok(()),
            _ => Err(AutolinkError::Validation {
                field: "exec".to_string(),
                message: "must start with the program to launch".to_string(),
            }),
        }
    }
}

/// Quote one argument the way `CommandLineToArgvW` splits it back.
pub fn quote_argument(arg: &str) -> String {
    if !arg.is_empty() && !arg.contains([' ', '\t', '\n', '\x0b', '"']) {
        return arg.to_string();
    }

    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('"');
    let mut backslashes = 0;
    for c in arg.chars() {
        match c {
            '\\' => backslashes += 1,
            '"' => {
                // Escape the pending backslashes and the quote itself.
                quoted.extend(std::iter::repeat('\\').take(backslashes * 2 + 1));
                quoted.push('"');
                backslashes = 0;
            }
            _ => {
                quoted.extend(std::iter::repeat('\\').take(backslashes));
                quoted.push(c);
                backslashes = 0;
            }
        }
    }
    // Trailing backslashes precede the closing quote.
    quoted.extend(std::iter::repeat('\\').take(backslashes * 2));
    quoted.push('"');
    quoted
}

/// Join arguments with spaces, quoting where needed.
pub fn join_arguments<'a>(args: impl IntoIterator<Item = &'a str>) -> String {
    args.into_iter()
        .map(quote_argument)
        .collect::<Vec<_>>()
        .join(" ")
}

/// A directory whose shortcuts are launched at login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupFolder {
    dir: PathBuf,
}

impl StartupFolder {
    /// The current user's Startup folder.
    pub fn current_user() -> Result<Self> {
        Ok(Self { dir: startup_dir()? })
    }

    /// Use an explicit directory.
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where the shortcut for `app` lives.
    pub fn shortcut_path(&self, app: &AutostartApp) -> PathBuf {
        self.dir.join(shortcut_file_name(&app.name))
    }

    /// Whether a shortcut for `app` exists. Its contents are not read.
    pub fn is_registered(&self, app: &AutostartApp) -> bool {
        self.shortcut_path(app).exists()
    }

    /// Write the shortcut for `app`, creating the folder if needed.
    ///
    /// Returns the shortcut path.
    pub fn register<R: ShellLinkRuntime>(
        &self,
        app: &AutostartApp,
        writer: &ShortcutWriter<R>,
    ) -> Result<PathBuf> {
        app.validate()?;

        fs::create_dir_all(&self.dir).map_err(|e| AutolinkError::io_with_path(e, &self.dir))?;

        let path = self.shortcut_path(app);
        let program = app.program().unwrap_or_default();
        let arguments = app.arguments();
        debug!("Registering {} as {} {}", app.name, program, arguments);

        let request = ShortcutRequest::new(&path, program, arguments);
        writer
            .write(&request)
            .map_err(|failure| AutolinkError::shortcut_failed(&path, failure))?;

        info!(
            "Registered {} for autostart at {}",
            app.display_name.as_deref().unwrap_or(&app.name),
            path.display()
        );
        Ok(path)
    }
}

/// Register `app` in the current user's Startup folder.
#[cfg(windows)]
pub fn enable(app: &AutostartApp) -> Result<PathBuf> {
    let writer = ShortcutWriter::new(crate::shortcut::ComRuntime);
    StartupFolder::current_user()?.register(app, &writer)
}

/// Whether `app` is registered in the current user's Startup folder.
pub fn is_enabled(app: &AutostartApp) -> Result<bool> {
    Ok(StartupFolder::current_user()?.is_registered(app))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shortcut::memory::{read_link, MemoryRuntime};
    use crate::status::{PlatformCode, Stage, StatusCode};
    use tempfile::TempDir;

    fn app() -> AutostartApp {
        AutostartApp::new("tray-agent", [r"C:\Apps\agent.exe", "--minimized", "--profile", "Work Laptop"])
    }

    #[test]
    fn test_quote_argument() {
        assert_eq!(quote_argument("--flag"), "--flag");
        assert_eq!(quote_argument(""), "\"\"");
        assert_eq!(quote_argument("two words"), "\"two words\"");
        assert_eq!(quote_argument(r#"say "hi""#), r#""say \"hi\"""#);
        assert_eq!(quote_argument(r"C:\Program Files\"), r#""C:\Program Files\\""#);
        assert_eq!(quote_argument(r"C:\plain\path"), r"C:\plain\path");
    }

    #[test]
    fn test_arguments_skip_program() {
        assert_eq!(app().arguments(), r#"--minimized --profile "Work Laptop""#);
        assert_eq!(AutostartApp::new("x", ["x.exe"]).arguments(), "");
    }

    #[test]
    fn test_validate() {
        assert!(app().validate().is_ok());
        assert!(AutostartApp::new("", ["a.exe"]).validate().is_err());
        assert!(AutostartApp::new("a/b", ["a.exe"]).validate().is_err());
        assert!(AutostartApp::new("..", ["a.exe"]).validate().is_err());
        assert!(AutostartApp::new("a", Vec::<String>::new()).validate().is_err());
        assert!(AutostartApp::new("a", [" "]).validate().is_err());
    }

    #[test]
    fn test_register_writes_named_shortcut() {
        let temp_dir = TempDir::new().unwrap();
        let folder = StartupFolder::at(temp_dir.path().join("Startup"));
        let writer = ShortcutWriter::new(MemoryRuntime::new());

        assert!(!folder.is_registered(&app()));
        let path = folder.register(&app(), &writer).unwrap();

        assert_eq!(path, temp_dir.path().join("Startup").join("tray-agent.lnk"));
        assert!(folder.is_registered(&app()));
        let (target, arguments) = read_link(&path);
        assert_eq!(target, r"C:\Apps\agent.exe");
        assert_eq!(arguments, r#"--minimized --profile "Work Laptop""#);
    }

    #[test]
    fn test_register_rejects_invalid_app_before_touching_disk() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("Startup");
        let folder = StartupFolder::at(&dir);
        let writer = ShortcutWriter::new(MemoryRuntime::new());

        let err = folder
            .register(&AutostartApp::new("bad", Vec::<String>::new()), &writer)
            .unwrap_err();

        assert!(matches!(err, AutolinkError::Validation { .. }));
        assert!(!dir.exists());
    }

    #[test]
    fn test_register_reports_status_code() {
        let temp_dir = TempDir::new().unwrap();
        let folder = StartupFolder::at(temp_dir.path());
        let writer =
            ShortcutWriter::new(MemoryRuntime::failing_at(Stage::Save, PlatformCode::from_win32(5)));

        let err = folder.register(&app(), &writer).unwrap_err();

        assert_eq!(err.status(), Some(StatusCode(0x0507_0005)));
        assert!(err.to_string().starts_with("autostart: cannot create shortcut '"));
        assert!(err.to_string().ends_with("tray-agent.lnk' error code: 0x05070005"));
    }

    #[test]
    fn test_app_from_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.json");
        fs::write(
            &path,
            r#"{"name":"sync","exec":["sync.exe","--background"],"displayName":"Sync"}"#,
        )
        .unwrap();

        let app = AutostartApp::from_json_file(&path).unwrap();

        assert_eq!(app.name, "sync");
        assert_eq!(app.program(), Some("sync.exe"));
        assert_eq!(app.display_name.as_deref(), Some("Sync"));
        assert!(app.icon.is_none());
    }

    #[test]
    fn test_app_from_missing_json_keeps_path() {
        let err = AutostartApp::from_json_file(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, AutolinkError::Io { path: Some(_), .. }));
    }
}
