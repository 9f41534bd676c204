//! autolink - create Windows shortcuts and register apps to start at login.

mod commands;

use anyhow::Result;
use autolink_core::config::LoggingConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "autolink")]
#[command(about = "Create Windows shortcuts and start-on-login entries")]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create or overwrite a shortcut
    Create {
        /// Shortcut file to write (including .lnk)
        shortcut: PathBuf,

        /// Program the shortcut launches
        target: PathBuf,

        /// Arguments passed to the program
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Register an application to start at login
    Enable {
        /// Unique app name, used as the shortcut file name
        #[arg(long, required_unless_present = "from")]
        name: Option<String>,

        /// Human-readable name
        #[arg(long)]
        display_name: Option<String>,

        /// Read the app description from a JSON file
        #[arg(long, conflicts_with = "name")]
        from: Option<PathBuf>,

        /// Startup folder (defaults to the current user's)
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Program followed by its arguments
        #[arg(last = true)]
        exec: Vec<String>,
    },

    /// Check whether an application is registered
    Status {
        #[arg(long)]
        name: String,

        /// Startup folder (defaults to the current user's)
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Explain a status code returned by CreateShortcut
    Decode {
        /// Hex (0x...) or decimal code
        code: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries command output.
    let default_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env(LoggingConfig::ENV_FILTER_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();

    debug!("Running {:?}", args.command);

    match args.command {
        Command::Create {
            shortcut,
            target,
            args,
        } => run_create(&shortcut, &target, &args),

        Command::Enable {
            name,
            display_name,
            from,
            dir,
            exec,
        } => {
            let app = commands::load_app(name, display_name, from.as_deref(), exec)?;
            let folder = commands::resolve_folder(dir)?;
            let path = run_enable(&folder, &app)?;
            println!("{}", path.display());
            Ok(())
        }

        Command::Status { name, dir } => {
            let folder = commands::resolve_folder(dir)?;
            let app = autolink_core::AutostartApp::new(name, Vec::<String>::new());
            let path = folder.shortcut_path(&app);
            if folder.is_registered(&app) {
                println!("enabled: {}", path.display());
            } else {
                println!("disabled: {} not found", path.display());
            }
            Ok(())
        }

        Command::Decode { code, json } => {
            let decoded = commands::decode_status(commands::parse_status(&code)?);
            if json {
                println!("{}", serde_json::to_string_pretty(&decoded)?);
            } else {
                println!("{}: {}", decoded.code, decoded.description);
            }
            Ok(())
        }
    }
}

#[cfg(windows)]
fn run_create(shortcut: &std::path::Path, target: &std::path::Path, args: &[String]) -> Result<()> {
    let writer = autolink_core::ShortcutWriter::new(autolink_core::ComRuntime);
    commands::create(&writer, shortcut, target, args)
}

#[cfg(not(windows))]
fn run_create(_shortcut: &std::path::Path, _target: &std::path::Path, _args: &[String]) -> Result<()> {
    anyhow::bail!("shell links can only be written on Windows")
}

#[cfg(windows)]
fn run_enable(
    folder: &autolink_core::StartupFolder,
    app: &autolink_core::AutostartApp,
) -> Result<PathBuf> {
    let writer = autolink_core::ShortcutWriter::new(autolink_core::ComRuntime);
    Ok(folder.register(app, &writer)?)
}

#[cfg(not(windows))]
fn run_enable(
    _folder: &autolink_core::StartupFolder,
    _app: &autolink_core::AutostartApp,
) -> Result<PathBuf> {
    anyhow::bail!("shell links can only be written on Windows")
}
