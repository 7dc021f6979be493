//! Lexinote CLI - binary entry point.
//!
//! Two commands drive the whole system:
//!
//! ```text
//! lexinote fetch   -> Fetcher::fetch_and_append (manual trigger)
//! lexinote models  -> Fetcher::available_models (discovery + fallback)
//! ```
//!
//! User-visible notices go to stdout; diagnostic detail goes to the tracing
//! log (a file under the platform data directory when one can be opened,
//! stderr otherwise).

use std::env;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::Local;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use lexinote_config::{DailyNotesConfig, SettingsFile, SettingsStore};
use lexinote_core::{Fetcher, FsVault, LiveSource, Notifier};

/// Notices print to stdout for the person running the command.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        println!("{message}");
    }
}

enum Command {
    Fetch,
    Models,
    Help,
}

struct CliArgs {
    command: Command,
    config: Option<PathBuf>,
    vault: PathBuf,
    folder: String,
    date_format: String,
}

const USAGE: &str = "\
Usage: lexinote [OPTIONS] <COMMAND>

Commands:
  fetch   Fetch words for all enabled languages and append to today's note
  models  List models for the active provider

Options:
  --config <PATH>        Settings file (default: platform config directory)
  --vault <DIR>          Note vault root (default: current directory)
  --folder <NAME>        Daily-note folder (default: Journal)
  --date-format <FMT>    Daily-note date pattern, moment tokens (default: YYYY-MM-DD)
";

fn parse_args(mut args: env::Args) -> Result<CliArgs, String> {
    let _ = args.next(); // program name

    let mut command = None;
    let mut config = None;
    let mut vault = PathBuf::from(".");
    let mut folder = String::new();
    let mut date_format = String::new();

    while let Some(arg) = args.next() {
        let mut value_for = |flag: &str| {
            args.next().ok_or_else(|| format!("{flag} requires a value"))
        };
        match arg.as_str() {
            "--config" => config = Some(PathBuf::from(value_for("--config")?)),
            "--vault" => vault = PathBuf::from(value_for("--vault")?),
            "--folder" => folder = value_for("--folder")?,
            "--date-format" => date_format = value_for("--date-format")?,
            "--help" | "-h" => command = Some(Command::Help),
            "fetch" if command.is_none() => command = Some(Command::Fetch),
            "models" if command.is_none() => command = Some(Command::Models),
            other => return Err(format!("unrecognized argument '{other}'")),
        }
    }

    let command = command.ok_or_else(|| "missing command".to_string())?;
    Ok(CliArgs {
        command,
        config,
        vault,
        folder,
        date_format,
    })
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(file) = open_log_file() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();
        return;
    }

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn open_log_file() -> Option<std::fs::File> {
    let dir = dirs::data_local_dir()?.join("lexinote");
    fs::create_dir_all(&dir).ok()?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("lexinote.log"))
        .ok()
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();

    let args = match parse_args(env::args()) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("error: {message}\n\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    if matches!(args.command, Command::Help) {
        print!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: CliArgs) -> Result<()> {
    let settings_path = match args.config.clone() {
        Some(path) => path,
        None => SettingsFile::default_path()
            .context("could not determine a settings location; pass --config")?,
    };
    let mut settings_file = SettingsFile::new(settings_path);

    let first_run = !settings_file.exists();
    let settings = settings_file
        .load_or_default()
        .context("failed to load settings")?;
    if first_run {
        settings_file
            .save(&settings)
            .context("failed to write default settings")?;
        println!(
            "Created default settings at {}. Add an API key and languages, then rerun.",
            settings_file.path().display()
        );
    }

    let daily = DailyNotesConfig::new(args.folder, args.date_format);
    let mut fetcher = Fetcher::new(settings, settings_file, ConsoleNotifier, LiveSource);

    match args.command {
        Command::Fetch => {
            let mut vault = FsVault::new(args.vault);
            let today = Local::now().date_naive();
            fetcher
                .fetch_and_append(&mut vault, &daily, today)
                .await
                .context("fetch failed")?;
        }
        Command::Models => {
            let provider = fetcher.settings().provider;
            for model in fetcher.available_models().await {
                println!("{model}");
            }
            tracing::debug!(provider = %provider, "Listed models");
        }
        Command::Help => unreachable!("handled in main"),
    }
    Ok(())
}
