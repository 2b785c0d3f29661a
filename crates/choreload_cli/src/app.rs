//! Command dispatch for the `choreload` binary.
//!
//! # Responsibility
//! - Merge command-line flags over `household.toml`.
//! - Run one of the core use cases and write its result.
//!
//! # Invariants
//! - A flag always wins over the config value it overrides.
//! - Output goes to the caller's writer; nothing here prints directly.

use crate::household::{find_catalog, load_catalog, load_config, HouseholdConfig, StoreKind};
use anyhow::{bail, Context, Result};
use choreload_core::db::open_counter_db;
use choreload_core::{
    default_log_level, init_logging, ChoreCatalog, ChoreService, CounterLog, ParticipantSet,
    ScheduleReport, Scheduler, SqliteCounterLog, TextCounterLog, SQLITE_LOG_FILE_NAME,
    TEXT_LOG_FILE_NAME,
};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Weekly chore allocation balanced by effort and overdue state.
#[derive(Debug, Parser)]
#[command(name = "choreload", version, about)]
pub struct Cli {
    /// Household directory holding the catalog, config and overdue store.
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Participant id; repeat to list several. Overrides `household.toml`.
    #[arg(short, long = "participant")]
    pub participants: Vec<String>,

    /// Days between two runs.
    #[arg(long)]
    pub period_days: Option<u32>,

    /// Counter store backend.
    #[arg(long, value_enum)]
    pub store: Option<StoreKind>,

    /// Directory for rolling log files; logging is off when omitted.
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Print machine-readable JSON instead of text.
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Assign this period's chores and persist the new counters.
    Week,
    /// Show counters and due state without changing anything.
    Status,
    /// List recent runs (sqlite store only).
    History {
        #[arg(long, default_value_t = 5)]
        limit: u32,
    },
}

/// Use cases served by `ChoreService`, available on every store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ServiceAction {
    Week,
    Status,
}

/// Effective settings after merging flags over `household.toml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub dir: PathBuf,
    pub participants: Vec<String>,
    pub period_days: u32,
    pub store: StoreKind,
    pub json: bool,
}

impl Settings {
    pub fn resolve(cli: &Cli, config: &HouseholdConfig) -> Self {
        Self {
            dir: cli.dir.clone(),
            participants: if cli.participants.is_empty() {
                config.participants.clone()
            } else {
                cli.participants.clone()
            },
            period_days: cli.period_days.unwrap_or(config.period_days),
            store: cli.store.unwrap_or(config.store),
            json: cli.json,
        }
    }
}

/// `--log-level`, then `log_level` from the config, then the build default.
pub fn effective_log_level<'a>(cli: &'a Cli, config: &'a HouseholdConfig) -> &'a str {
    cli.log_level
        .as_deref()
        .or(config.log_level.as_deref())
        .unwrap_or(default_log_level())
}

/// Starts file logging when `--log-dir` is given; a relative directory is
/// resolved against the working directory.
pub fn start_logging(cli: &Cli, config: &HouseholdConfig) -> Result<()> {
    let Some(log_dir) = cli.log_dir.as_deref() else {
        return Ok(());
    };
    let log_dir = absolute(log_dir)?;
    init_logging(effective_log_level(cli, config), &log_dir)?;
    Ok(())
}

/// Runs the parsed command against its household directory.
pub fn execute<W: Write>(cli: &Cli, out: &mut W) -> Result<()> {
    let config = load_config(&cli.dir)?;
    start_logging(cli, &config)?;

    let command = cli.command.unwrap_or(Command::Week);
    let settings = Settings::resolve(cli, &config);
    let catalog = load_catalog(&find_catalog(&settings.dir)?)?;

    match settings.store {
        StoreKind::Text => {
            let action = match command {
                Command::Week => ServiceAction::Week,
                Command::Status => ServiceAction::Status,
                Command::History { .. } => {
                    bail!("history needs the sqlite store (pass `--store sqlite`)")
                }
            };
            let log = TextCounterLog::new(settings.dir.join(TEXT_LOG_FILE_NAME));
            run(action, log, &catalog, &settings, out)
        }
        StoreKind::Sqlite => {
            let path = settings.dir.join(SQLITE_LOG_FILE_NAME);
            let mut conn = open_counter_db(&path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            let log = SqliteCounterLog::try_new(&mut conn)?;
            match command {
                Command::Week => run(ServiceAction::Week, log, &catalog, &settings, out),
                Command::Status => run(ServiceAction::Status, log, &catalog, &settings, out),
                Command::History { limit } => print_history(&log, limit, settings.json, out),
            }
        }
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    Ok(cwd.join(path))
}

fn run<L: CounterLog, W: Write>(
    action: ServiceAction,
    log: L,
    catalog: &ChoreCatalog,
    settings: &Settings,
    out: &mut W,
) -> Result<()> {
    let scheduler = Scheduler::new(settings.period_days)?;
    let mut service = ChoreService::new(log, scheduler);

    match action {
        ServiceAction::Week => {
            let participants = ParticipantSet::new(&settings.participants)?;
            let run = service.new_week(catalog, &participants)?;
            let report = ScheduleReport::from_run(&run);
            if settings.json {
                writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
            } else {
                write!(out, "{report}")?;
            }
        }
        ServiceAction::Status => {
            let status = service.status(catalog)?;
            if settings.json {
                writeln!(out, "{}", serde_json::to_string_pretty(&status)?)?;
                return Ok(());
            }
            for entry in &status {
                let owner = entry
                    .dedicated_owner
                    .as_deref()
                    .map(|owner| format!(" [{owner}]"))
                    .unwrap_or_default();
                writeln!(
                    out,
                    "{:<24} {:>4}/{:<4} {}{}",
                    entry.chore,
                    entry.days_overdue,
                    entry.frequency_days,
                    if entry.due { "due" } else { "-" },
                    owner
                )?;
            }
        }
    }
    Ok(())
}

fn print_history<W: Write>(
    log: &SqliteCounterLog<'_>,
    limit: u32,
    json: bool,
    out: &mut W,
) -> Result<()> {
    let runs = log.recent_runs(limit)?;
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&runs)?)?;
        return Ok(());
    }
    if runs.is_empty() {
        writeln!(out, "no runs recorded yet")?;
    }
    for run in &runs {
        writeln!(
            out,
            "{} ({} days, created_at={})",
            run.run_id, run.period_days, run.created_at
        )?;
        for assigned in &run.assignments {
            let marker = if assigned.dedicated { " [dedicated]" } else { "" };
            writeln!(out, "  {} -> {}{}", assigned.chore, assigned.participant, marker)?;
        }
    }
    Ok(())
}
