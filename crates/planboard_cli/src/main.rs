//! Command-line front end for the planning board.
//!
//! # Responsibility
//! - Run one board mutation or read per invocation against the SQLite store.
//! - Print the resulting grid so changes are visible from a terminal.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use planboard_core::db::open_db;
use planboard_core::{
    append_task, default_log_level, edit_task, encode_board, export_to_path, project,
    remove_task, toggle_task, Board, BoardMutation, BoardSession, BoardStore, ExportOptions,
    LoadSource, SqliteKvRepository, Style, Theme,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "planboard")]
#[command(author, version, about = "Weekly experiment planning board")]
struct Cli {
    /// SQLite file holding the board
    #[arg(long, env = "PLANBOARD_DB_PATH", default_value = "planboard.sqlite3")]
    db: PathBuf,

    /// Write rolling logs into this absolute directory
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Log level used with --log-dir (default: debug in debug builds, info otherwise)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the board grid
    Show {
        /// Include hidden weeks
        #[arg(short, long)]
        all: bool,

        /// Print the stored JSON document instead of the grid
        #[arg(long)]
        json: bool,
    },

    /// Append an experiment with the next default name
    AddExperiment,

    /// Rename an experiment
    Rename { id: String, name: String },

    /// Delete an experiment row
    Delete { id: String },

    /// Set or clear the row style of an experiment
    StyleRow {
        id: String,

        #[arg(long)]
        bg: Option<String>,

        #[arg(long)]
        fg: Option<String>,
    },

    /// Set or clear the column style of a week (YYYY-MM-DD)
    StyleWeek {
        date: NaiveDate,

        #[arg(long)]
        bg: Option<String>,

        #[arg(long)]
        fg: Option<String>,
    },

    /// Hide or show a week column
    ToggleWeek { date: NaiveDate },

    /// Add a task to a cell
    AddTask {
        experiment_id: String,
        date: NaiveDate,
        text: String,
    },

    /// Flip the completion flag of a task
    ToggleTask {
        experiment_id: String,
        date: NaiveDate,
        task_id: String,
    },

    /// Edit the title and, optionally, the notes of a task
    EditTask {
        experiment_id: String,
        date: NaiveDate,
        task_id: String,
        text: String,

        #[arg(short, long)]
        description: Option<String>,
    },

    /// Remove a task from a cell
    RemoveTask {
        experiment_id: String,
        date: NaiveDate,
        task_id: String,
    },

    /// Write the spreadsheet export
    Export {
        /// Output directory (default: current directory)
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Show the theme, or set it to light|dark|toggle
    Theme { value: Option<String> },

    /// Discard the saved board; the next run starts from the default board
    Reset,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let log_dir = log_dir
            .to_str()
            .context("log dir must be valid UTF-8")?;
        let level = cli
            .log_level
            .as_deref()
            .unwrap_or_else(|| default_log_level());
        planboard_core::init_logging(level, log_dir)
            .context("Failed to initialize logging")?;
    }

    let conn = open_db(&cli.db)
        .with_context(|| format!("Failed to open board DB '{}'", cli.db.display()))?;
    let store = BoardStore::new(SqliteKvRepository::new(&conn));
    let mut session = BoardSession::open(store).context("Failed to load board")?;
    if session.source() == LoadSource::Recovered {
        eprintln!("Warning: stored board was unreadable; started from the default board");
    }

    match cli.command {
        Commands::Show { all, json } => show(session.board(), all, json),
        Commands::AddExperiment => {
            let board = session.apply(BoardMutation::AddExperiment)?;
            if let Some(experiment) = board.experiments.last() {
                println!("{}\t{}", experiment.id, experiment.name);
            }
            Ok(())
        }
        Commands::Rename { id, name } => {
            ensure_experiment(session.board(), &id)?;
            session.apply(BoardMutation::RenameExperiment { id, name })?;
            Ok(())
        }
        Commands::Delete { id } => {
            ensure_experiment(session.board(), &id)?;
            session.apply(BoardMutation::DeleteExperiment { id })?;
            Ok(())
        }
        Commands::StyleRow { id, bg, fg } => {
            ensure_experiment(session.board(), &id)?;
            let style = Style::from_colors(bg, fg);
            session.apply(BoardMutation::SetExperimentStyle { id, style })?;
            Ok(())
        }
        Commands::StyleWeek { date, bg, fg } => {
            ensure_week(session.board(), date)?;
            let style = Style::from_colors(bg, fg);
            session.apply(BoardMutation::SetWeekStyle {
                start_date: date,
                style,
            })?;
            Ok(())
        }
        Commands::ToggleWeek { date } => {
            ensure_week(session.board(), date)?;
            let board = session.apply(BoardMutation::ToggleWeekVisibility { start_date: date })?;
            let hidden = board.week(date).is_some_and(|week| week.is_hidden);
            println!("{date} {}", if hidden { "hidden" } else { "visible" });
            Ok(())
        }
        Commands::AddTask {
            experiment_id,
            date,
            text,
        } => {
            ensure_cell(session.board(), &experiment_id, date)?;
            if text.trim().is_empty() {
                bail!("task text must not be blank");
            }
            let board = session.edit_cell_tasks(&experiment_id, date, |tasks| {
                append_task(tasks, &text)
            })?;
            if let Some(task) = board.cell(&experiment_id, date).and_then(|c| c.tasks.last()) {
                println!("{}", task.id);
            }
            Ok(())
        }
        Commands::ToggleTask {
            experiment_id,
            date,
            task_id,
        } => {
            ensure_cell(session.board(), &experiment_id, date)?;
            session.edit_cell_tasks(&experiment_id, date, |tasks| toggle_task(tasks, &task_id))?;
            Ok(())
        }
        Commands::EditTask {
            experiment_id,
            date,
            task_id,
            text,
            description,
        } => {
            ensure_cell(session.board(), &experiment_id, date)?;
            let known = session
                .board()
                .cell(&experiment_id, date)
                .is_some_and(|cell| cell.tasks.iter().any(|task| task.id == task_id));
            if !known {
                bail!("task '{task_id}' not found in {experiment_id} on {date}");
            }
            session.edit_cell_tasks(&experiment_id, date, |tasks| {
                edit_task(tasks, &task_id, &text, description.as_deref())
            })?;
            Ok(())
        }
        Commands::RemoveTask {
            experiment_id,
            date,
            task_id,
        } => {
            ensure_cell(session.board(), &experiment_id, date)?;
            session.edit_cell_tasks(&experiment_id, date, |tasks| remove_task(tasks, &task_id))?;
            Ok(())
        }
        Commands::Export { output } => export(session.board(), &output),
        Commands::Theme { value } => theme(&session, value.as_deref()),
        Commands::Reset => {
            session.store().clear()?;
            println!("board reset");
            Ok(())
        }
    }
}

fn show(board: &Board, include_hidden: bool, json: bool) -> Result<()> {
    if json {
        println!("{}", encode_board(board)?);
        return Ok(());
    }

    if include_hidden {
        let weeks = board.visible_weeks(true);
        let header: Vec<String> = weeks
            .iter()
            .map(|week| {
                let marker = if week.is_hidden { "*" } else { "" };
                format!("{}{marker}", week.label())
            })
            .collect();
        println!("id\tname\t{}", header.join("\t"));
        for experiment in &board.experiments {
            let cells: Vec<String> = weeks
                .iter()
                .map(|week| progress_label(board, &experiment.id, week.start_date))
                .collect();
            println!("{}\t{}\t{}", experiment.id, experiment.name, cells.join("\t"));
        }
        return Ok(());
    }

    for row in project(board) {
        println!("{}", row.join("\t").replace('\n', "; "));
    }
    Ok(())
}

fn progress_label(board: &Board, experiment_id: &str, start_date: NaiveDate) -> String {
    match board.cell(experiment_id, start_date) {
        Some(cell) if !cell.is_empty() => {
            let progress = cell.progress();
            format!("{}/{}", progress.completed, progress.total)
        }
        _ => String::new(),
    }
}

fn export(board: &Board, dir: &Path) -> Result<()> {
    let options = ExportOptions::default();
    let target = dir.join(&options.file_name);
    export_to_path(board, &target, &options)
        .with_context(|| format!("Failed to write '{}'", target.display()))?;
    println!("{}", target.display());
    Ok(())
}

fn theme<R: planboard_core::KvRepository>(
    session: &BoardSession<R>,
    value: Option<&str>,
) -> Result<()> {
    let current = session.theme()?;
    let next = match value {
        None => {
            println!("{current}");
            return Ok(());
        }
        Some("toggle") => current.toggled(),
        Some(raw) => raw.parse::<Theme>().map_err(anyhow::Error::msg)?,
    };
    session.set_theme(next)?;
    println!("{next}");
    Ok(())
}

fn ensure_experiment(board: &Board, id: &str) -> Result<()> {
    if board.experiment(id).is_none() {
        bail!("experiment '{id}' not found");
    }
    Ok(())
}

fn ensure_week(board: &Board, date: NaiveDate) -> Result<()> {
    if board.week(date).is_none() {
        bail!("no week starts on {date}");
    }
    Ok(())
}

fn ensure_cell(board: &Board, experiment_id: &str, date: NaiveDate) -> Result<()> {
    ensure_experiment(board, experiment_id)?;
    ensure_week(board, date)
}
