//! FFI use-case API for Flutter-facing board calls.
//!
//! # Responsibility
//! - Expose board reads, mutations, theme and export to Dart via FRB.
//! - Keep error semantics simple: every call returns an envelope.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Each call opens the board DB, applies at most one mutation and
//!   returns the resulting board as its persisted JSON document.
//! - Dates cross the boundary as `YYYY-MM-DD` strings.

use chrono::NaiveDate;
use log::error;
use planboard_core::db::open_db;
use planboard_core::{
    append_task, core_version as core_version_inner, edit_task, encode_board,
    init_logging as init_logging_inner, remove_task, toggle_task, Board, BoardMutation,
    BoardSession, BoardStore, ExportOptions, SqliteKvRepository, Style, Task, Theme,
};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

const BOARD_DB_FILE_NAME: &str = "planboard.sqlite3";
const BOARD_DB_PATH_ENV: &str = "PLANBOARD_DB_PATH";
static BOARD_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return error.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Board response envelope shared by reads and mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Board document after the call, in its persisted JSON layout.
    pub board_json: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl BoardResponse {
    fn success(message: impl Into<String>, board_json: String) -> Self {
        Self {
            ok: true,
            board_json: Some(board_json),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            board_json: None,
            message: message.into(),
        }
    }
}

/// Generic action envelope for calls that do not return a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    /// Payload such as the active theme or the written file path.
    pub value: Option<String>,
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, value: String) -> Self {
        Self {
            ok: true,
            value: Some(value),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            value: None,
            message: message.into(),
        }
    }
}

/// Loads the current board, seeding the default board on first run.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn board_snapshot() -> BoardResponse {
    snapshot_at(&resolve_board_db_path())
}

/// Appends an experiment with the next positional default name.
#[flutter_rust_bridge::frb(sync)]
pub fn board_add_experiment() -> BoardResponse {
    mutate_at(
        &resolve_board_db_path(),
        "board_add_experiment",
        Ok(BoardMutation::AddExperiment),
    )
}

/// Deletes an experiment row; unknown ids leave the board unchanged.
#[flutter_rust_bridge::frb(sync)]
pub fn board_delete_experiment(id: String) -> BoardResponse {
    mutate_at(
        &resolve_board_db_path(),
        "board_delete_experiment",
        Ok(BoardMutation::DeleteExperiment { id }),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn board_rename_experiment(id: String, name: String) -> BoardResponse {
    mutate_at(
        &resolve_board_db_path(),
        "board_rename_experiment",
        Ok(BoardMutation::RenameExperiment { id, name }),
    )
}

/// Replaces the row style of an experiment.
///
/// `None` colors clear the corresponding field.
#[flutter_rust_bridge::frb(sync)]
pub fn board_set_experiment_style(
    id: String,
    background_color: Option<String>,
    text_color: Option<String>,
) -> BoardResponse {
    let style = Style::from_colors(background_color, text_color);
    mutate_at(
        &resolve_board_db_path(),
        "board_set_experiment_style",
        Ok(BoardMutation::SetExperimentStyle { id, style }),
    )
}

/// Replaces the column style of the week starting at `start_date`.
#[flutter_rust_bridge::frb(sync)]
pub fn board_set_week_style(
    start_date: String,
    background_color: Option<String>,
    text_color: Option<String>,
) -> BoardResponse {
    let mutation = parse_date(&start_date).map(|start_date| BoardMutation::SetWeekStyle {
        start_date,
        style: Style::from_colors(background_color, text_color),
    });
    mutate_at(&resolve_board_db_path(), "board_set_week_style", mutation)
}

#[flutter_rust_bridge::frb(sync)]
pub fn board_toggle_week(start_date: String) -> BoardResponse {
    let mutation = parse_date(&start_date)
        .map(|start_date| BoardMutation::ToggleWeekVisibility { start_date });
    mutate_at(&resolve_board_db_path(), "board_toggle_week", mutation)
}

/// Replaces the whole task list of one cell.
///
/// Input semantics:
/// - `tasks_json`: JSON array of `{id, text, description, completed}`.
#[flutter_rust_bridge::frb(sync)]
pub fn board_set_cell_tasks(
    experiment_id: String,
    start_date: String,
    tasks_json: String,
) -> BoardResponse {
    let mutation = parse_date(&start_date).and_then(|start_date| {
        let tasks = serde_json::from_str::<Vec<Task>>(&tasks_json)
            .map_err(|err| format!("invalid tasks_json: {err}"))?;
        Ok(BoardMutation::SetCellTasks {
            experiment_id,
            start_date,
            tasks,
        })
    });
    mutate_at(&resolve_board_db_path(), "board_set_cell_tasks", mutation)
}

/// Appends a trimmed task to a cell; blank text is a no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn board_add_task(experiment_id: String, start_date: String, text: String) -> BoardResponse {
    edit_cell_at(
        &resolve_board_db_path(),
        "board_add_task",
        &experiment_id,
        &start_date,
        |tasks| append_task(tasks, &text),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn board_toggle_task(
    experiment_id: String,
    start_date: String,
    task_id: String,
) -> BoardResponse {
    edit_cell_at(
        &resolve_board_db_path(),
        "board_toggle_task",
        &experiment_id,
        &start_date,
        |tasks| toggle_task(tasks, &task_id),
    )
}

/// Edits the title and notes of a task, keeping its id and completion flag.
///
/// A blank `text` keeps the current title.
#[flutter_rust_bridge::frb(sync)]
pub fn board_update_task(
    experiment_id: String,
    start_date: String,
    task_id: String,
    text: String,
    description: String,
) -> BoardResponse {
    edit_cell_at(
        &resolve_board_db_path(),
        "board_update_task",
        &experiment_id,
        &start_date,
        |tasks| edit_task(tasks, &task_id, &text, Some(description.as_str())),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn board_remove_task(
    experiment_id: String,
    start_date: String,
    task_id: String,
) -> BoardResponse {
    edit_cell_at(
        &resolve_board_db_path(),
        "board_remove_task",
        &experiment_id,
        &start_date,
        |tasks| remove_task(tasks, &task_id),
    )
}

/// Writes the spreadsheet export into `dir`.
///
/// # FFI contract
/// - Returns the written file path as `value` on success.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn board_export(dir: String) -> ActionResponse {
    export_at(&resolve_board_db_path(), Path::new(dir.trim()))
}

/// Returns the saved theme (`light|dark`), defaulting to light.
#[flutter_rust_bridge::frb(sync)]
pub fn theme_get() -> ActionResponse {
    theme_get_at(&resolve_board_db_path())
}

#[flutter_rust_bridge::frb(sync)]
pub fn theme_set(theme: String) -> ActionResponse {
    theme_set_at(&resolve_board_db_path(), &theme)
}

fn resolve_board_db_path() -> PathBuf {
    BOARD_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(BOARD_DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(BOARD_DB_FILE_NAME)
        })
        .clone()
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("invalid date `{raw}`: {err}"))
}

/// Logs a failed call and returns the envelope message.
///
/// Only the operation name and error text are logged, never board content.
fn failed(operation: &str, err: &str) -> String {
    error!("event=ffi_call module=ffi status=error operation={operation} error={err}");
    format!("{operation} failed: {err}")
}

fn with_session<T>(
    db_path: &Path,
    f: impl FnOnce(&mut BoardSession<SqliteKvRepository<'_>>) -> Result<T, String>,
) -> Result<T, String> {
    let conn = open_db(db_path).map_err(|err| format!("board DB open failed: {err}"))?;
    let store = BoardStore::new(SqliteKvRepository::new(&conn));
    let mut session =
        BoardSession::open(store).map_err(|err| format!("board load failed: {err}"))?;
    f(&mut session)
}

fn board_json(board: &Board) -> Result<String, String> {
    encode_board(board).map_err(|err| err.to_string())
}

fn snapshot_at(db_path: &Path) -> BoardResponse {
    match with_session(db_path, |session| board_json(session.board())) {
        Ok(json) => BoardResponse::success("Board loaded.", json),
        Err(err) => BoardResponse::failure(failed("board_snapshot", &err)),
    }
}

fn mutate_at(
    db_path: &Path,
    operation: &str,
    mutation: Result<BoardMutation, String>,
) -> BoardResponse {
    let result = mutation.and_then(|mutation| {
        with_session(db_path, |session| {
            let board = session.apply(mutation).map_err(|err| err.to_string())?;
            board_json(board)
        })
    });
    match result {
        Ok(json) => BoardResponse::success("Board updated.", json),
        Err(err) => BoardResponse::failure(failed(operation, &err)),
    }
}

fn edit_cell_at(
    db_path: &Path,
    operation: &str,
    experiment_id: &str,
    start_date: &str,
    edit: impl FnOnce(&[Task]) -> Vec<Task>,
) -> BoardResponse {
    let result = parse_date(start_date).and_then(|start_date| {
        with_session(db_path, |session| {
            let board = session
                .edit_cell_tasks(experiment_id, start_date, edit)
                .map_err(|err| err.to_string())?;
            board_json(board)
        })
    });
    match result {
        Ok(json) => BoardResponse::success("Board updated.", json),
        Err(err) => BoardResponse::failure(failed(operation, &err)),
    }
}

fn export_at(db_path: &Path, dir: &Path) -> ActionResponse {
    if dir.as_os_str().is_empty() {
        return ActionResponse::failure(failed("board_export", "export dir must not be empty"));
    }
    let options = ExportOptions::default();
    let target = dir.join(&options.file_name);
    let result = with_session(db_path, |session| {
        planboard_core::export_to_path(session.board(), &target, &options)
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(()) => ActionResponse::success("Board exported.", target.display().to_string()),
        Err(err) => ActionResponse::failure(failed("board_export", &err)),
    }
}

fn theme_get_at(db_path: &Path) -> ActionResponse {
    match with_session(db_path, |session| {
        session.theme().map_err(|err| err.to_string())
    }) {
        Ok(theme) => ActionResponse::success("Theme loaded.", theme.to_string()),
        Err(err) => ActionResponse::failure(failed("theme_get", &err)),
    }
}

fn theme_set_at(db_path: &Path, raw: &str) -> ActionResponse {
    let result = raw.trim().parse::<Theme>().and_then(|theme| {
        with_session(db_path, |session| {
            session.set_theme(theme).map_err(|err| err.to_string())
        })?;
        Ok(theme)
    });
    match result {
        Ok(theme) => ActionResponse::success("Theme saved.", theme.to_string()),
        Err(err) => ActionResponse::failure(failed("theme_set", &err)),
    }
}
