//! Core domain logic for the experiment planning board.
//! This crate is the single source of truth for board invariants.

pub mod db;
pub mod export;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use export::projector::{project, DONE_MARKER, NAME_COLUMN_HEADER, OPEN_MARKER};
pub use export::xlsx::{
    build_workbook, export_to_buffer, export_to_path, ExportError, ExportOptions, ExportResult,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::board::{
    new_experiment_id, Board, BoardValidationError, Cell, CellProgress, Experiment, ExperimentId,
};
pub use model::ops::{
    add_experiment, delete_experiment, rename_experiment, set_cell_tasks, set_experiment_style,
    set_week_style, toggle_week_visibility, BoardMutation,
};
pub use model::seed::seed_board;
pub use model::style::{resolve_cell_style, Style};
pub use model::task::{
    append_task, edit_task, remove_task, toggle_task, update_task, Task, TaskId,
};
pub use model::theme::Theme;
pub use model::week::{
    current_week_start, generate_weeks, validate_weeks, week_label, week_start, WeekColumn,
};
pub use repo::kv_repo::{
    KvRepository, MemoryKvRepository, RepoError, RepoResult, SqliteKvRepository,
};
pub use service::board_session::BoardSession;
pub use service::board_store::{
    decode_board, encode_board, BoardStore, LoadSource, BOARD_STATE_KEY, THEME_KEY,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
