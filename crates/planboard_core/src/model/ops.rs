//! Board mutation operations.
//!
//! # Responsibility
//! - Provide the complete mutation surface used by presentation callers.
//! - Express every task edit through whole-list cell replacement.
//!
//! # Invariants
//! - Every operation consumes the previous board and returns its successor.
//! - Unknown experiment ids or week dates are silent no-ops.
//! - `set_cell_tasks` never creates a cell key without a matching week column.

use crate::model::board::{Board, Cell, Experiment, ExperimentId};
use crate::model::style::Style;
use crate::model::task::Task;
use chrono::NaiveDate;

/// Prefix of generated experiment names; the 1-based row position follows.
pub const DEFAULT_EXPERIMENT_NAME_PREFIX: &str = "ניסוי";

/// Appends a new experiment with a generated id and positional default name.
pub fn add_experiment(mut board: Board) -> Board {
    let position = board.experiments.len() + 1;
    board.experiments.push(Experiment::new(format!(
        "{DEFAULT_EXPERIMENT_NAME_PREFIX} {position}"
    )));
    board
}

/// Removes the experiment `id` together with its cells.
pub fn delete_experiment(mut board: Board, id: &str) -> Board {
    board.experiments.retain(|experiment| experiment.id != id);
    board
}

/// Replaces the display name of experiment `id`; empty names are accepted.
pub fn rename_experiment(mut board: Board, id: &str, name: impl Into<String>) -> Board {
    if let Some(experiment) = find_experiment_mut(&mut board, id) {
        experiment.name = name.into();
    }
    board
}

/// Replaces the row style of experiment `id` wholesale.
pub fn set_experiment_style(mut board: Board, id: &str, style: Style) -> Board {
    if let Some(experiment) = find_experiment_mut(&mut board, id) {
        experiment.style = Some(style);
    }
    board
}

/// Replaces the column style of week `start_date` wholesale.
pub fn set_week_style(mut board: Board, start_date: NaiveDate, style: Style) -> Board {
    if let Some(week) = board
        .weeks
        .iter_mut()
        .find(|week| week.start_date == start_date)
    {
        week.style = Some(style);
    }
    board
}

/// Flips the default visibility of week `start_date`.
pub fn toggle_week_visibility(mut board: Board, start_date: NaiveDate) -> Board {
    if let Some(week) = board
        .weeks
        .iter_mut()
        .find(|week| week.start_date == start_date)
    {
        week.is_hidden = !week.is_hidden;
    }
    board
}

/// Replaces the task list of one cell, materializing the cell when absent.
pub fn set_cell_tasks(
    mut board: Board,
    experiment_id: &str,
    start_date: NaiveDate,
    tasks: Vec<Task>,
) -> Board {
    if board.week(start_date).is_none() {
        return board;
    }
    if let Some(experiment) = find_experiment_mut(&mut board, experiment_id) {
        experiment.cells.insert(start_date, Cell::new(tasks));
    }
    board
}

fn find_experiment_mut<'a>(board: &'a mut Board, id: &str) -> Option<&'a mut Experiment> {
    board
        .experiments
        .iter_mut()
        .find(|experiment| experiment.id == id)
}

/// One call of the mutation surface, as a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardMutation {
    AddExperiment,
    DeleteExperiment {
        id: ExperimentId,
    },
    RenameExperiment {
        id: ExperimentId,
        name: String,
    },
    SetExperimentStyle {
        id: ExperimentId,
        style: Style,
    },
    SetWeekStyle {
        start_date: NaiveDate,
        style: Style,
    },
    ToggleWeekVisibility {
        start_date: NaiveDate,
    },
    SetCellTasks {
        experiment_id: ExperimentId,
        start_date: NaiveDate,
        tasks: Vec<Task>,
    },
}

impl BoardMutation {
    /// Applies this mutation, returning the successor board.
    pub fn apply(self, board: Board) -> Board {
        match self {
            Self::AddExperiment => add_experiment(board),
            Self::DeleteExperiment { id } => delete_experiment(board, &id),
            Self::RenameExperiment { id, name } => rename_experiment(board, &id, name),
            Self::SetExperimentStyle { id, style } => set_experiment_style(board, &id, style),
            Self::SetWeekStyle { start_date, style } => set_week_style(board, start_date, style),
            Self::ToggleWeekVisibility { start_date } => {
                toggle_week_visibility(board, start_date)
            }
            Self::SetCellTasks {
                experiment_id,
                start_date,
                tasks,
            } => set_cell_tasks(board, &experiment_id, start_date, tasks),
        }
    }

    /// Returns whether every id or date this mutation targets exists in `board`.
    ///
    /// `false` means [`BoardMutation::apply`] will leave the board unchanged.
    pub fn targets_known(&self, board: &Board) -> bool {
        match self {
            Self::AddExperiment => true,
            Self::DeleteExperiment { id }
            | Self::RenameExperiment { id, .. }
            | Self::SetExperimentStyle { id, .. } => board.experiment(id).is_some(),
            Self::SetWeekStyle { start_date, .. } | Self::ToggleWeekVisibility { start_date } => {
                board.week(*start_date).is_some()
            }
            Self::SetCellTasks {
                experiment_id,
                start_date,
                ..
            } => board.experiment(experiment_id).is_some() && board.week(*start_date).is_some(),
        }
    }

    /// Short stable name used in log events.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AddExperiment => "add_experiment",
            Self::DeleteExperiment { .. } => "delete_experiment",
            Self::RenameExperiment { .. } => "rename_experiment",
            Self::SetExperimentStyle { .. } => "set_experiment_style",
            Self::SetWeekStyle { .. } => "set_week_style",
            Self::ToggleWeekVisibility { .. } => "toggle_week_visibility",
            Self::SetCellTasks { .. } => "set_cell_tasks",
        }
    }
}
