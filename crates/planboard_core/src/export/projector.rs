//! Tabular projection of the board for spreadsheet export.
//!
//! # Invariants
//! - Only non-hidden weeks become columns, in board order.
//! - Output is deterministic for a given board.
//! - Cells without tasks project to an empty string.

use crate::model::board::{Board, Experiment};
use crate::model::week::WeekColumn;

/// Label of the first header column.
pub const NAME_COLUMN_HEADER: &str = "שם ניסוי";
/// Marker appended to completed tasks.
pub const DONE_MARKER: &str = "V";
/// Marker appended to open tasks.
pub const OPEN_MARKER: &str = "X";

/// Projects the board into a header row plus one row per experiment.
pub fn project(board: &Board) -> Vec<Vec<String>> {
    let visible = board.visible_weeks(false);

    let mut rows = Vec::with_capacity(board.experiments.len() + 1);
    rows.push(header_row(&visible));
    rows.extend(
        board
            .experiments
            .iter()
            .map(|experiment| experiment_row(experiment, &visible)),
    );
    rows
}

fn header_row(visible: &[&WeekColumn]) -> Vec<String> {
    std::iter::once(NAME_COLUMN_HEADER.to_string())
        .chain(visible.iter().map(|week| week.label()))
        .collect()
}

fn experiment_row(experiment: &Experiment, visible: &[&WeekColumn]) -> Vec<String> {
    std::iter::once(experiment.name.clone())
        .chain(visible.iter().map(|week| {
            experiment
                .tasks(week.start_date)
                .iter()
                .map(|task| {
                    let marker = if task.completed {
                        DONE_MARKER
                    } else {
                        OPEN_MARKER
                    };
                    format!("{} ({marker})", task.text)
                })
                .collect::<Vec<_>>()
                .join("\n")
        }))
        .collect()
}
