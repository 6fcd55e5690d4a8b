//! Board root entity, experiments and cells.
//!
//! # Responsibility
//! - Define the single persisted document: experiments (rows) and weeks (columns).
//! - Provide derived reads used by renderers and exporters.
//! - Check structural and referential invariants of a board value.
//!
//! # Invariants
//! - `weeks` is ascending by `start_date` with no duplicates.
//! - Every cell key of every experiment equals some week `start_date`.
//! - A missing cell key means an empty cell, not an error.

use crate::model::style::{resolve_cell_style, Style};
use crate::model::task::Task;
use crate::model::week::{validate_weeks, WeekColumn};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of an experiment row.
pub type ExperimentId = String;

/// Task list of one (experiment, week) pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub tasks: Vec<Task>,
}

/// Completion counts of one cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellProgress {
    pub completed: usize,
    pub total: usize,
}

impl CellProgress {
    /// Completed share in `0.0..=1.0`; `0.0` for empty cells.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }
}

impl Cell {
    /// Creates a cell holding `tasks`.
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Counts completed and total tasks.
    pub fn progress(&self) -> CellProgress {
        CellProgress {
            completed: self.tasks.iter().filter(|task| task.completed).count(),
            total: self.tasks.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// One board row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experiment {
    pub id: ExperimentId,
    /// Display name; may be empty while the user is typing.
    pub name: String,
    /// Materialized cells keyed by week start date.
    pub cells: BTreeMap<NaiveDate, Cell>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
}

impl Experiment {
    /// Creates an experiment with a generated id and no cells.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(new_experiment_id(), name)
    }

    /// Creates an experiment with a caller-provided id and no cells.
    pub fn with_id(id: impl Into<ExperimentId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cells: BTreeMap::new(),
            style: None,
        }
    }

    /// Returns the cell for `start_date`, if materialized.
    pub fn cell(&self, start_date: NaiveDate) -> Option<&Cell> {
        self.cells.get(&start_date)
    }

    /// Returns the tasks for `start_date`; empty when the cell is absent.
    pub fn tasks(&self, start_date: NaiveDate) -> &[Task] {
        self.cells
            .get(&start_date)
            .map(|cell| cell.tasks.as_slice())
            .unwrap_or(&[])
    }
}

/// Generates a process-unique experiment id.
pub fn new_experiment_id() -> ExperimentId {
    format!("exp_{}", Uuid::new_v4().simple())
}

/// Root of the persisted state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub experiments: Vec<Experiment>,
    pub weeks: Vec<WeekColumn>,
}

impl Board {
    /// Creates a board over `weeks` with no experiments.
    pub fn new(weeks: Vec<WeekColumn>) -> Self {
        Self {
            experiments: Vec::new(),
            weeks,
        }
    }

    pub fn experiment(&self, id: &str) -> Option<&Experiment> {
        self.experiments.iter().find(|experiment| experiment.id == id)
    }

    pub fn week(&self, start_date: NaiveDate) -> Option<&WeekColumn> {
        self.weeks.iter().find(|week| week.start_date == start_date)
    }

    /// Returns the cell at (`experiment_id`, `start_date`), if materialized.
    pub fn cell(&self, experiment_id: &str, start_date: NaiveDate) -> Option<&Cell> {
        self.experiment(experiment_id)
            .and_then(|experiment| experiment.cell(start_date))
    }

    /// Returns columns to render: all of them in edit mode, visible ones otherwise.
    pub fn visible_weeks(&self, include_hidden: bool) -> Vec<&WeekColumn> {
        self.weeks
            .iter()
            .filter(|week| include_hidden || !week.is_hidden)
            .collect()
    }

    /// Resolves the effective style of one grid position.
    ///
    /// Unknown ids contribute an empty layer.
    pub fn cell_style(&self, experiment_id: &str, start_date: NaiveDate) -> Style {
        let empty = Style::default();
        let row = self
            .experiment(experiment_id)
            .and_then(|experiment| experiment.style.as_ref())
            .unwrap_or(&empty);
        let col = self
            .week(start_date)
            .and_then(|week| week.style.as_ref())
            .unwrap_or(&empty);
        resolve_cell_style(row, col)
    }

    /// Checks the week axis shape and cell-to-column referential integrity.
    pub fn validate(&self) -> Result<(), BoardValidationError> {
        validate_weeks(&self.weeks)?;

        let known: HashSet<NaiveDate> = self.weeks.iter().map(|week| week.start_date).collect();
        let mut seen_ids = HashSet::new();
        for experiment in &self.experiments {
            if !seen_ids.insert(experiment.id.as_str()) {
                return Err(BoardValidationError::DuplicateExperimentId(
                    experiment.id.clone(),
                ));
            }
            if let Some(start_date) = experiment
                .cells
                .keys()
                .find(|start_date| !known.contains(*start_date))
            {
                return Err(BoardValidationError::DanglingCell {
                    experiment_id: experiment.id.clone(),
                    start_date: *start_date,
                });
            }
        }

        Ok(())
    }
}

/// Invariant violations detected on a board value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardValidationError {
    /// A week column does not start on Sunday.
    WeekNotSunday(NaiveDate),
    /// Two consecutive columns are not exactly one week apart.
    WeekGap {
        previous: NaiveDate,
        next: NaiveDate,
    },
    /// A cell key has no matching week column.
    DanglingCell {
        experiment_id: ExperimentId,
        start_date: NaiveDate,
    },
    /// Two experiments share one id.
    DuplicateExperimentId(ExperimentId),
}

impl Display for BoardValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WeekNotSunday(date) => write!(f, "week column {date} does not start on Sunday"),
            Self::WeekGap { previous, next } => {
                write!(f, "week columns {previous} and {next} are not one week apart")
            }
            Self::DanglingCell {
                experiment_id,
                start_date,
            } => write!(
                f,
                "experiment {experiment_id} has a cell at {start_date} without a week column"
            ),
            Self::DuplicateExperimentId(id) => write!(f, "duplicate experiment id: {id}"),
        }
    }
}

impl Error for BoardValidationError {}
