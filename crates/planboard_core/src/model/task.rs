//! Cell task model and task-list edits.
//!
//! # Responsibility
//! - Define the task record stored inside one board cell.
//! - Compute whole replacement lists for add/edit/toggle/delete flows.
//!
//! # Invariants
//! - `id` is assigned at creation and never changes afterwards.
//! - List helpers never mutate their input; unknown ids return an equal list.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a task within the board document.
///
/// Seed data uses short ids such as `task_1`, so this stays a string.
pub type TaskId = String;

/// One checklist item inside a cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    /// Short title shown in the cell and in exports.
    pub text: String,
    /// Free-form notes; empty for newly added tasks.
    pub description: String,
    pub completed: bool,
}

impl Task {
    /// Creates an incomplete task with a generated id and empty description.
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_id(new_task_id(), text)
    }

    /// Creates an incomplete task with a caller-provided id.
    ///
    /// Used by seed data where ids are fixed.
    pub fn with_id(id: impl Into<TaskId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            description: String::new(),
            completed: false,
        }
    }

    /// Returns a copy with `description` replaced.
    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Returns a copy with `completed` replaced.
    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }
}

/// Generates a process-unique task id.
pub fn new_task_id() -> TaskId {
    format!("task_{}", Uuid::new_v4().simple())
}

/// Returns `tasks` with one new task appended.
///
/// Text is trimmed; blank input leaves the list unchanged.
pub fn append_task(tasks: &[Task], text: &str) -> Vec<Task> {
    let trimmed = text.trim();
    let mut next = tasks.to_vec();
    if !trimmed.is_empty() {
        next.push(Task::new(trimmed));
    }
    next
}

/// Returns `tasks` with the completion flag of `task_id` flipped.
pub fn toggle_task(tasks: &[Task], task_id: &str) -> Vec<Task> {
    tasks
        .iter()
        .map(|task| {
            if task.id == task_id {
                Task {
                    completed: !task.completed,
                    ..task.clone()
                }
            } else {
                task.clone()
            }
        })
        .collect()
}

/// Returns `tasks` with the entry sharing `updated.id` replaced by `updated`.
pub fn update_task(tasks: &[Task], updated: &Task) -> Vec<Task> {
    tasks
        .iter()
        .map(|task| {
            if task.id == updated.id {
                updated.clone()
            } else {
                task.clone()
            }
        })
        .collect()
}

/// Returns `tasks` with the title and notes of `task_id` edited.
///
/// Text is trimmed and a blank title keeps the current one; `None` keeps the
/// current description. Id and completion flag are preserved.
pub fn edit_task(
    tasks: &[Task],
    task_id: &str,
    text: &str,
    description: Option<&str>,
) -> Vec<Task> {
    let Some(current) = tasks.iter().find(|task| task.id == task_id) else {
        return tasks.to_vec();
    };

    let trimmed = text.trim();
    let edited = Task {
        text: if trimmed.is_empty() {
            current.text.clone()
        } else {
            trimmed.to_string()
        },
        description: description.map_or_else(|| current.description.clone(), str::to_string),
        ..current.clone()
    };
    update_task(tasks, &edited)
}

/// Returns `tasks` without the entry identified by `task_id`.
pub fn remove_task(tasks: &[Task], task_id: &str) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| task.id != task_id)
        .cloned()
        .collect()
}
