//! Owned board state with snapshot-after-mutation persistence.
//!
//! # Responsibility
//! - Hold the one live board value of a process together with its store.
//! - Thread every mutation through a single update path.
//! - Snapshot the whole board after each applied mutation.
//!
//! # Invariants
//! - The persisted document always equals the board after the last applied
//!   mutation whose save returned `Ok`.
//! - Mutations targeting unknown ids do not touch storage.

use crate::model::board::Board;
use crate::model::ops::BoardMutation;
use crate::model::task::Task;
use crate::model::theme::Theme;
use crate::repo::kv_repo::{KvRepository, RepoResult};
use crate::service::board_store::{BoardStore, LoadSource};
use chrono::NaiveDate;
use log::debug;

/// Live board plus the store it is persisted to.
pub struct BoardSession<R: KvRepository> {
    store: BoardStore<R>,
    board: Board,
    source: LoadSource,
}

impl<R: KvRepository> BoardSession<R> {
    /// Loads the board (seeding or recovering when needed) and starts a session.
    pub fn open(store: BoardStore<R>) -> RepoResult<Self> {
        let (board, source) = store.load_or_seed()?;
        Ok(Self {
            store,
            board,
            source,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Reports whether the initial board was stored, seeded or recovered.
    pub fn source(&self) -> LoadSource {
        self.source
    }

    /// Underlying store, for slot maintenance such as [`BoardStore::clear`].
    pub fn store(&self) -> &BoardStore<R> {
        &self.store
    }

    /// Applies one mutation and persists the result.
    ///
    /// Mutations whose targets are unknown leave the board as is and skip
    /// the write.
    pub fn apply(&mut self, mutation: BoardMutation) -> RepoResult<&Board> {
        let kind = mutation.kind();
        if !mutation.targets_known(&self.board) {
            debug!("event=board_mutation module=session status=noop kind={kind}");
            return Ok(&self.board);
        }

        self.update(|board| mutation.apply(board))?;
        debug!("event=board_mutation module=session status=ok kind={kind}");
        Ok(&self.board)
    }

    /// Replaces the board with `f(board)` and persists the result.
    ///
    /// The in-memory board is updated even when the save fails.
    pub fn update(&mut self, f: impl FnOnce(Board) -> Board) -> RepoResult<&Board> {
        let current = std::mem::take(&mut self.board);
        self.board = f(current);
        self.store.save(&self.board)?;
        Ok(&self.board)
    }

    /// Computes a new task list from the current cell content and applies it.
    pub fn edit_cell_tasks(
        &mut self,
        experiment_id: &str,
        start_date: NaiveDate,
        edit: impl FnOnce(&[Task]) -> Vec<Task>,
    ) -> RepoResult<&Board> {
        let current = self
            .board
            .experiment(experiment_id)
            .map(|experiment| experiment.tasks(start_date))
            .unwrap_or(&[]);
        let tasks = edit(current);
        self.apply(BoardMutation::SetCellTasks {
            experiment_id: experiment_id.to_string(),
            start_date,
            tasks,
        })
    }

    /// Returns the saved theme or the light default.
    pub fn theme(&self) -> RepoResult<Theme> {
        Ok(self.store.load_theme()?.unwrap_or_default())
    }

    pub fn set_theme(&self, theme: Theme) -> RepoResult<()> {
        self.store.save_theme(theme)
    }

    pub fn into_board(self) -> Board {
        self.board
    }
}
