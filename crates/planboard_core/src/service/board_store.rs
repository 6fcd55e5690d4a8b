//! Board persistence adapter.
//!
//! # Responsibility
//! - Load and save the whole board document under one fixed slot key.
//! - Seed a fresh board when nothing was saved yet.
//! - Persist the theme preference under its own independent key.
//!
//! # Invariants
//! - `save` writes the complete document; `load(save(b)) == b`.
//! - A seeded board is not written until the first `save`.
//! - Loaded boards pass `Board::validate`; anything else is `InvalidData`.

use crate::model::board::Board;
use crate::model::seed::seed_board;
use crate::model::theme::Theme;
use crate::repo::kv_repo::{KvRepository, RepoError, RepoResult};
use log::{info, warn};

/// Slot key of the board document.
pub const BOARD_STATE_KEY: &str = "experimentBoardData";
/// Slot key of the theme preference.
pub const THEME_KEY: &str = "theme";

/// Where a loaded board came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Decoded from the board slot.
    Stored,
    /// Slot was empty; the seed board was generated.
    Seeded,
    /// Slot held a malformed document; the seed board was generated instead.
    Recovered,
}

/// Board document store over a key-value repository.
pub struct BoardStore<R: KvRepository> {
    repo: R,
}

impl<R: KvRepository> BoardStore<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Loads the saved board, or the seed board when the slot is empty.
    ///
    /// # Errors
    /// - `InvalidData` when the stored JSON does not decode into a board or
    ///   the decoded board violates its invariants.
    /// - `Db` on storage failures.
    pub fn load(&self) -> RepoResult<Board> {
        self.load_with_source().map(|(board, _)| board)
    }

    /// Loads the board and reports whether it was stored or seeded.
    pub fn load_with_source(&self) -> RepoResult<(Board, LoadSource)> {
        let Some(raw) = self.repo.get(BOARD_STATE_KEY)? else {
            info!("event=board_load module=store status=ok source=seed");
            return Ok((seed_board(), LoadSource::Seeded));
        };

        let board = decode_board(&raw)?;
        info!(
            "event=board_load module=store status=ok source=stored experiments={} weeks={}",
            board.experiments.len(),
            board.weeks.len()
        );
        Ok((board, LoadSource::Stored))
    }

    /// Loads the board, falling back to the seed board on malformed data.
    ///
    /// Storage transport failures are still returned as errors.
    pub fn load_or_seed(&self) -> RepoResult<(Board, LoadSource)> {
        match self.load_with_source() {
            Err(RepoError::InvalidData(message)) => {
                warn!(
                    "event=board_load module=store status=fallback error_code=invalid_board error={}",
                    message
                );
                Ok((seed_board(), LoadSource::Recovered))
            }
            other => other,
        }
    }

    /// Serializes and stores the complete board, replacing any prior value.
    pub fn save(&self, board: &Board) -> RepoResult<()> {
        let json = encode_board(board)?;
        self.repo.put(BOARD_STATE_KEY, &json)
    }

    /// Removes the stored board so the next load seeds again.
    pub fn clear(&self) -> RepoResult<()> {
        self.repo.remove(BOARD_STATE_KEY)
    }

    /// Returns the saved theme, `None` when never set.
    pub fn load_theme(&self) -> RepoResult<Option<Theme>> {
        match self.repo.get(THEME_KEY)? {
            Some(raw) => raw.parse().map(Some).map_err(RepoError::InvalidData),
            None => Ok(None),
        }
    }

    pub fn save_theme(&self, theme: Theme) -> RepoResult<()> {
        self.repo.put(THEME_KEY, theme.as_str())
    }
}

/// Encodes a board into its persisted JSON layout.
pub fn encode_board(board: &Board) -> RepoResult<String> {
    serde_json::to_string(board).map_err(RepoError::Serialization)
}

/// Decodes and validates a persisted board document.
pub fn decode_board(raw: &str) -> RepoResult<Board> {
    let board: Board = serde_json::from_str(raw)
        .map_err(|err| RepoError::InvalidData(format!("board document: {err}")))?;
    board.validate()?;
    Ok(board)
}
