//! Board service
//!
//! All operations run on behalf of an authenticated user and are scoped to
//! boards that user created. A board that exists but belongs to someone
//! else is reported with the same error as one that doesn't exist, so
//! responses never leak which boards are present.

use crate::db::repositories::BoardRepository;
use crate::models::Board;
use anyhow::Context;
use std::sync::Arc;

/// Error types for board operations
#[derive(Debug, thiserror::Error)]
pub enum BoardServiceError {
    /// Invalid input
    #[error("{0}")]
    Validation(String),

    /// Board missing or not owned by the requester
    #[error("{0}")]
    NotOwned(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Board service
pub struct BoardService {
    board_repo: Arc<dyn BoardRepository>,
}

impl BoardService {
    pub fn new(board_repo: Arc<dyn BoardRepository>) -> Self {
        Self { board_repo }
    }

    /// Create a board owned by the requester
    pub async fn create(&self, user_id: i64, title: &str) -> Result<Board, BoardServiceError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(BoardServiceError::Validation(
                "Invalid board data.".to_string(),
            ));
        }

        let board = self
            .board_repo
            .create(&Board::new(title.to_string(), user_id))
            .await
            .context("Failed to create board")?;

        Ok(board)
    }

    /// All boards owned by the requester
    pub async fn list(&self, user_id: i64) -> Result<Vec<Board>, BoardServiceError> {
        let boards = self
            .board_repo
            .list_by_owner(user_id)
            .await
            .context("Error fetching boards.")?;
        Ok(boards)
    }

    /// Rename a board the requester owns
    pub async fn rename(
        &self,
        user_id: i64,
        board_id: i64,
        title: &str,
    ) -> Result<Board, BoardServiceError> {
        self.board_repo
            .rename_owned(board_id, user_id, title)
            .await
            .context("Failed to update board")?
            .ok_or_else(|| BoardServiceError::NotOwned("Error updating the board.".to_string()))
    }

    /// Delete a board the requester owns.
    ///
    /// Child lists and cards are left in place.
    pub async fn delete(&self, user_id: i64, board_id: i64) -> Result<(), BoardServiceError> {
        let deleted = self
            .board_repo
            .delete_owned(board_id, user_id)
            .await
            .context("Failed to delete board")?;

        if !deleted {
            return Err(BoardServiceError::NotOwned(
                "Invalid boardId mentioned.".to_string(),
            ));
        }
        Ok(())
    }
}
