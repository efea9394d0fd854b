//! Board list service
//!
//! Lists are reached only through a board the requester owns. The ownership
//! check always runs against the board id supplied by the caller; rename
//! and delete then operate on the list id alone, and the list-to-board
//! linkage is not re-checked there.

use crate::db::repositories::{BoardListRepository, BoardRepository};
use crate::models::{Board, BoardList};
use anyhow::Context;
use std::sync::Arc;

/// Error types for board list operations
#[derive(Debug, thiserror::Error)]
pub enum BoardListServiceError {
    /// Invalid input
    #[error("{0}")]
    Validation(String),

    /// Board or list missing, or board not owned by the requester
    #[error("{0}")]
    NotOwned(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Board list service
pub struct BoardListService {
    board_repo: Arc<dyn BoardRepository>,
    list_repo: Arc<dyn BoardListRepository>,
}

impl BoardListService {
    pub fn new(
        board_repo: Arc<dyn BoardRepository>,
        list_repo: Arc<dyn BoardListRepository>,
    ) -> Self {
        Self {
            board_repo,
            list_repo,
        }
    }

    /// Create a list in a board the requester owns
    pub async fn create(
        &self,
        user_id: i64,
        board_id: i64,
        title: &str,
    ) -> Result<BoardList, BoardListServiceError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(BoardListServiceError::Validation(
                "Title is required.".to_string(),
            ));
        }

        self.board_repo
            .find_owned(board_id, user_id)
            .await
            .context("Failed to check board")?
            .ok_or_else(|| {
                BoardListServiceError::NotOwned(
                    "Invalid boardId or user not authorized".to_string(),
                )
            })?;

        let list = self
            .list_repo
            .create(&BoardList::new(title.to_string(), board_id))
            .await
            .context("Failed to create list")?;

        Ok(list)
    }

    /// The board plus all its lists, for a board the requester owns
    pub async fn list(
        &self,
        user_id: i64,
        board_id: i64,
    ) -> Result<(Board, Vec<BoardList>), BoardListServiceError> {
        let board = self
            .board_repo
            .find_owned(board_id, user_id)
            .await
            .context("Failed to check board")?
            .ok_or_else(|| BoardListServiceError::NotOwned("Invalid boardId.".to_string()))?;

        let lists = self
            .list_repo
            .list_by_board(board_id)
            .await
            .context("Failed to fetch lists")?;

        Ok((board, lists))
    }

    /// Rename a list after validating ownership of the stated board
    pub async fn rename(
        &self,
        user_id: i64,
        board_id: i64,
        list_id: i64,
        title: &str,
    ) -> Result<BoardList, BoardListServiceError> {
        self.board_repo
            .find_owned(board_id, user_id)
            .await
            .context("Failed to check board")?
            .ok_or_else(|| BoardListServiceError::NotOwned("Invalid boardId.".to_string()))?;

        self.list_repo
            .rename(list_id, title)
            .await
            .context("Failed to update list")?
            .ok_or_else(|| BoardListServiceError::NotOwned("Error updating list".to_string()))
    }

    /// Delete a list after validating ownership of the stated board.
    ///
    /// Child cards are left in place.
    pub async fn delete(
        &self,
        user_id: i64,
        board_id: i64,
        list_id: i64,
    ) -> Result<(), BoardListServiceError> {
        self.board_repo
            .find_owned(board_id, user_id)
            .await
            .context("Failed to check board")?
            .ok_or_else(|| BoardListServiceError::NotOwned("Invalid boardId.".to_string()))?;

        let deleted = self
            .list_repo
            .delete(list_id)
            .await
            .context("Failed to delete list")?;

        if !deleted {
            return Err(BoardListServiceError::NotOwned(
                "Error deleting list".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::{SqlxBoardListRepository, SqlxBoardRepository};
    use crate::db::{create_test_pool, migrations};
    use crate::models::Board as BoardModel;

    async fn setup() -> (BoardListService, Arc<dyn BoardRepository>) {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        let board_repo = SqlxBoardRepository::boxed(pool.clone());
        let list_repo = SqlxBoardListRepository::boxed(pool);
        (
            BoardListService::new(board_repo.clone(), list_repo),
            board_repo,
        )
    }

    async fn make_board(repo: &Arc<dyn BoardRepository>, user_id: i64) -> i64 {
        repo.create(&BoardModel::new("Board".to_string(), user_id))
            .await
            .expect("Failed to create board")
            .id
    }

    #[tokio::test]
    async fn test_create_requires_owned_board() {
        let (service, board_repo) = setup().await;
        let board_id = make_board(&board_repo, 1).await;

        let list = service.create(1, board_id, "Todo").await.expect("create");
        assert_eq!(list.board_id, board_id);

        let denied = service.create(2, board_id, "Sneaky").await;
        assert!(matches!(denied, Err(BoardListServiceError::NotOwned(_))));

        let missing = service.create(1, 999, "Nowhere").await;
        assert!(matches!(missing, Err(BoardListServiceError::NotOwned(_))));
    }

    #[tokio::test]
    async fn test_list_returns_board_and_lists() {
        let (service, board_repo) = setup().await;
        let board_id = make_board(&board_repo, 1).await;
        service.create(1, board_id, "Todo").await.expect("create");
        service.create(1, board_id, "Done").await.expect("create");

        let (board, lists) = service.list(1, board_id).await.expect("list");
        assert_eq!(board.id, board_id);
        assert_eq!(lists.len(), 2);

        let denied = service.list(2, board_id).await;
        assert!(matches!(denied, Err(BoardListServiceError::NotOwned(_))));
    }

    #[tokio::test]
    async fn test_rename_and_delete() {
        let (service, board_repo) = setup().await;
        let board_id = make_board(&board_repo, 1).await;
        let list = service.create(1, board_id, "Old").await.expect("create");

        let renamed = service
            .rename(1, board_id, list.id, "New")
            .await
            .expect("rename");
        assert_eq!(renamed.title, "New");

        let denied = service.rename(2, board_id, list.id, "Nope").await;
        assert!(matches!(denied, Err(BoardListServiceError::NotOwned(_))));

        service
            .delete(1, board_id, list.id)
            .await
            .expect("delete");
        let gone = service.rename(1, board_id, list.id, "Gone").await;
        assert!(matches!(gone, Err(BoardListServiceError::NotOwned(_))));
    }
}
