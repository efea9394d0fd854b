//! List card service
//!
//! Card creation and reads walk the full ownership chain
//! (card -> list -> board -> user). Updates intentionally do not: any
//! authenticated user may rename or move a card by id. Likewise
//! `all_by_board` validates board ownership but then returns every card
//! in the system; clients rely on the global count.

use crate::db::repositories::{BoardListRepository, BoardRepository, ListCardRepository};
use crate::models::{CardUpdate, ListCard};
use anyhow::Context;
use std::sync::Arc;

/// Error types for card operations
#[derive(Debug, thiserror::Error)]
pub enum ListCardServiceError {
    /// Invalid input
    #[error("{0}")]
    Validation(String),

    /// Some link in the ownership chain is missing or not authorized
    #[error("{0}")]
    NotOwned(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// List card service
pub struct ListCardService {
    board_repo: Arc<dyn BoardRepository>,
    list_repo: Arc<dyn BoardListRepository>,
    card_repo: Arc<dyn ListCardRepository>,
}

impl ListCardService {
    pub fn new(
        board_repo: Arc<dyn BoardRepository>,
        list_repo: Arc<dyn BoardListRepository>,
        card_repo: Arc<dyn ListCardRepository>,
    ) -> Self {
        Self {
            board_repo,
            list_repo,
            card_repo,
        }
    }

    /// Create a card in a list, verifying the board is owned by the
    /// requester and the list belongs to that board.
    pub async fn create(
        &self,
        user_id: i64,
        board_id: i64,
        list_id: i64,
        title: &str,
    ) -> Result<ListCard, ListCardServiceError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ListCardServiceError::Validation(
                "Card title is required.".to_string(),
            ));
        }

        self.board_repo
            .find_owned(board_id, user_id)
            .await
            .context("Failed to check board")?
            .ok_or_else(|| {
                ListCardServiceError::NotOwned(
                    "Invalid boardId or user not authorized".to_string(),
                )
            })?;

        self.list_repo
            .find_in_board(list_id, board_id)
            .await
            .context("Failed to check list")?
            .ok_or_else(|| {
                ListCardServiceError::NotOwned(
                    "Invalid listId or the list does not belong to the provided board.".to_string(),
                )
            })?;

        let card = self
            .card_repo
            .create(&ListCard::new(title.to_string(), list_id))
            .await
            .context("Error creating card.")?;

        Ok(card)
    }

    /// Cards in a list, resolved through the list's own board
    pub async fn by_list(
        &self,
        user_id: i64,
        list_id: i64,
    ) -> Result<Vec<ListCard>, ListCardServiceError> {
        let list = self
            .list_repo
            .get_by_id(list_id)
            .await
            .context("Failed to fetch list")?
            .ok_or_else(|| ListCardServiceError::NotOwned("Invalid listId.".to_string()))?;

        self.board_repo
            .find_owned(list.board_id, user_id)
            .await
            .context("Failed to check board")?
            .ok_or_else(|| {
                ListCardServiceError::NotOwned(
                    "The board does not belong to this user.".to_string(),
                )
            })?;

        let cards = self
            .card_repo
            .list_by_list(list_id)
            .await
            .context("Error fetching cards.")?;

        Ok(cards)
    }

    /// Every card in the system, gated on ownership of the stated board.
    ///
    /// The result is NOT filtered to the board: clients depend on the
    /// global card set and its count.
    pub async fn all_by_board(
        &self,
        user_id: i64,
        board_id: i64,
    ) -> Result<Vec<ListCard>, ListCardServiceError> {
        self.board_repo
            .find_owned(board_id, user_id)
            .await
            .context("Failed to check board")?
            .ok_or_else(|| {
                ListCardServiceError::NotOwned(
                    "Invalid boardId or user not authorized".to_string(),
                )
            })?;

        let cards = self
            .card_repo
            .list_all()
            .await
            .context("Error fetching cards.")?;

        Ok(cards)
    }

    /// Apply a move or rename to a card. Not ownership-checked.
    pub async fn update(
        &self,
        card_id: i64,
        update: CardUpdate,
    ) -> Result<ListCard, ListCardServiceError> {
        self.card_repo
            .update(card_id, &update)
            .await
            .context("Failed to update card")?
            .ok_or_else(|| ListCardServiceError::NotOwned("Error updating card.".to_string()))
    }
}
