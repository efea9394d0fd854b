//! Card API endpoints
//!
//! - POST /api/cards/create
//! - GET /api/cards/byList/:listId
//! - GET /api/cards/byBoard/:boardId
//! - PUT /api/cards/update/:cardId
//!
//! Creation and reads walk the ownership chain through the board; update
//! runs by card id alone. The byBoard listing returns every card in the
//! system together with the global count, which clients rely on.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::common::{parse_id, parse_id_field, require_field};
use crate::api::middleware::{ApiError, AppState, AuthenticatedUser};
use crate::models::{CardUpdate, ListCard};

/// Request body for card creation
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCardRequest {
    pub card_title: Option<String>,
    pub list_id: Option<Value>,
    pub board_id: Option<Value>,
}

/// Request body for card update: either a move or a rename
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCardRequest {
    pub list_id: Option<Value>,
    pub title: Option<String>,
}

/// Response carrying a card and a message
#[derive(Debug, Serialize)]
pub struct CardResponse {
    pub message: String,
    pub data: ListCard,
}

/// Response for cards by list
#[derive(Debug, Serialize)]
pub struct CardsResponse {
    pub message: String,
    pub data: Vec<ListCard>,
}

/// Response for cards by board, with the global count
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardCardsResponse {
    pub message: String,
    pub totals_cards: usize,
    pub data: Vec<ListCard>,
}

/// Build the cards router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_card))
        .route("/byList/{listId}", get(cards_by_list))
        .route("/byBoard/{boardId}", get(cards_by_board))
        .route("/update/{cardId}", put(update_card))
}

/// Decide the update kind at the boundary.
///
/// `listId` wins when both fields are present; a body with neither is
/// rejected rather than silently updating nothing.
fn decode_card_update(body: UpdateCardRequest) -> Result<CardUpdate, ApiError> {
    if let Some(raw) = body.list_id {
        let list_id = parse_id_field(Some(&raw), "Invalid listId format.")?;
        return Ok(CardUpdate::Move { list_id });
    }
    if let Some(title) = body.title {
        return Ok(CardUpdate::Rename { title });
    }
    Err(ApiError::bad_request("Either listId or title is required."))
}

/// POST /api/cards/create - create a card in an owned board's list
async fn create_card(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<CreateCardRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let board_id = parse_id_field(body.board_id.as_ref(), "Invalid boardId format.")?;
    let list_id = parse_id_field(body.list_id.as_ref(), "Invalid listId format.")?;
    let title = require_field(body.card_title, "Card title is required.")?;

    let card = state
        .card_service
        .create(user.0.id, board_id, list_id, &title)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CardResponse {
            message: "Card created successfully.".to_string(),
            data: card,
        }),
    ))
}

/// GET /api/cards/byList/:listId - cards in a list the requester can reach
async fn cards_by_list(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(list_id): Path<String>,
) -> Result<Json<CardsResponse>, ApiError> {
    let list_id = parse_id(&list_id, "Invalid listId format.")?;

    let cards = state.card_service.by_list(user.0.id, list_id).await?;

    Ok(Json(CardsResponse {
        message: "Cards fetched successfully.".to_string(),
        data: cards,
    }))
}

/// GET /api/cards/byBoard/:boardId - the global card set with its count,
/// gated on ownership of the named board
async fn cards_by_board(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(board_id): Path<String>,
) -> Result<Json<BoardCardsResponse>, ApiError> {
    let board_id = parse_id(&board_id, "Invalid boardId format.")?;

    let cards = state.card_service.all_by_board(user.0.id, board_id).await?;

    Ok(Json(BoardCardsResponse {
        message: "Cards fetched successfully.".to_string(),
        totals_cards: cards.len(),
        data: cards,
    }))
}

/// PUT /api/cards/update/:cardId - move or rename a card
async fn update_card(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(card_id): Path<String>,
    Json(body): Json<UpdateCardRequest>,
) -> Result<Json<CardResponse>, ApiError> {
    let card_id = parse_id(&card_id, "Invalid cardId format.")?;
    let update = decode_card_update(body)?;

    let card = state.card_service.update(card_id, update).await?;

    Ok(Json(CardResponse {
        message: "Card updated successfully".to_string(),
        data: card,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_move_wins_over_rename() {
        let update = decode_card_update(UpdateCardRequest {
            list_id: Some(json!(5)),
            title: Some("ignored".to_string()),
        })
        .expect("decode");
        assert_eq!(update, CardUpdate::Move { list_id: 5 });
    }

    #[test]
    fn test_decode_rename_only() {
        let update = decode_card_update(UpdateCardRequest {
            list_id: None,
            title: Some("New title".to_string()),
        })
        .expect("decode");
        assert_eq!(
            update,
            CardUpdate::Rename {
                title: "New title".to_string()
            }
        );
    }

    #[test]
    fn test_decode_empty_body_rejected() {
        let result = decode_card_update(UpdateCardRequest {
            list_id: None,
            title: None,
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_malformed_list_id_rejected() {
        let result = decode_card_update(UpdateCardRequest {
            list_id: Some(json!("not-a-number")),
            title: None,
        });
        assert!(result.is_err());
    }
}
