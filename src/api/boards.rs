//! Board API endpoints
//!
//! - POST /api/board/create
//! - GET /api/board/list
//! - PUT /api/board/update/:id
//! - DELETE /api/board/delete/:id
//!
//! All routes require authentication; every operation is scoped to boards
//! the requester created. Update answers 201 for compatibility with
//! existing clients.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::api::common::{parse_id, require_field};
use crate::api::middleware::{ApiError, AppState, AuthenticatedUser};
use crate::models::Board;

/// Request body for creating or updating a board
#[derive(Debug, Deserialize)]
pub struct BoardRequest {
    pub title: Option<String>,
}

/// Response for board creation
#[derive(Debug, Serialize)]
pub struct CreateBoardResponse {
    pub id: i64,
    pub title: String,
    pub message: String,
}

/// Response for board listing
#[derive(Debug, Serialize)]
pub struct BoardListResponse {
    pub data: Vec<Board>,
}

/// Response for board update
#[derive(Debug, Serialize)]
pub struct UpdateBoardResponse {
    pub data: Board,
    pub message: String,
}

/// Response carrying only a message
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Build the board router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_board))
        .route("/list", get(list_boards))
        .route("/update/{id}", put(update_board))
        .route("/delete/{id}", delete(delete_board))
}

/// POST /api/board/create - create a board owned by the requester
async fn create_board(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<BoardRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let title = require_field(body.title, "Invalid board data.")?;

    let board = state.board_service.create(user.0.id, &title).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateBoardResponse {
            id: board.id,
            title: board.title,
            message: "Board created successfully".to_string(),
        }),
    ))
}

/// GET /api/board/list - all boards owned by the requester
async fn list_boards(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<BoardListResponse>, ApiError> {
    let boards = state.board_service.list(user.0.id).await?;
    Ok(Json(BoardListResponse { data: boards }))
}

/// PUT /api/board/update/:id - rename a board the requester owns
async fn update_board(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    Json(body): Json<BoardRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let board_id = parse_id(&id, "BoardId or Title is invalid.")?;
    let title = require_field(body.title, "BoardId or Title is invalid.")?;

    let board = state
        .board_service
        .rename(user.0.id, board_id, &title)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(UpdateBoardResponse {
            data: board,
            message: "Board updated successfully".to_string(),
        }),
    ))
}

/// DELETE /api/board/delete/:id - delete a board the requester owns.
///
/// Lists and cards under the board are left in place.
async fn delete_board(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let board_id = parse_id(&id, "BoardId is not Present.")?;

    state.board_service.delete(user.0.id, board_id).await?;

    Ok(Json(MessageResponse {
        message: "Board deleted successfully.".to_string(),
    }))
}
