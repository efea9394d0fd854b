//! Board list API endpoints
//!
//! - POST /api/boardList/create
//! - GET /api/boardList/list/:boardId
//! - PUT /api/boardList/update/:listId
//! - DELETE /api/boardList/delete/:listId
//!
//! Every operation validates that the board named in the request is owned
//! by the requester before touching the list. Update and delete take the
//! board id in the body; update answers 201 for compatibility with
//! existing clients.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::common::{parse_id, parse_id_field, require_field};
use crate::api::middleware::{ApiError, AppState, AuthenticatedUser};
use crate::models::{Board, BoardList};

/// Request body for list operations
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardListRequest {
    pub title: Option<String>,
    pub board_id: Option<Value>,
}

/// Response for list creation
#[derive(Debug, Serialize)]
pub struct CreateListResponse {
    pub message: String,
    pub id: i64,
    pub title: String,
}

/// Response for listing a board's lists
#[derive(Debug, Serialize)]
pub struct ListsResponse {
    pub board: Board,
    pub data: Vec<BoardList>,
}

/// Response for list update
#[derive(Debug, Serialize)]
pub struct UpdateListResponse {
    pub list: BoardList,
    pub message: String,
}

/// Response carrying only a message
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Build the board list router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_list))
        .route("/list/{boardId}", get(get_lists))
        .route("/update/{listId}", put(update_list))
        .route("/delete/{listId}", delete(delete_list))
}

/// POST /api/boardList/create - create a list in an owned board
async fn create_list(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<BoardListRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let board_id = parse_id_field(body.board_id.as_ref(), "Invalid boardId format.")?;
    let title = require_field(body.title, "Title is required.")?;

    let list = state
        .list_service
        .create(user.0.id, board_id, &title)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateListResponse {
            message: "List created successfully".to_string(),
            id: list.id,
            title: list.title,
        }),
    ))
}

/// GET /api/boardList/list/:boardId - the board plus all its lists
async fn get_lists(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(board_id): Path<String>,
) -> Result<Json<ListsResponse>, ApiError> {
    let board_id = parse_id(&board_id, "Invalid boardId format.")?;

    let (board, lists) = state.list_service.list(user.0.id, board_id).await?;

    Ok(Json(ListsResponse { board, data: lists }))
}

/// PUT /api/boardList/update/:listId - rename a list
///
/// Ownership is checked against the board id in the body; the update then
/// runs by list id alone.
async fn update_list(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(list_id): Path<String>,
    Json(body): Json<BoardListRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let list_id = parse_id(&list_id, "Invalid listId format.")?;
    let board_id = parse_id_field(body.board_id.as_ref(), "Invalid boardId format.")?;
    let title = require_field(body.title, "Title is required.")?;

    let list = state
        .list_service
        .rename(user.0.id, board_id, list_id, &title)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(UpdateListResponse {
            list,
            message: "List updated successfully.".to_string(),
        }),
    ))
}

/// DELETE /api/boardList/delete/:listId - delete a list.
///
/// Cards under the list are left in place.
async fn delete_list(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(list_id): Path<String>,
    Json(body): Json<BoardListRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let list_id = parse_id(&list_id, "Invalid listId format.")?;
    let board_id = parse_id_field(body.board_id.as_ref(), "Invalid boardId format.")?;

    state
        .list_service
        .delete(user.0.id, board_id, list_id)
        .await?;

    Ok(Json(MessageResponse {
        message: "List deleted successfully.".to_string(),
    }))
}
