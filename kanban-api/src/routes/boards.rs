/// Board endpoints
///
/// # Endpoints
///
/// - `POST /kanban/boards` - Create board
/// - `GET /kanban/boards` - List boards in creation order
/// - `GET /kanban/boards/:id` - Board with ordered columns and tasks
/// - `PUT /kanban/boards/:id` - Rename board
/// - `DELETE /kanban/boards/:id` - Delete board, its columns and tasks

use super::MessageResponse;
use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use kanban_shared::{
    aggregate::BoardDetail, auth::middleware::ActingUser, models::board::Board, service::boards,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Create or rename request
#[derive(Debug, Deserialize, Validate)]
pub struct BoardRequest {
    #[validate(length(max = 120, message = "Name must be at most 120 characters"))]
    pub name: String,
}

/// Board response
#[derive(Debug, Serialize)]
pub struct BoardResponse {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Board> for BoardResponse {
    fn from(board: Board) -> Self {
        Self {
            id: board.id,
            name: board.name,
            created_at: board.created_at,
            updated_at: board.updated_at,
        }
    }
}

/// Creates a board
///
/// # Endpoint
///
/// ```text
/// POST /kanban/boards
/// X-User-ID: <uuid>
///
/// { "name": "Roadmap" }
/// ```
pub async fn create_board(
    State(state): State<AppState>,
    Extension(acting): Extension<ActingUser>,
    Json(req): Json<BoardRequest>,
) -> ApiResult<(StatusCode, Json<BoardResponse>)> {
    req.validate()?;

    let board = boards::create_board(&state.db, acting.user_id, &req.name).await?;

    Ok((StatusCode::CREATED, Json(board.into())))
}

/// Lists the acting user's boards
pub async fn list_boards(
    State(state): State<AppState>,
    Extension(acting): Extension<ActingUser>,
) -> ApiResult<Json<Vec<BoardResponse>>> {
    let boards = boards::list_boards(&state.db, acting.user_id).await?;

    Ok(Json(boards.into_iter().map(BoardResponse::from).collect()))
}

/// Returns a board with columns and tasks sorted by position
///
/// # Response
///
/// ```json
/// {
///   "id": "uuid",
///   "name": "Roadmap",
///   "columns": [
///     { "id": "uuid", "name": "Todo", "position": 0, "tasks": [] }
///   ]
/// }
/// ```
pub async fn get_board(
    State(state): State<AppState>,
    Extension(acting): Extension<ActingUser>,
    Path(board_id): Path<Uuid>,
) -> ApiResult<Json<BoardDetail>> {
    let detail = boards::get_board_detail(&state.db, acting.user_id, board_id).await?;

    Ok(Json(detail))
}

/// Renames a board
pub async fn update_board(
    State(state): State<AppState>,
    Extension(acting): Extension<ActingUser>,
    Path(board_id): Path<Uuid>,
    Json(req): Json<BoardRequest>,
) -> ApiResult<Json<BoardResponse>> {
    req.validate()?;

    let board = boards::update_board(&state.db, acting.user_id, board_id, &req.name).await?;

    Ok(Json(board.into()))
}

/// Deletes a board
pub async fn delete_board(
    State(state): State<AppState>,
    Extension(acting): Extension<ActingUser>,
    Path(board_id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    boards::delete_board(&state.db, acting.user_id, board_id).await?;

    Ok(Json(MessageResponse::new("Board deleted")))
}
