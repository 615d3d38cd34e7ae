/// Column endpoints
///
/// # Endpoints
///
/// - `POST /kanban/boards/:id/columns` - Append column to board
/// - `PUT /kanban/boards/:id/columns/reorder` - Apply a batch of positions
/// - `PUT /kanban/columns/:id` - Rename column
/// - `DELETE /kanban/columns/:id` - Delete column and its tasks

use super::MessageResponse;
use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use kanban_shared::{
    auth::middleware::ActingUser,
    models::column::Column,
    service::columns::{self, ColumnPosition},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Create or rename request
#[derive(Debug, Deserialize, Validate)]
pub struct ColumnRequest {
    #[validate(length(max = 120, message = "Name must be at most 120 characters"))]
    pub name: String,
}

/// Column response
#[derive(Debug, Serialize)]
pub struct ColumnResponse {
    pub id: Uuid,
    pub board_id: Uuid,
    pub name: String,
    pub position: i32,
}

impl From<Column> for ColumnResponse {
    fn from(column: Column) -> Self {
        Self {
            id: column.id,
            board_id: column.board_id,
            name: column.name,
            position: column.position,
        }
    }
}

/// Appends a column to a board
///
/// # Endpoint
///
/// ```text
/// POST /kanban/boards/:id/columns
/// X-User-ID: <uuid>
///
/// { "name": "In review" }
/// ```
///
/// The column lands after the current last column.
pub async fn create_column(
    State(state): State<AppState>,
    Extension(acting): Extension<ActingUser>,
    Path(board_id): Path<Uuid>,
    Json(req): Json<ColumnRequest>,
) -> ApiResult<(StatusCode, Json<ColumnResponse>)> {
    req.validate()?;

    let column = columns::create_column(&state.db, acting.user_id, board_id, &req.name).await?;

    Ok((StatusCode::CREATED, Json(column.into())))
}

/// Reorders a board's columns
///
/// # Endpoint
///
/// ```text
/// PUT /kanban/boards/:id/columns/reorder
/// X-User-ID: <uuid>
///
/// [ { "id": "uuid-a", "position": 1 }, { "id": "uuid-b", "position": 0 } ]
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Resulting positions are not `0..count` without gaps
/// - `404 Not Found`: Board not owned, or an id is not one of its columns
pub async fn reorder_columns(
    State(state): State<AppState>,
    Extension(acting): Extension<ActingUser>,
    Path(board_id): Path<Uuid>,
    Json(batch): Json<Vec<ColumnPosition>>,
) -> ApiResult<Json<MessageResponse>> {
    columns::reorder_columns(&state.db, acting.user_id, board_id, &batch).await?;

    Ok(Json(MessageResponse::new("Columns reordered")))
}

/// Renames a column
pub async fn update_column(
    State(state): State<AppState>,
    Extension(acting): Extension<ActingUser>,
    Path(column_id): Path<Uuid>,
    Json(req): Json<ColumnRequest>,
) -> ApiResult<Json<ColumnResponse>> {
    req.validate()?;

    let column = columns::update_column(&state.db, acting.user_id, column_id, &req.name).await?;

    Ok(Json(column.into()))
}

/// Deletes a column
pub async fn delete_column(
    State(state): State<AppState>,
    Extension(acting): Extension<ActingUser>,
    Path(column_id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    columns::delete_column(&state.db, acting.user_id, column_id).await?;

    Ok(Json(MessageResponse::new("Column deleted")))
}
