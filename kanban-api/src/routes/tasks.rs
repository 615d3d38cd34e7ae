/// Task endpoints
///
/// # Endpoints
///
/// - `POST /kanban/columns/:id/tasks` - Append task to column
/// - `PUT /kanban/tasks/:id` - Update title and description
/// - `DELETE /kanban/tasks/:id` - Delete task
/// - `PUT /kanban/tasks/:id/move` - Move task within or across columns

use super::MessageResponse;
use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use kanban_shared::{auth::middleware::ActingUser, models::task::Task, service::tasks};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Create or update request
#[derive(Debug, Deserialize, Validate)]
pub struct TaskRequest {
    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    pub title: String,

    pub description: Option<String>,
}

/// Move request
///
/// Both fields are optional in the body so a missing one is reported as a
/// 400 with a clear message rather than a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct MoveTaskRequest {
    pub new_column_id: Option<Uuid>,
    pub new_position: Option<i32>,
}

/// Task response
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub id: Uuid,
    pub column_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            column_id: task.column_id,
            title: task.title,
            description: task.description,
            position: task.position,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

/// Appends a task to a column
///
/// # Endpoint
///
/// ```text
/// POST /kanban/columns/:id/tasks
/// X-User-ID: <uuid>
///
/// { "title": "Write changelog", "description": "Cover the API changes" }
/// ```
pub async fn create_task(
    State(state): State<AppState>,
    Extension(acting): Extension<ActingUser>,
    Path(column_id): Path<Uuid>,
    Json(req): Json<TaskRequest>,
) -> ApiResult<(StatusCode, Json<TaskResponse>)> {
    req.validate()?;

    let task = tasks::create_task(
        &state.db,
        acting.user_id,
        column_id,
        &req.title,
        req.description,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(task.into())))
}

/// Updates a task's title and description
pub async fn update_task(
    State(state): State<AppState>,
    Extension(acting): Extension<ActingUser>,
    Path(task_id): Path<Uuid>,
    Json(req): Json<TaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    req.validate()?;

    let task = tasks::update_task(
        &state.db,
        acting.user_id,
        task_id,
        &req.title,
        req.description,
    )
    .await?;

    Ok(Json(task.into()))
}

/// Deletes a task
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(acting): Extension<ActingUser>,
    Path(task_id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    tasks::delete_task(&state.db, acting.user_id, task_id).await?;

    Ok(Json(MessageResponse::new("Task deleted")))
}

/// Moves a task
///
/// # Endpoint
///
/// ```text
/// PUT /kanban/tasks/:id/move
/// X-User-ID: <uuid>
///
/// { "new_column_id": "uuid", "new_position": 0 }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing field, or position outside the target column
/// - `404 Not Found`: Task or target column not owned
/// - `409 Conflict`: The task was moved by a concurrent request
pub async fn move_task(
    State(state): State<AppState>,
    Extension(acting): Extension<ActingUser>,
    Path(task_id): Path<Uuid>,
    Json(req): Json<MoveTaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    let task = tasks::move_task(
        &state.db,
        acting.user_id,
        task_id,
        req.new_column_id,
        req.new_position,
    )
    .await?;

    Ok(Json(task.into()))
}
