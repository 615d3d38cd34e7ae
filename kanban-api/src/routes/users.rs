/// User endpoints
///
/// # Endpoints
///
/// - `POST /kanban/users` - Register a user (no `X-User-ID` needed)
/// - `DELETE /kanban/users/me` - Delete the acting user and everything they own

use super::MessageResponse;
use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, http::StatusCode, Extension, Json};
use chrono::{DateTime, Utc};
use kanban_shared::{auth::middleware::ActingUser, models::user::User, service::users};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Registration request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(max = 120, message = "Username must be at most 120 characters"))]
    pub username: String,
}

/// User response
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            created_at: user.created_at,
        }
    }
}

/// Registers a user
///
/// # Endpoint
///
/// ```text
/// POST /kanban/users
/// Content-Type: application/json
///
/// { "username": "ada" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Blank username
/// - `409 Conflict`: Username taken
/// - `422 Unprocessable Entity`: Username too long
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    req.validate()?;

    let user = users::create_user(&state.db, &req.username).await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Deletes the acting user
///
/// Boards, columns and tasks go with them.
pub async fn delete_me(
    State(state): State<AppState>,
    Extension(acting): Extension<ActingUser>,
) -> ApiResult<Json<MessageResponse>> {
    users::delete_user(&state.db, acting.user_id).await?;

    Ok(Json(MessageResponse::new("User deleted")))
}
