/// Per-user read endpoints
///
/// - `GET /kanban/stats` - Counts of boards, columns and tasks
/// - `GET /kanban/sync` - Every board, fully nested

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Extension, Json};
use kanban_shared::{
    aggregate::{Snapshot, UserStats},
    auth::middleware::ActingUser,
    service::boards,
};

pub async fn get_stats(
    State(state): State<AppState>,
    Extension(acting): Extension<ActingUser>,
) -> ApiResult<Json<UserStats>> {
    Ok(Json(boards::get_user_stats(&state.db, acting.user_id).await?))
}

pub async fn sync_all(
    State(state): State<AppState>,
    Extension(acting): Extension<ActingUser>,
) -> ApiResult<Json<Snapshot>> {
    Ok(Json(boards::sync_all(&state.db, acting.user_id).await?))
}
