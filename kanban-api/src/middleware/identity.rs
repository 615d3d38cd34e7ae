/// Acting-user middleware
///
/// Resolves `X-User-ID` into an [`ActingUser`] and stores it in the request
/// extensions, where handlers pick it up with `Extension<ActingUser>`.
/// Requests without a valid header never reach a handler.

use crate::{app::AppState, error::ApiError};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use kanban_shared::auth::middleware::{resolve_acting_user, ActingUser};

/// Rejects the request unless it names an existing user
pub async fn acting_user_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let acting: ActingUser = resolve_acting_user(&state.db, req.headers()).await?;

    req.extensions_mut().insert(acting);

    Ok(next.run(req).await)
}
