/// Acting-user resolution for Axum
///
/// Authentication happens upstream of this service; by the time a request
/// reaches us the caller's user id is carried in the `X-User-ID` header. This
/// module turns that header into an [`ActingUser`] after confirming the user
/// exists. Kanban operations never read ambient context: handlers pass
/// `ActingUser::user_id` explicitly into every service call.
///
/// # Example
///
/// ```no_run
/// use axum::{extract::Request, middleware::Next, response::Response};
/// use kanban_shared::auth::middleware::{resolve_acting_user, IdentityError};
/// use sqlx::PgPool;
///
/// async fn layer(pool: PgPool, mut req: Request, next: Next) -> Result<Response, IdentityError> {
///     let acting = resolve_acting_user(&pool, req.headers()).await?;
///     req.extensions_mut().insert(acting);
///     Ok(next.run(req).await)
/// }
/// ```

use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::user::User;

/// Header carrying the caller's user id
pub const USER_ID_HEADER: &str = "x-user-id";

/// The user on whose behalf a request runs
///
/// Inserted into request extensions; extract with `Extension<ActingUser>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActingUser {
    /// Resolved user id
    pub user_id: Uuid,
}

/// Error type for acting-user resolution
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// Header absent
    #[error("Missing X-User-ID header")]
    MissingCredentials,

    /// Header present but not a UUID
    #[error("Invalid X-User-ID header: {0}")]
    InvalidFormat(String),

    /// Header names a user that does not exist
    #[error("Unknown user")]
    UnknownUser,

    /// Lookup failed
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

/// Parses the user id out of request headers without touching the database
///
/// # Errors
///
/// - `MissingCredentials` if the header is absent
/// - `InvalidFormat` if it is not valid UTF-8 or not a UUID
pub fn parse_user_id(headers: &HeaderMap) -> Result<Uuid, IdentityError> {
    let raw = headers
        .get(USER_ID_HEADER)
        .ok_or(IdentityError::MissingCredentials)?
        .to_str()
        .map_err(|_| IdentityError::InvalidFormat("header is not valid text".to_string()))?;

    Uuid::parse_str(raw.trim()).map_err(|e| IdentityError::InvalidFormat(e.to_string()))
}

/// Resolves the acting user from request headers
///
/// # Errors
///
/// Everything [`parse_user_id`] returns, plus `UnknownUser` when no such user
/// exists and `DatabaseError` when the lookup fails.
pub async fn resolve_acting_user(
    pool: &PgPool,
    headers: &HeaderMap,
) -> Result<ActingUser, IdentityError> {
    let user_id = parse_user_id(headers)?;

    if !User::exists(pool, user_id).await? {
        tracing::debug!(user_id = %user_id, "Rejected request for unknown user");
        return Err(IdentityError::UnknownUser);
    }

    Ok(ActingUser { user_id })
}
