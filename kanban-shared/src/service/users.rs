use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::auth::authorization::lock_account;
use crate::error::{require_non_blank, KanbanError, KanbanResult};
use crate::models::user::{CreateUser, User};

/// Registers a user
///
/// # Errors
///
/// - `InvalidArgument` for a blank username
/// - `Conflict` if the username is taken
pub async fn create_user(pool: &PgPool, username: &str) -> KanbanResult<User> {
    let username = require_non_blank("username", username)?;

    let user = User::create(pool, CreateUser { username: username.clone() })
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                KanbanError::Conflict(format!("username '{}' is already taken", username))
            }
            other => KanbanError::Storage(other),
        })?;

    info!(user_id = %user.id, "User created");
    Ok(user)
}

/// Deletes the acting user with every board, column and task they own
pub async fn delete_user(pool: &PgPool, acting: Uuid) -> KanbanResult<()> {
    let mut tx = pool.begin().await?;

    lock_account(&mut tx, acting).await?;
    if !User::delete_cascade(&mut tx, acting).await? {
        return Err(KanbanError::NotFound("User"));
    }

    tx.commit().await?;

    info!(user_id = %acting, "User deleted");
    Ok(())
}
