/// Column model and database operations
///
/// Columns belong to a board and carry a `position` that is dense within the
/// board (see [`crate::sequencer`]). Ownership is checked by joining through
/// `boards.user_id`.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE board_columns (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     board_id UUID NOT NULL REFERENCES boards(id),
///     name VARCHAR(120) NOT NULL,
///     position INTEGER NOT NULL CHECK (position >= 0),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     CONSTRAINT board_columns_board_position_key
///         UNIQUE (board_id, position) DEFERRABLE INITIALLY DEFERRED
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgExecutor};
use uuid::Uuid;

/// Column model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Column {
    /// Unique column ID
    pub id: Uuid,

    /// Board this column belongs to
    pub board_id: Uuid,

    /// Column name
    pub name: String,

    /// Zero-based position within the board
    pub position: i32,

    /// When the column was created
    pub created_at: DateTime<Utc>,

    /// When the column was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateColumn {
    /// Board to add the column to
    pub board_id: Uuid,

    /// Column name
    pub name: String,

    /// Position within the board
    pub position: i32,
}

impl Column {
    /// Inserts a column at the given position
    ///
    /// The caller is responsible for picking a free position (normally the tail).
    pub async fn create<'e, E>(executor: E, data: CreateColumn) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Column>(
            r#"
            INSERT INTO board_columns (board_id, name, position)
            VALUES ($1, $2, $3)
            RETURNING id, board_id, name, position, created_at, updated_at
            "#,
        )
        .bind(data.board_id)
        .bind(data.name)
        .bind(data.position)
        .fetch_one(executor)
        .await
    }

    /// Finds a column whose board belongs to `user_id`
    pub async fn find_by_id_and_user<'e, E>(
        executor: E,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Column>(
            r#"
            SELECT c.id, c.board_id, c.name, c.position, c.created_at, c.updated_at
            FROM board_columns c
            JOIN boards b ON b.id = c.board_id
            WHERE c.id = $1 AND b.user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(executor)
        .await
    }

    /// Locks the given columns in ascending id order
    ///
    /// A column row guards its task group. Locking in a fixed order keeps two
    /// cross-column moves in opposite directions from deadlocking.
    ///
    /// Returns the ids that were found and locked.
    pub async fn lock_many<'e, E>(executor: E, ids: &[Uuid]) -> Result<Vec<Uuid>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar(
            r#"
            SELECT id FROM board_columns
            WHERE id = ANY($1)
            ORDER BY id
            FOR UPDATE
            "#,
        )
        .bind(ids)
        .fetch_all(executor)
        .await
    }

    /// Lists a board's columns ordered by position
    pub async fn list_by_board<'e, E>(executor: E, board_id: Uuid) -> Result<Vec<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Column>(
            r#"
            SELECT id, board_id, name, position, created_at, updated_at
            FROM board_columns
            WHERE board_id = $1
            ORDER BY position ASC, id ASC
            "#,
        )
        .bind(board_id)
        .fetch_all(executor)
        .await
    }

    /// Lists the columns of every board owned by a user
    pub async fn list_by_user<'e, E>(executor: E, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Column>(
            r#"
            SELECT c.id, c.board_id, c.name, c.position, c.created_at, c.updated_at
            FROM board_columns c
            JOIN boards b ON b.id = c.board_id
            WHERE b.user_id = $1
            ORDER BY c.board_id, c.position ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(executor)
        .await
    }

    /// Renames a column
    pub async fn rename<'e, E>(executor: E, id: Uuid, name: &str) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Column>(
            r#"
            UPDATE board_columns
            SET name = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, board_id, name, position, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .fetch_optional(executor)
        .await
    }

    /// Counts columns across all boards owned by a user
    pub async fn count_by_user<'e, E>(executor: E, user_id: Uuid) -> Result<i64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM board_columns c
            JOIN boards b ON b.id = c.board_id
            WHERE b.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(executor)
        .await
    }

    /// Deletes a column and its tasks
    ///
    /// Does not touch sibling positions; callers removing a single column
    /// close the gap themselves.
    pub async fn delete_cascade(conn: &mut PgConnection, id: Uuid) -> Result<bool, sqlx::Error> {
        sqlx::query("DELETE FROM tasks WHERE column_id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        let result = sqlx::query("DELETE FROM board_columns WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
