/// Task model and database operations
///
/// Tasks are the cards on a board. Each task belongs to one column and has a
/// `position` that is dense within that column. Moving a task between columns
/// changes both `column_id` and `position` in a single update; the sibling
/// shifts around it are planned by [`crate::sequencer`].
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     column_id UUID NOT NULL REFERENCES board_columns(id),
///     title VARCHAR(200) NOT NULL,
///     description TEXT,
///     position INTEGER NOT NULL CHECK (position >= 0),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     CONSTRAINT tasks_column_position_key
///         UNIQUE (column_id, position) DEFERRABLE INITIALLY DEFERRED
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use kanban_shared::models::task::{Task, CreateTask};
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, column_id: Uuid) -> Result<(), sqlx::Error> {
/// let task = Task::create(&pool, CreateTask {
///     column_id,
///     title: "Write release notes".to_string(),
///     description: None,
///     position: 0,
/// }).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use uuid::Uuid;

/// Task model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// Column this task belongs to
    pub column_id: Uuid,

    /// Task title
    pub title: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// Zero-based position within the column
    pub position: i32,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// Column to add the task to
    pub column_id: Uuid,

    /// Task title
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Position within the column
    pub position: i32,
}

/// Input for editing a task's content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTask {
    /// New title
    pub title: String,

    /// New description (`None` clears it)
    pub description: Option<String>,
}

impl Task {
    /// Inserts a task at the given position
    pub async fn create<'e, E>(executor: E, data: CreateTask) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (column_id, title, description, position)
            VALUES ($1, $2, $3, $4)
            RETURNING id, column_id, title, description, position, created_at, updated_at
            "#,
        )
        .bind(data.column_id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.position)
        .fetch_one(executor)
        .await
    }

    /// Finds a task whose column's board belongs to `user_id`
    pub async fn find_by_id_and_user<'e, E>(
        executor: E,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Task>(
            r#"
            SELECT t.id, t.column_id, t.title, t.description, t.position,
                   t.created_at, t.updated_at
            FROM tasks t
            JOIN board_columns c ON c.id = t.column_id
            JOIN boards b ON b.id = c.board_id
            WHERE t.id = $1 AND b.user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(executor)
        .await
    }

    /// Re-reads a task under a row lock
    ///
    /// Used after the task's column has been locked, to confirm the task has
    /// not been moved by a concurrent transaction in the meantime.
    pub async fn lock_by_id<'e, E>(executor: E, id: Uuid) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Task>(
            r#"
            SELECT id, column_id, title, description, position, created_at, updated_at
            FROM tasks
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    /// Lists the tasks of the given columns ordered by column, then position
    pub async fn list_by_columns<'e, E>(
        executor: E,
        column_ids: &[Uuid],
    ) -> Result<Vec<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Task>(
            r#"
            SELECT id, column_id, title, description, position, created_at, updated_at
            FROM tasks
            WHERE column_id = ANY($1)
            ORDER BY column_id, position ASC
            "#,
        )
        .bind(column_ids)
        .fetch_all(executor)
        .await
    }

    /// Updates title and description
    pub async fn update_content<'e, E>(
        executor: E,
        id: Uuid,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = $2, description = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, column_id, title, description, position, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(data.title)
        .bind(data.description)
        .fetch_optional(executor)
        .await
    }

    /// Writes a task's final location after a move
    pub async fn relocate<'e, E>(
        executor: E,
        id: Uuid,
        column_id: Uuid,
        position: i32,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET column_id = $2, position = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, column_id, title, description, position, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(column_id)
        .bind(position)
        .fetch_optional(executor)
        .await
    }

    /// Counts tasks across all boards owned by a user
    pub async fn count_by_user<'e, E>(executor: E, user_id: Uuid) -> Result<i64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM tasks t
            JOIN board_columns c ON c.id = t.column_id
            JOIN boards b ON b.id = c.board_id
            WHERE b.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(executor)
        .await
    }

    /// Deletes a single task
    ///
    /// Sibling positions are left alone; see `service::tasks::delete_task`.
    pub async fn delete<'e, E>(executor: E, id: Uuid) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
