/// Kanban operations
///
/// One function per logical request. Each opens a transaction, checks
/// ownership for the acting user, takes the parent-row locks that serialize
/// the sibling groups it touches, plans position changes with
/// [`crate::sequencer`], applies them and commits. Returning early with `?`
/// drops the transaction uncommitted, which rolls everything back.
///
/// Lock order is always board, then columns by ascending id, then task rows.
///
/// # Example
///
/// ```no_run
/// use kanban_shared::service::{boards, columns, tasks};
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, acting: Uuid) -> Result<(), kanban_shared::error::KanbanError> {
/// let board = boards::create_board(&pool, acting, "Release").await?;
/// let todo = columns::create_column(&pool, acting, board.id, "Todo").await?;
/// let done = columns::create_column(&pool, acting, board.id, "Done").await?;
///
/// let task = tasks::create_task(&pool, acting, todo.id, "Tag v1.0", None).await?;
/// tasks::move_task(&pool, acting, task.id, Some(done.id), Some(0)).await?;
/// # Ok(())
/// # }
/// ```

pub mod users;
pub mod boards;
pub mod columns;
pub mod tasks;
