/// Ownership checks for boards, columns and tasks
///
/// Every board, column and task resolves to exactly one user through the
/// chain Task → Column → Board → User. Before any mutation the service asks
/// this module to resolve the entity *for the acting user*; an entity that
/// does not exist and one that belongs to somebody else both come back as
/// [`KanbanError::NotFound`], so callers cannot learn about other users' data.
///
/// The `lock_*` variants take `FOR UPDATE` row locks. A board row guards its
/// column group and a column row guards its task group, so locking the parent
/// serializes every position change within that group. Locks are always taken
/// parent first (user, board, column, task) and siblings in ascending id order.
///
/// # Example
///
/// ```no_run
/// use kanban_shared::auth::authorization::require_column;
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, acting: Uuid, column_id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
/// let mut tx = pool.begin().await?;
/// let column = require_column(&mut tx, column_id, acting).await?;
/// println!("column {} is on board {}", column.id, column.board_id);
/// # Ok(())
/// # }
/// ```

use sqlx::PgConnection;
use uuid::Uuid;

use crate::error::{KanbanError, KanbanResult};
use crate::models::{board::Board, column::Column, task::Task, user::User};

/// Resolves a board owned by `acting`
pub async fn require_board(
    conn: &mut PgConnection,
    board_id: Uuid,
    acting: Uuid,
) -> KanbanResult<Board> {
    Board::find_by_id_and_user(conn, board_id, acting)
        .await?
        .ok_or(KanbanError::NotFound("Board"))
}

/// Resolves and locks a board owned by `acting`
pub async fn lock_board(
    conn: &mut PgConnection,
    board_id: Uuid,
    acting: Uuid,
) -> KanbanResult<Board> {
    Board::lock_by_id_and_user(conn, board_id, acting)
        .await?
        .ok_or(KanbanError::NotFound("Board"))
}

/// Resolves a column whose board is owned by `acting`
pub async fn require_column(
    conn: &mut PgConnection,
    column_id: Uuid,
    acting: Uuid,
) -> KanbanResult<Column> {
    Column::find_by_id_and_user(conn, column_id, acting)
        .await?
        .ok_or(KanbanError::NotFound("Column"))
}

/// Resolves a task whose column's board is owned by `acting`
pub async fn require_task(
    conn: &mut PgConnection,
    task_id: Uuid,
    acting: Uuid,
) -> KanbanResult<Task> {
    Task::find_by_id_and_user(conn, task_id, acting)
        .await?
        .ok_or(KanbanError::NotFound("Task"))
}

/// Locks the task groups of the given columns
///
/// Ids are de-duplicated and locked in ascending order. Fails with `NotFound`
/// if any column disappeared since it was resolved.
pub async fn lock_columns(conn: &mut PgConnection, column_ids: &[Uuid]) -> KanbanResult<()> {
    let ids = lock_order(column_ids);
    let locked = Column::lock_many(conn, &ids).await?;

    if locked.len() != ids.len() {
        return Err(KanbanError::NotFound("Column"));
    }

    Ok(())
}

/// Locks the task groups of every column on a board
///
/// The caller must already hold the board lock, so the column set cannot
/// change underneath.
pub async fn lock_board_columns(conn: &mut PgConnection, board_id: Uuid) -> KanbanResult<()> {
    let column_ids: Vec<Uuid> = Column::list_by_board(&mut *conn, board_id)
        .await?
        .into_iter()
        .map(|c| c.id)
        .collect();

    lock_columns(conn, &column_ids).await
}

/// Locks everything `acting` owns
///
/// Order is user row, boards by id, then columns by id. Boards and columns
/// come after their parents, the same order single-board operations use.
pub async fn lock_account(conn: &mut PgConnection, acting: Uuid) -> KanbanResult<()> {
    User::lock_by_id(&mut *conn, acting)
        .await?
        .ok_or(KanbanError::NotFound("User"))?;

    Board::lock_all_by_user(&mut *conn, acting).await?;

    let column_ids: Vec<Uuid> = Column::list_by_user(&mut *conn, acting)
        .await?
        .into_iter()
        .map(|c| c.id)
        .collect();

    lock_columns(conn, &column_ids).await
}

/// Sorted, de-duplicated lock order
fn lock_order(ids: &[Uuid]) -> Vec<Uuid> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    ids
}
