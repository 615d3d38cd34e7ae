use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::aggregate::{assemble_board, assemble_snapshot, BoardDetail, Snapshot, UserStats};
use crate::auth::authorization::{lock_board, lock_board_columns, require_board};
use crate::db::pool::begin_snapshot;
use crate::error::{require_non_blank, KanbanError, KanbanResult};
use crate::models::{
    board::{Board, CreateBoard},
    column::Column,
    task::Task,
};

/// Creates a board for the acting user
pub async fn create_board(pool: &PgPool, acting: Uuid, name: &str) -> KanbanResult<Board> {
    let name = require_non_blank("name", name)?;

    let board = Board::create(
        pool,
        CreateBoard {
            user_id: acting,
            name,
        },
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
            KanbanError::NotFound("User")
        }
        other => KanbanError::Storage(other),
    })?;

    info!(board_id = %board.id, user_id = %acting, "Board created");
    Ok(board)
}

/// Boards of the acting user in creation order
pub async fn list_boards(pool: &PgPool, acting: Uuid) -> KanbanResult<Vec<Board>> {
    Ok(Board::list_by_user(pool, acting).await?)
}

/// A board with its ordered columns and tasks
pub async fn get_board_detail(
    pool: &PgPool,
    acting: Uuid,
    board_id: Uuid,
) -> KanbanResult<BoardDetail> {
    let mut tx = begin_snapshot(pool).await?;

    let board = require_board(&mut tx, board_id, acting).await?;
    let columns = Column::list_by_board(&mut *tx, board.id).await?;
    let column_ids: Vec<Uuid> = columns.iter().map(|c| c.id).collect();
    let tasks = Task::list_by_columns(&mut *tx, &column_ids).await?;

    tx.commit().await?;

    Ok(assemble_board(board, columns, tasks))
}

/// Renames a board
pub async fn update_board(
    pool: &PgPool,
    acting: Uuid,
    board_id: Uuid,
    name: &str,
) -> KanbanResult<Board> {
    let name = require_non_blank("name", name)?;

    let board = Board::rename(pool, board_id, acting, &name)
        .await?
        .ok_or(KanbanError::NotFound("Board"))?;

    info!(board_id = %board.id, "Board renamed");
    Ok(board)
}

/// Deletes a board with its columns and tasks
pub async fn delete_board(pool: &PgPool, acting: Uuid, board_id: Uuid) -> KanbanResult<()> {
    let mut tx = pool.begin().await?;

    let board = lock_board(&mut tx, board_id, acting).await?;
    lock_board_columns(&mut tx, board.id).await?;
    Board::delete_cascade(&mut tx, board.id).await?;

    tx.commit().await?;

    info!(board_id = %board_id, "Board deleted");
    Ok(())
}

/// Counts of everything the acting user owns
pub async fn get_user_stats(pool: &PgPool, acting: Uuid) -> KanbanResult<UserStats> {
    let mut tx = begin_snapshot(pool).await?;

    let stats = UserStats {
        boards: Board::count_by_user(&mut *tx, acting).await?,
        columns: Column::count_by_user(&mut *tx, acting).await?,
        tasks: Task::count_by_user(&mut *tx, acting).await?,
    };

    tx.commit().await?;
    Ok(stats)
}

/// Every board of the acting user, fully nested
pub async fn sync_all(pool: &PgPool, acting: Uuid) -> KanbanResult<Snapshot> {
    let mut tx = begin_snapshot(pool).await?;

    let boards = Board::list_by_user(&mut *tx, acting).await?;
    let columns = Column::list_by_user(&mut *tx, acting).await?;
    let column_ids: Vec<Uuid> = columns.iter().map(|c| c.id).collect();
    let tasks = Task::list_by_columns(&mut *tx, &column_ids).await?;

    tx.commit().await?;

    Ok(assemble_snapshot(boards, columns, tasks))
}
