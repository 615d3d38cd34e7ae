use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::auth::authorization::{lock_board, lock_columns, require_column};
use crate::db::positions::{self, SiblingGroup};
use crate::error::{require_non_blank, KanbanError, KanbanResult};
use crate::models::column::{Column, CreateColumn};
use crate::sequencer::{plan_removal, plan_reorder, tail_position, Slot};

/// One entry of a column reorder batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
pub struct ColumnPosition {
    pub id: Uuid,
    pub position: i32,
}

/// Appends a column to the end of a board
pub async fn create_column(
    pool: &PgPool,
    acting: Uuid,
    board_id: Uuid,
    name: &str,
) -> KanbanResult<Column> {
    let name = require_non_blank("name", name)?;
    let mut tx = pool.begin().await?;

    let board = lock_board(&mut tx, board_id, acting).await?;
    let max = positions::max_position(&mut tx, SiblingGroup::Columns, board.id).await?;

    let column = Column::create(
        &mut *tx,
        CreateColumn {
            board_id: board.id,
            name,
            position: tail_position(max),
        },
    )
    .await?;

    tx.commit().await?;

    info!(column_id = %column.id, board_id = %board_id, position = column.position, "Column created");
    Ok(column)
}

/// Renames a column
pub async fn update_column(
    pool: &PgPool,
    acting: Uuid,
    column_id: Uuid,
    name: &str,
) -> KanbanResult<Column> {
    let name = require_non_blank("name", name)?;
    let mut tx = pool.begin().await?;

    let column = require_column(&mut tx, column_id, acting).await?;
    let column = Column::rename(&mut *tx, column.id, &name)
        .await?
        .ok_or(KanbanError::NotFound("Column"))?;

    tx.commit().await?;

    info!(column_id = %column.id, "Column renamed");
    Ok(column)
}

/// Deletes a column with its tasks and closes the gap it leaves
pub async fn delete_column(pool: &PgPool, acting: Uuid, column_id: Uuid) -> KanbanResult<()> {
    let mut tx = pool.begin().await?;

    let column = require_column(&mut tx, column_id, acting).await?;
    lock_board(&mut tx, column.board_id, acting).await?;
    lock_columns(&mut tx, &[column.id]).await?;

    // Position may have changed before the board lock was granted.
    let column = require_column(&mut tx, column_id, acting).await?;

    Column::delete_cascade(&mut tx, column.id).await?;

    let shift = plan_removal(Slot::new(column.board_id, column.position));
    positions::apply_shift(&mut tx, SiblingGroup::Columns, &shift).await?;

    tx.commit().await?;

    info!(column_id = %column_id, board_id = %column.board_id, "Column deleted");
    Ok(())
}

/// Applies a batch of column positions to a board
///
/// Later entries for the same id win. The merged result must be a permutation
/// of `0..count`; otherwise nothing is written.
///
/// # Errors
///
/// - `NotFound` if the board is not owned or an id is not one of its columns
/// - `InvalidArgument` if the merged positions are not dense
pub async fn reorder_columns(
    pool: &PgPool,
    acting: Uuid,
    board_id: Uuid,
    batch: &[ColumnPosition],
) -> KanbanResult<()> {
    let mut tx = pool.begin().await?;

    let board = lock_board(&mut tx, board_id, acting).await?;
    let current = positions::list(&mut tx, SiblingGroup::Columns, board.id).await?;

    let requested: Vec<(Uuid, i32)> = batch.iter().map(|e| (e.id, e.position)).collect();
    let changes = plan_reorder(&current, &requested)?;

    debug!(board_id = %board_id, changed = changes.len(), "Planned column reorder");

    positions::assign(&mut tx, SiblingGroup::Columns, &changes).await?;

    tx.commit().await?;

    info!(board_id = %board_id, "Columns reordered");
    Ok(())
}
