use sqlx::{PgConnection, PgPool};
use tracing::{debug, info};
use uuid::Uuid;

use crate::auth::authorization::{lock_columns, require_column, require_task};
use crate::db::positions::{self, SiblingGroup};
use crate::error::{require_non_blank, KanbanError, KanbanResult};
use crate::models::task::{CreateTask, Task, UpdateTask};
use crate::sequencer::{plan_move, plan_removal, tail_position, Slot};

/// Appends a task to the end of a column
pub async fn create_task(
    pool: &PgPool,
    acting: Uuid,
    column_id: Uuid,
    title: &str,
    description: Option<String>,
) -> KanbanResult<Task> {
    let title = require_non_blank("title", title)?;
    let mut tx = pool.begin().await?;

    let column = require_column(&mut tx, column_id, acting).await?;
    lock_columns(&mut tx, &[column.id]).await?;
    let max = positions::max_position(&mut tx, SiblingGroup::Tasks, column.id).await?;

    let task = Task::create(
        &mut *tx,
        CreateTask {
            column_id: column.id,
            title,
            description,
            position: tail_position(max),
        },
    )
    .await?;

    tx.commit().await?;

    info!(task_id = %task.id, column_id = %column_id, position = task.position, "Task created");
    Ok(task)
}

/// Replaces a task's title and description
pub async fn update_task(
    pool: &PgPool,
    acting: Uuid,
    task_id: Uuid,
    title: &str,
    description: Option<String>,
) -> KanbanResult<Task> {
    let title = require_non_blank("title", title)?;
    let mut tx = pool.begin().await?;

    let task = require_task(&mut tx, task_id, acting).await?;
    let task = Task::update_content(&mut *tx, task.id, UpdateTask { title, description })
        .await?
        .ok_or(KanbanError::NotFound("Task"))?;

    tx.commit().await?;

    info!(task_id = %task.id, "Task updated");
    Ok(task)
}

/// Deletes a task and closes the gap it leaves in its column
pub async fn delete_task(pool: &PgPool, acting: Uuid, task_id: Uuid) -> KanbanResult<()> {
    let mut tx = pool.begin().await?;

    let task = require_task(&mut tx, task_id, acting).await?;
    lock_columns(&mut tx, &[task.column_id]).await?;
    let task = relock_task(&mut tx, task.id, task.column_id).await?;

    Task::delete(&mut *tx, task.id).await?;

    let shift = plan_removal(Slot::new(task.column_id, task.position));
    positions::apply_shift(&mut tx, SiblingGroup::Tasks, &shift).await?;

    tx.commit().await?;

    info!(task_id = %task_id, column_id = %task.column_id, "Task deleted");
    Ok(())
}

/// Moves a task to `new_position` in `new_column_id`
///
/// Within one column the siblings between the old and new slot shift by one
/// toward the gap. Across columns the old column closes up behind the task and
/// the new column opens a slot at the target. An occupied target is taken by
/// the task; the occupant moves right.
///
/// # Errors
///
/// - `InvalidArgument` if either field is missing or the position is outside
///   `0..=count-1` (same column) or `0..=count` (other column)
/// - `NotFound` if the task or the target column is not owned by `acting`
/// - `Conflict` if a concurrent request moved the task to another column
///   while this one waited for its locks
pub async fn move_task(
    pool: &PgPool,
    acting: Uuid,
    task_id: Uuid,
    new_column_id: Option<Uuid>,
    new_position: Option<i32>,
) -> KanbanResult<Task> {
    let new_column_id = new_column_id
        .ok_or_else(|| KanbanError::InvalidArgument("new_column_id is required".to_string()))?;
    let new_position = new_position
        .ok_or_else(|| KanbanError::InvalidArgument("new_position is required".to_string()))?;

    let mut tx = pool.begin().await?;

    let task = require_task(&mut tx, task_id, acting).await?;
    let target = require_column(&mut tx, new_column_id, acting).await?;

    lock_columns(&mut tx, &[task.column_id, target.id]).await?;
    let task = relock_task(&mut tx, task.id, task.column_id).await?;

    let target_len = positions::count(&mut tx, SiblingGroup::Tasks, target.id).await?;
    let plan = plan_move(
        Slot::new(task.column_id, task.position),
        Slot::new(target.id, new_position),
        target_len,
    )?;

    debug!(
        task_id = %task.id,
        from = ?plan.from,
        to = ?plan.to,
        shifts = plan.shifts.len(),
        "Planned task move"
    );

    if plan.is_noop() {
        tx.commit().await?;
        return Ok(task);
    }

    for shift in &plan.shifts {
        positions::apply_shift(&mut tx, SiblingGroup::Tasks, shift).await?;
    }

    let moved = Task::relocate(&mut *tx, task.id, plan.to.group, plan.to.position)
        .await?
        .ok_or(KanbanError::NotFound("Task"))?;

    tx.commit().await?;

    info!(
        task_id = %moved.id,
        column_id = %moved.column_id,
        position = moved.position,
        cross_column = plan.crosses_groups(),
        "Task moved"
    );
    Ok(moved)
}

/// Re-reads a task under a row lock once its column is locked
///
/// The task may have been moved away between the ownership check and the
/// column lock; that request then fails instead of shifting the wrong group.
async fn relock_task(
    conn: &mut PgConnection,
    task_id: Uuid,
    expected_column: Uuid,
) -> KanbanResult<Task> {
    let task = Task::lock_by_id(conn, task_id)
        .await?
        .ok_or(KanbanError::NotFound("Task"))?;

    if task.column_id != expected_column {
        return Err(KanbanError::Conflict(
            "task was moved by another request".to_string(),
        ));
    }

    Ok(task)
}
