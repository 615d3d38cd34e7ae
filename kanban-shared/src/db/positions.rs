/// Applies sequencer plans to the database
///
/// The sequencer decides *what* moves; this module issues the statements.
/// Every function here expects to run inside a transaction that already holds
/// the lock on the group's parent row (board for columns, column for tasks).
/// The `(parent, position)` unique constraints are `DEFERRABLE INITIALLY
/// DEFERRED`, so intermediate collisions between statements are fine as long
/// as the group is dense again at commit.

use sqlx::PgConnection;
use tracing::debug;
use uuid::Uuid;

use crate::sequencer::RangeShift;

/// Which kind of sibling group a statement targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiblingGroup {
    /// Columns of one board
    Columns,

    /// Tasks of one column
    Tasks,
}

impl SiblingGroup {
    fn table(self) -> &'static str {
        match self {
            SiblingGroup::Columns => "board_columns",
            SiblingGroup::Tasks => "tasks",
        }
    }

    fn parent(self) -> &'static str {
        match self {
            SiblingGroup::Columns => "board_id",
            SiblingGroup::Tasks => "column_id",
        }
    }
}

/// Highest position in a group, `None` when the group is empty
pub async fn max_position(
    conn: &mut PgConnection,
    group: SiblingGroup,
    parent_id: Uuid,
) -> Result<Option<i32>, sqlx::Error> {
    let sql = format!(
        "SELECT MAX(position) FROM {} WHERE {} = $1",
        group.table(),
        group.parent()
    );

    sqlx::query_scalar(&sql)
        .bind(parent_id)
        .fetch_one(conn)
        .await
}

/// Number of siblings in a group
pub async fn count(
    conn: &mut PgConnection,
    group: SiblingGroup,
    parent_id: Uuid,
) -> Result<usize, sqlx::Error> {
    let sql = format!(
        "SELECT COUNT(*) FROM {} WHERE {} = $1",
        group.table(),
        group.parent()
    );

    let count: i64 = sqlx::query_scalar(&sql)
        .bind(parent_id)
        .fetch_one(conn)
        .await?;

    Ok(usize::try_from(count).unwrap_or(0))
}

/// Every `(id, position)` in a group, ordered by position
pub async fn list(
    conn: &mut PgConnection,
    group: SiblingGroup,
    parent_id: Uuid,
) -> Result<Vec<(Uuid, i32)>, sqlx::Error> {
    let sql = format!(
        "SELECT id, position FROM {} WHERE {} = $1 ORDER BY position",
        group.table(),
        group.parent()
    );

    sqlx::query_as(&sql).bind(parent_id).fetch_all(conn).await
}

/// Applies one range shift with a single `UPDATE`
///
/// Returns the number of rows moved.
pub async fn apply_shift(
    conn: &mut PgConnection,
    group: SiblingGroup,
    shift: &RangeShift,
) -> Result<u64, sqlx::Error> {
    let sql = format!(
        "UPDATE {} SET position = position + $2, updated_at = NOW() \
         WHERE {} = $1 AND position >= $3 AND ($4::INTEGER IS NULL OR position <= $4)",
        group.table(),
        group.parent()
    );

    let result = sqlx::query(&sql)
        .bind(shift.group)
        .bind(shift.delta)
        .bind(shift.start)
        .bind(shift.end)
        .execute(conn)
        .await?;

    debug!(
        group = ?group,
        parent_id = %shift.group,
        start = shift.start,
        end = ?shift.end,
        delta = shift.delta,
        rows = result.rows_affected(),
        "Shifted sibling positions"
    );

    Ok(result.rows_affected())
}

/// Writes explicit positions for a batch of siblings in one statement
pub async fn assign(
    conn: &mut PgConnection,
    group: SiblingGroup,
    changes: &[(Uuid, i32)],
) -> Result<u64, sqlx::Error> {
    if changes.is_empty() {
        return Ok(0);
    }

    let (ids, new_positions): (Vec<Uuid>, Vec<i32>) = changes.iter().copied().unzip();

    let sql = format!(
        "UPDATE {table} AS s SET position = u.position, updated_at = NOW() \
         FROM UNNEST($1::UUID[], $2::INTEGER[]) AS u(id, position) \
         WHERE s.id = u.id",
        table = group.table()
    );

    let result = sqlx::query(&sql)
        .bind(ids)
        .bind(new_positions)
        .execute(conn)
        .await?;

    debug!(group = ?group, rows = result.rows_affected(), "Assigned sibling positions");

    Ok(result.rows_affected())
}
