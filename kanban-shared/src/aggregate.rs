/// Board aggregate reader
///
/// Assembles the nested views the API returns: a board with its columns, each
/// column with its tasks, all ordered by `position`. Assembly is pure. Rows are
/// loaded with one query per level and grouped here; both levels are sorted
/// again with a stable sort so the result does not depend on query order.
///
/// # Example
///
/// ```
/// use kanban_shared::aggregate::assemble_board;
/// use kanban_shared::models::board::Board;
/// use chrono::Utc;
/// use uuid::Uuid;
///
/// let board = Board {
///     id: Uuid::new_v4(),
///     user_id: Uuid::new_v4(),
///     name: "Roadmap".to_string(),
///     created_at: Utc::now(),
///     updated_at: Utc::now(),
/// };
///
/// let detail = assemble_board(board, Vec::new(), Vec::new());
/// assert!(detail.columns.is_empty());
/// ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{board::Board, column::Column, task::Task};

/// A board with its ordered columns and tasks
#[derive(Debug, Clone, Serialize)]
pub struct BoardDetail {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Columns sorted ascending by position
    pub columns: Vec<ColumnDetail>,
}

/// A column with its ordered tasks
#[derive(Debug, Clone, Serialize)]
pub struct ColumnDetail {
    pub id: Uuid,
    pub name: String,
    pub position: i32,

    /// Tasks sorted ascending by position
    pub tasks: Vec<TaskSummary>,
}

/// Task as shown inside a column
#[derive(Debug, Clone, Serialize)]
pub struct TaskSummary {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Task> for TaskSummary {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            position: task.position,
            created_at: task.created_at,
        }
    }
}

/// Every board a user owns, fully nested
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub boards: Vec<BoardDetail>,
}

/// Entity counts for one user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UserStats {
    pub boards: i64,
    pub columns: i64,
    pub tasks: i64,
}

/// Builds one board's detail view
///
/// `columns` must belong to `board` and `tasks` to those columns; tasks of
/// unknown columns are dropped.
pub fn assemble_board(board: Board, columns: Vec<Column>, tasks: Vec<Task>) -> BoardDetail {
    let mut by_column = group_tasks(tasks);

    BoardDetail {
        id: board.id,
        name: board.name,
        created_at: board.created_at,
        updated_at: board.updated_at,
        columns: ordered_columns(columns, &mut by_column),
    }
}

/// Builds the nested snapshot of many boards
///
/// Boards keep the order they are passed in; columns are matched by
/// `board_id` and tasks by `column_id`.
pub fn assemble_snapshot(boards: Vec<Board>, columns: Vec<Column>, tasks: Vec<Task>) -> Snapshot {
    let mut by_column = group_tasks(tasks);

    let mut by_board: HashMap<Uuid, Vec<Column>> = HashMap::new();
    for column in columns {
        by_board.entry(column.board_id).or_default().push(column);
    }

    let boards = boards
        .into_iter()
        .map(|board| {
            let columns = by_board.remove(&board.id).unwrap_or_default();
            BoardDetail {
                id: board.id,
                name: board.name,
                created_at: board.created_at,
                updated_at: board.updated_at,
                columns: ordered_columns(columns, &mut by_column),
            }
        })
        .collect();

    Snapshot { boards }
}

fn group_tasks(tasks: Vec<Task>) -> HashMap<Uuid, Vec<Task>> {
    let mut by_column: HashMap<Uuid, Vec<Task>> = HashMap::new();
    for task in tasks {
        by_column.entry(task.column_id).or_default().push(task);
    }
    by_column
}

fn ordered_columns(
    mut columns: Vec<Column>,
    by_column: &mut HashMap<Uuid, Vec<Task>>,
) -> Vec<ColumnDetail> {
    columns.sort_by_key(|column| column.position);

    columns
        .into_iter()
        .map(|column| {
            let mut tasks = by_column.remove(&column.id).unwrap_or_default();
            tasks.sort_by_key(|task| task.position);

            ColumnDetail {
                id: column.id,
                name: column.name,
                position: column.position,
                tasks: tasks.into_iter().map(TaskSummary::from).collect(),
            }
        })
        .collect()
}
