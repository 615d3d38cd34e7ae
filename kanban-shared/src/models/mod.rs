/// Database models for the kanban backend
///
/// Each model owns its SQL. Methods that issue a single statement are generic
/// over [`sqlx::PgExecutor`] so they run against a pool or inside a
/// transaction; cascading deletes take a `&mut PgConnection` because they
/// issue several statements that must share one transaction.
///
/// # Models
///
/// - `user`: identity at the root of the ownership tree
/// - `board`: a user's board
/// - `column`: ordered columns of a board
/// - `task`: ordered tasks of a column

pub mod board;
pub mod column;
pub mod task;
pub mod user;
