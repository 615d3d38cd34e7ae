/// API route handlers
///
/// Handlers are organized by resource:
///
/// - `health`: Health check endpoint
/// - `users`: Registration and account deletion
/// - `boards`: Board CRUD and the nested board view
/// - `columns`: Column CRUD and reordering
/// - `tasks`: Task CRUD and moves
/// - `account`: Per-user stats and full snapshot

pub mod account;
pub mod boards;
pub mod columns;
pub mod health;
pub mod tasks;
pub mod users;

use serde::{Deserialize, Serialize};

/// Confirmation body for operations with nothing else to return
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
