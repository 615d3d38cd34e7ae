//! # Kanban Shared Library
//!
//! Core of the kanban backend: entities, position sequencing, ownership checks
//! and the transactional operations the API server exposes.
//!
//! ## Module Organization
//!
//! - `models`: Database models and CRUD, including cascade deletes
//! - `sequencer`: Pure planning of dense sibling positions
//! - `db`: Connection pool, embedded migrations, position statements
//! - `auth`: Acting-user resolution and ownership checks
//! - `aggregate`: Nested board views, snapshots and stats
//! - `service`: One transaction per kanban operation
//! - `error`: Common error types

pub mod aggregate;
pub mod auth;
pub mod db;
pub mod error;
pub mod models;
pub mod sequencer;
pub mod service;

/// Current version of the kanban shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
