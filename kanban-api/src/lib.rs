//! # Kanban API Server Library
//!
//! HTTP surface of the kanban backend. Handlers are thin: they validate the
//! request body, pass the acting user to `kanban_shared::service`, and map the
//! result to JSON.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `middleware`: Security headers and acting-user resolution
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
