/// Middleware modules for the API server
///
/// - `security`: security response headers
/// - `identity`: resolves the acting user for kanban routes

pub mod identity;
pub mod security;
