/// Application state and router builder
///
/// Defines the shared application state and builds the Axum router with all
/// routes and middleware.
///
/// # Example
///
/// ```no_run
/// use kanban_api::{app::AppState, config::Config};
/// use kanban_shared::db::pool::create_pool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(config.database_pool_config()).await?;
/// let state = AppState::new(pool, config);
/// let app = kanban_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{
    config::Config,
    middleware::{identity::acting_user_layer, security::SecurityHeadersLayer},
};
use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    routing::{delete, get, post, put},
    Router,
};
use kanban_shared::auth::middleware::USER_ID_HEADER;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                         # Health check (public)
/// └── /kanban/
///     ├── POST   /users               # Register (public)
///     ├── DELETE /users/me
///     ├── POST   /boards
///     ├── GET    /boards
///     ├── GET    /boards/:id
///     ├── PUT    /boards/:id
///     ├── DELETE /boards/:id
///     ├── POST   /boards/:id/columns
///     ├── PUT    /boards/:id/columns/reorder
///     ├── PUT    /columns/:id
///     ├── DELETE /columns/:id
///     ├── POST   /columns/:id/tasks
///     ├── PUT    /tasks/:id
///     ├── DELETE /tasks/:id
///     ├── PUT    /tasks/:id/move
///     ├── GET    /stats
///     └── GET    /sync
/// ```
///
/// Every `/kanban` route except registration runs behind the acting-user
/// layer, which requires `X-User-ID`.
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Security headers
/// 2. CORS (tower-http CorsLayer)
/// 3. Logging (tower-http TraceLayer)
/// 4. Acting user (per-route basis)
pub fn build_router(state: AppState) -> Router {
    use crate::routes::{account, boards, columns, health, tasks, users};

    // Health check (public)
    let health_routes = Router::new().route("/health", get(health::health_check));

    // Registration (public)
    let public_routes = Router::new().route("/users", post(users::create_user));

    // Everything else acts on behalf of the X-User-ID user
    let acting_routes = Router::new()
        .route("/users/me", delete(users::delete_me))
        .route("/boards", post(boards::create_board).get(boards::list_boards))
        .route(
            "/boards/:id",
            get(boards::get_board)
                .put(boards::update_board)
                .delete(boards::delete_board),
        )
        .route("/boards/:id/columns", post(columns::create_column))
        .route("/boards/:id/columns/reorder", put(columns::reorder_columns))
        .route(
            "/columns/:id",
            put(columns::update_column).delete(columns::delete_column),
        )
        .route("/columns/:id/tasks", post(tasks::create_task))
        .route(
            "/tasks/:id",
            put(tasks::update_task).delete(tasks::delete_task),
        )
        .route("/tasks/:id/move", put(tasks::move_task))
        .route("/stats", get(account::get_stats))
        .route("/sync", get(account::sync_all))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            acting_user_layer,
        ));

    let kanban_routes = Router::new().merge(public_routes).merge(acting_routes);

    Router::new()
        .merge(health_routes)
        .nest("/kanban", kanban_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors_layer(&state.config))
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors_permissive() {
        // Development mode: permissive CORS
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .api
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(USER_ID_HEADER)])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}
