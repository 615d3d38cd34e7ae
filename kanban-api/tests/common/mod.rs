/// Common test utilities for integration tests
///
/// - Test database setup and cleanup
/// - Test user creation
/// - Request helpers that drive the router with `tower::ServiceExt::oneshot`

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use kanban_api::app::{build_router, AppState};
use kanban_api::config::{ApiConfig, Config, DatabaseConfig};
use kanban_shared::db::migrations::run_migrations;
use kanban_shared::models::user::{CreateUser, User};
use kanban_shared::service::users;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    pub user: User,
}

impl TestContext {
    /// Connects to `DATABASE_URL`, migrates, and registers a fresh user
    pub async fn new() -> anyhow::Result<Self> {
        let config = Config::from_env()?;

        let db = PgPool::connect(&config.database.url).await?;
        run_migrations(&db).await?;

        let user = User::create(
            &db,
            CreateUser {
                username: format!("test-{}", Uuid::new_v4()),
            },
        )
        .await?;

        let app = build_router(AppState::new(db.clone(), config));

        Ok(TestContext { db, app, user })
    }

    /// Sends a request as the test user
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        self.send_as(self.user.id, method, uri, body).await
    }

    /// Sends a request as any user id
    pub async fn send_as(
        &self,
        user_id: Uuid,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let request = json_request(method, uri, Some(&user_id.to_string()), body);
        send(&self.app, request).await
    }

    /// Deletes the test user and everything they own
    pub async fn cleanup(&self) -> anyhow::Result<()> {
        users::delete_user(&self.db, self.user.id).await?;
        Ok(())
    }
}

/// Configuration that never needs the environment
pub fn test_config(database_url: &str) -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            production: false,
            cors_origins: vec!["http://localhost:5173".to_string()],
        },
        database: DatabaseConfig {
            url: database_url.to_string(),
            max_connections: 2,
            min_connections: 0,
            connect_timeout_seconds: 2,
            create_if_missing: false,
        },
    }
}

/// Builds a JSON request with an optional `X-User-ID`
pub fn json_request(
    method: Method,
    uri: &str,
    user_id: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");

    if let Some(user_id) = user_id {
        builder = builder.header("x-user-id", user_id);
    }

    let body = body.map_or_else(Body::empty, |json| Body::from(json.to_string()));
    builder.body(body).unwrap()
}

/// Runs a request through the router and decodes the JSON body
pub async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or_else(|_| {
            panic!("non-JSON body ({}): {}", status, String::from_utf8_lossy(&body))
        })
    };

    (status, json)
}
