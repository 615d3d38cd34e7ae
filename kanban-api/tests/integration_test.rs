/// Integration tests for the kanban API
///
/// These tests drive the full router against PostgreSQL:
/// - Board, column and task lifecycle over HTTP
/// - Position handling for appends, deletes and moves
/// - Ownership isolation between users
/// - Error mapping to status codes
///
/// Run with: cargo test -p kanban-api --test integration_test -- --ignored
/// (requires DATABASE_URL)

mod common;

use axum::http::{Method, StatusCode};
use common::TestContext;
use serde_json::{json, Value};
use uuid::Uuid;

fn id(value: &Value) -> String {
    value["id"].as_str().expect("response has an id").to_string()
}

async fn create_board(ctx: &TestContext, name: &str) -> String {
    let (status, body) = ctx
        .send(Method::POST, "/kanban/boards", Some(json!({ "name": name })))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    id(&body)
}

async fn create_column(ctx: &TestContext, board: &str, name: &str) -> Value {
    let (status, body) = ctx
        .send(
            Method::POST,
            &format!("/kanban/boards/{}/columns", board),
            Some(json!({ "name": name })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body
}

async fn create_task(ctx: &TestContext, column: &str, title: &str) -> Value {
    let (status, body) = ctx
        .send(
            Method::POST,
            &format!("/kanban/columns/{}/tasks", column),
            Some(json!({ "title": title })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body
}

/// Task titles per column, in board order
async fn layout(ctx: &TestContext, board: &str) -> Vec<Vec<String>> {
    let (status, body) = ctx
        .send(Method::GET, &format!("/kanban/boards/{}", board), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    body["columns"]
        .as_array()
        .unwrap()
        .iter()
        .map(|column| {
            column["tasks"]
                .as_array()
                .unwrap()
                .iter()
                .map(|task| task["title"].as_str().unwrap().to_string())
                .collect()
        })
        .collect()
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_board_lifecycle() {
    let ctx = TestContext::new().await.unwrap();

    let board = create_board(&ctx, "Roadmap").await;

    let (status, body) = ctx.send(Method::GET, "/kanban/boards", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Roadmap");

    let (status, body) = ctx
        .send(
            Method::PUT,
            &format!("/kanban/boards/{}", board),
            Some(json!({ "name": "Roadmap 2026" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Roadmap 2026");

    let (status, _) = ctx
        .send(Method::DELETE, &format!("/kanban/boards/{}", board), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = ctx
        .send(Method::GET, &format!("/kanban/boards/{}", board), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_columns_and_tasks_append_at_tail() {
    let ctx = TestContext::new().await.unwrap();
    let board = create_board(&ctx, "Sprint").await;

    for (i, name) in ["Todo", "Doing", "Done"].iter().enumerate() {
        let column = create_column(&ctx, &board, name).await;
        assert_eq!(column["position"], i);
    }

    let (_, detail) = ctx
        .send(Method::GET, &format!("/kanban/boards/{}", board), None)
        .await;
    let todo = id(&detail["columns"][0]);

    for (i, title) in ["a", "b", "c"].iter().enumerate() {
        let task = create_task(&ctx, &todo, title).await;
        assert_eq!(task["position"], i);
    }

    assert_eq!(layout(&ctx, &board).await, vec![vec!["a", "b", "c"], vec![], vec![]]);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_move_task_over_http() {
    let ctx = TestContext::new().await.unwrap();
    let board = create_board(&ctx, "Sprint").await;
    let todo = id(&create_column(&ctx, &board, "Todo").await);
    let done = id(&create_column(&ctx, &board, "Done").await);

    let mut tasks = Vec::new();
    for title in ["a", "b", "c", "d"] {
        tasks.push(id(&create_task(&ctx, &todo, title).await));
    }

    // Same column, 3 -> 1
    let (status, body) = ctx
        .send(
            Method::PUT,
            &format!("/kanban/tasks/{}/move", tasks[3]),
            Some(json!({ "new_column_id": todo, "new_position": 1 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["position"], 1);
    assert_eq!(layout(&ctx, &board).await[0], vec!["a", "d", "b", "c"]);

    // Across columns, into an empty one
    let (status, body) = ctx
        .send(
            Method::PUT,
            &format!("/kanban/tasks/{}/move", tasks[1]),
            Some(json!({ "new_column_id": done, "new_position": 0 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["column_id"], done.as_str());
    assert_eq!(
        layout(&ctx, &board).await,
        vec![vec!["a", "d", "c"], vec!["b"]]
    );

    // Missing field
    let (status, _) = ctx
        .send(
            Method::PUT,
            &format!("/kanban/tasks/{}/move", tasks[0]),
            Some(json!({ "new_column_id": done })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Past the end of the target column
    let (status, _) = ctx
        .send(
            Method::PUT,
            &format!("/kanban/tasks/{}/move", tasks[0]),
            Some(json!({ "new_column_id": done, "new_position": 5 })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(
        layout(&ctx, &board).await,
        vec![vec!["a", "d", "c"], vec!["b"]]
    );

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_delete_closes_gaps() {
    let ctx = TestContext::new().await.unwrap();
    let board = create_board(&ctx, "Sprint").await;
    let first = id(&create_column(&ctx, &board, "First").await);
    let second = id(&create_column(&ctx, &board, "Second").await);
    create_column(&ctx, &board, "Third").await;

    let mut tasks = Vec::new();
    for title in ["a", "b", "c"] {
        tasks.push(id(&create_task(&ctx, &second, title).await));
    }

    let (status, _) = ctx
        .send(Method::DELETE, &format!("/kanban/tasks/{}", tasks[0]), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = ctx
        .send(Method::DELETE, &format!("/kanban/columns/{}", first), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, detail) = ctx
        .send(Method::GET, &format!("/kanban/boards/{}", board), None)
        .await;
    let columns: Vec<(String, i64)> = detail["columns"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| (c["name"].as_str().unwrap().to_string(), c["position"].as_i64().unwrap()))
        .collect();
    assert_eq!(
        columns,
        vec![("Second".to_string(), 0), ("Third".to_string(), 1)]
    );

    let positions: Vec<i64> = detail["columns"][0]["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["position"].as_i64().unwrap())
        .collect();
    assert_eq!(positions, vec![0, 1]);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_reorder_columns_over_http() {
    let ctx = TestContext::new().await.unwrap();
    let board = create_board(&ctx, "Sprint").await;
    let a = id(&create_column(&ctx, &board, "A").await);
    let b = id(&create_column(&ctx, &board, "B").await);

    let uri = format!("/kanban/boards/{}/columns/reorder", board);

    let (status, _) = ctx
        .send(
            Method::PUT,
            &uri,
            Some(json!([{ "id": a, "position": 1 }, { "id": b, "position": 0 }])),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = ctx
        .send(Method::PUT, &uri, Some(json!([{ "id": a, "position": 3 }])))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, detail) = ctx
        .send(Method::GET, &format!("/kanban/boards/{}", board), None)
        .await;
    assert_eq!(detail["columns"][0]["name"], "B");
    assert_eq!(detail["columns"][1]["name"], "A");

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_other_users_data_is_not_found() {
    let ctx = TestContext::new().await.unwrap();
    let board = create_board(&ctx, "Private").await;
    let column = id(&create_column(&ctx, &board, "Todo").await);
    let task = id(&create_task(&ctx, &column, "secret").await);

    let (status, stranger) = ctx
        .send(
            Method::POST,
            "/kanban/users",
            Some(json!({ "username": format!("stranger-{}", Uuid::new_v4()) })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let stranger: Uuid = id(&stranger).parse().unwrap();

    let attempts = [
        (Method::GET, format!("/kanban/boards/{}", board), None),
        (
            Method::PUT,
            format!("/kanban/columns/{}", column),
            Some(json!({ "name": "Mine" })),
        ),
        (
            Method::PUT,
            format!("/kanban/tasks/{}", task),
            Some(json!({ "title": "Mine" })),
        ),
        (Method::DELETE, format!("/kanban/tasks/{}", task), None),
    ];

    for (method, uri, body) in attempts {
        let (status, _) = ctx.send_as(stranger, method.clone(), &uri, body).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{} {}", method, uri);
    }

    assert_eq!(layout(&ctx, &board).await, vec![vec!["secret"]]);

    let (status, _) = ctx
        .send_as(stranger, Method::DELETE, "/kanban/users/me", None)
        .await;
    assert_eq!(status, StatusCode::OK);

    // Deleted users are no longer accepted
    let (status, _) = ctx
        .send_as(stranger, Method::GET, "/kanban/boards", None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_stats_sync_and_health() {
    let ctx = TestContext::new().await.unwrap();
    let board = create_board(&ctx, "Stats").await;
    let column = id(&create_column(&ctx, &board, "Todo").await);
    create_task(&ctx, &column, "one").await;
    create_task(&ctx, &column, "two").await;

    let (status, stats) = ctx.send(Method::GET, "/kanban/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats, json!({ "boards": 1, "columns": 1, "tasks": 2 }));

    let (status, snapshot) = ctx.send(Method::GET, "/kanban/sync", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["boards"][0]["columns"][0]["tasks"][1]["title"], "two");

    let (status, health) = ctx.send(Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["database"], "connected");
    assert_eq!(health["migrations"]["is_up_to_date"], true);

    let (status, _) = ctx
        .send(
            Method::POST,
            "/kanban/users",
            Some(json!({ "username": ctx.user.username })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    ctx.cleanup().await.unwrap();
}
