use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::{problem_body, TestContext};

async fn listed(ctx: &TestContext) -> Vec<(String, i64)> {
    let body: Value = ctx.server.get("/problems").await.json();
    body["problems"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| {
            (
                p["title"].as_str().unwrap().to_string(),
                p["display_id"].as_i64().unwrap(),
            )
        })
        .collect()
}

#[tokio::test]
async fn created_problems_get_sequential_display_ids() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_session().await;

    let first = ctx.create_problem(&admin, "Rate Limiter").await;
    let second = ctx.create_problem(&admin, "Chat Service").await;

    assert_eq!(first["display_id"], 1);
    assert_eq!(second["display_id"], 2);
    assert_eq!(
        listed(&ctx).await,
        vec![("Rate Limiter".to_string(), 1), ("Chat Service".to_string(), 2)]
    );
}

#[tokio::test]
async fn deleting_the_first_problem_renumbers_the_rest() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_session().await;

    let first = ctx.create_problem(&admin, "Rate Limiter").await;
    ctx.create_problem(&admin, "Chat Service").await;

    let response = ctx
        .server
        .delete(&format!("/problems/{}", first["id"].as_str().unwrap()))
        .authorization_bearer(&admin.token)
        .await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["renumbered"], 1);

    assert_eq!(listed(&ctx).await, vec![("Chat Service".to_string(), 1)]);
}

#[tokio::test]
async fn deleting_a_middle_problem_keeps_ids_contiguous() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_session().await;

    let mut ids = Vec::new();
    for title in ["A", "B", "C", "D", "E"] {
        ids.push(ctx.create_problem(&admin, title).await["id"].as_str().unwrap().to_string());
    }

    ctx.server
        .delete(&format!("/problems/{}", ids[2]))
        .authorization_bearer(&admin.token)
        .await
        .assert_status(StatusCode::OK);

    assert_eq!(
        listed(&ctx).await,
        vec![
            ("A".to_string(), 1),
            ("B".to_string(), 2),
            ("D".to_string(), 3),
            ("E".to_string(), 4),
        ]
    );

    let next = ctx.create_problem(&admin, "F").await;
    assert_eq!(next["display_id"], 5);
}

#[tokio::test]
async fn get_problem_returns_full_detail() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_session().await;
    let created = ctx.create_problem(&admin, "URL Shortener").await;

    let response = ctx
        .server
        .get(&format!("/problems/{}", created["id"].as_str().unwrap()))
        .await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["title"], "URL Shortener");
    assert_eq!(body["hints"][0]["title"], "Storage");
    assert_eq!(body["functional_requirements"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn get_unknown_problem_returns_not_found() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .get(&format!("/problems/{}", uuid::Uuid::new_v4()))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_problem_id_returns_bad_request() {
    let ctx = TestContext::new().await;

    let response = ctx.server.get("/problems/undefined").await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_problem_keeps_display_id() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_session().await;
    ctx.create_problem(&admin, "First").await;
    let second = ctx.create_problem(&admin, "Second").await;

    let response = ctx
        .server
        .put(&format!("/problems/{}", second["id"].as_str().unwrap()))
        .authorization_bearer(&admin.token)
        .json(&json!({ "title": "Second, revised", "difficulty": "Hard" }))
        .await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["title"], "Second, revised");
    assert_eq!(body["difficulty"], "Hard");
    assert_eq!(body["display_id"], 2);
    assert_eq!(body["category"], "Distributed Systems");
}

#[tokio::test]
async fn create_problem_with_malformed_hints_is_rejected() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_session().await;

    let mut body = problem_body("Bad Hints");
    body["hints"] = json!([{ "id": "h1", "title": "", "content": "x" }]);

    let response = ctx
        .server
        .post("/problems")
        .authorization_bearer(&admin.token)
        .json(&body)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(listed(&ctx).await.is_empty());
}

#[tokio::test]
async fn delete_unknown_problem_returns_not_found() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_session().await;

    let response = ctx
        .server
        .delete(&format!("/problems/{}", uuid::Uuid::new_v4()))
        .authorization_bearer(&admin.token)
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}
