use axum::http::StatusCode;
use serde_json::Value;

use crate::common::{problem_body, TestContext};

#[tokio::test]
async fn regular_users_cannot_create_problems() {
    let ctx = TestContext::new().await;
    let user = ctx.user_session().await;

    let response = ctx
        .server
        .post("/problems")
        .authorization_bearer(&user.token)
        .json(&problem_body("Sneaky"))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn anonymous_callers_cannot_delete_problems() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_session().await;
    let problem = ctx.create_problem(&admin, "Protected").await;

    let response = ctx
        .server
        .delete(&format!("/problems/{}", problem["id"].as_str().unwrap()))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn anonymous_listing_has_no_progress_flags_set() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_session().await;
    ctx.create_problem(&admin, "Feed").await;

    let body: Value = ctx.server.get("/problems").await.json();
    let first = &body["problems"][0];

    assert_eq!(first["attempted"], false);
    assert_eq!(first["completed"], false);
    assert!(first.get("reference_solution").is_none());
}

#[tokio::test]
async fn signed_in_listing_reflects_progress() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_session().await;
    let started = ctx.create_problem(&admin, "Started").await;
    let finished = ctx.create_problem(&admin, "Finished").await;
    ctx.create_problem(&admin, "Untouched").await;

    let user = ctx.user_session().await;
    ctx.server
        .post("/progress")
        .authorization_bearer(&user.token)
        .json(&serde_json::json!({ "problem_id": started["id"], "solution": "draft" }))
        .await
        .assert_status(StatusCode::OK);
    ctx.server
        .post(&format!("/progress/{}/complete", finished["id"].as_str().unwrap()))
        .authorization_bearer(&user.token)
        .await
        .assert_status(StatusCode::OK);

    let body: Value = ctx
        .server
        .get("/problems")
        .authorization_bearer(&user.token)
        .await
        .json();
    let flags: Vec<(bool, bool)> = body["problems"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| (p["attempted"].as_bool().unwrap(), p["completed"].as_bool().unwrap()))
        .collect();

    assert_eq!(flags, vec![(true, false), (true, true), (false, false)]);
}
