use axum::http::{header::COOKIE, HeaderValue, StatusCode};
use serde_json::{json, Value};

use crate::common::TestContext;

#[tokio::test]
async fn me_with_valid_token_returns_user_data() {
    let ctx = TestContext::new().await;
    let session = ctx.user_session().await;

    let response = ctx
        .server
        .get("/auth/me")
        .authorization_bearer(&session.token)
        .await;

    response.assert_status(StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["user"]["id"], session.id.as_str());
    assert_eq!(body["user"]["email"], session.email.as_str());
}

#[tokio::test]
async fn me_accepts_the_session_cookie() {
    let ctx = TestContext::new().await;
    let session = ctx.user_session().await;

    let response = ctx
        .server
        .get("/auth/me")
        .add_header(
            COOKIE,
            HeaderValue::from_str(&format!("auth_token={}", session.token)).unwrap(),
        )
        .await;

    response.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn me_without_token_returns_unauthorized() {
    let ctx = TestContext::new().await;

    let response = ctx.server.get("/auth/me").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_with_garbage_token_returns_unauthorized() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .get("/auth/me")
        .authorization_bearer("not.a.jwt")
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn update_me_changes_the_display_name() {
    let ctx = TestContext::new().await;
    let session = ctx.user_session().await;

    let response = ctx
        .server
        .put("/auth/me")
        .authorization_bearer(&session.token)
        .json(&json!({ "name": "Renamed" }))
        .await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["user"]["name"], "Renamed");

    let me: Value = ctx
        .server
        .get("/auth/me")
        .authorization_bearer(&session.token)
        .await
        .json();
    assert_eq!(me["user"]["name"], "Renamed");
}

#[tokio::test]
async fn update_me_rejects_empty_name() {
    let ctx = TestContext::new().await;
    let session = ctx.user_session().await;

    let response = ctx
        .server
        .put("/auth/me")
        .authorization_bearer(&session.token)
        .json(&json!({ "name": "" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_me_rejects_whitespace_name() {
    let ctx = TestContext::new().await;
    let session = ctx.user_session().await;

    ctx.server
        .put("/auth/me")
        .authorization_bearer(&session.token)
        .json(&json!({ "name": " \t " }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
