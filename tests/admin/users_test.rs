use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::{test_email, test_password, TestContext};

#[tokio::test]
async fn admin_lists_users() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_session().await;
    let user = ctx.user_session().await;

    let response = ctx
        .server
        .get("/admin/users")
        .authorization_bearer(&admin.token)
        .await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    let emails: Vec<&str> = body["users"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["email"].as_str().unwrap())
        .collect();
    assert!(emails.contains(&admin.email.as_str()));
    assert!(emails.contains(&user.email.as_str()));
}

#[tokio::test]
async fn non_admin_gets_forbidden() {
    let ctx = TestContext::new().await;
    let user = ctx.user_session().await;

    ctx.server
        .get("/admin/users")
        .authorization_bearer(&user.token)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_creates_user_with_explicit_role() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_session().await;
    let email = test_email();

    let response = ctx
        .server
        .post("/admin/users")
        .authorization_bearer(&admin.token)
        .json(&json!({
            "name": "Second Admin",
            "email": &email,
            "password": test_password(),
            "role": "Admin"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["user"]["role"], "Admin");
    assert_eq!(body["user"]["status"], "active");

    // The new admin can use admin routes right away
    let second = ctx.login(&email, test_password()).await;
    ctx.server
        .get("/admin/users")
        .authorization_bearer(&second.token)
        .await
        .assert_status(StatusCode::OK);
}

#[tokio::test]
async fn admin_deletes_regular_user() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_session().await;
    let user = ctx.user_session().await;

    ctx.server
        .delete("/admin/users")
        .authorization_bearer(&admin.token)
        .json(&json!({ "user_id": &user.id }))
        .await
        .assert_status(StatusCode::OK);

    ctx.server
        .post("/auth/login")
        .json(&json!({ "email": &user.email, "password": test_password() }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_records_cannot_be_deleted() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_session().await;
    let other_admin = ctx.admin_session().await;

    let response = ctx
        .server
        .delete("/admin/users")
        .authorization_bearer(&admin.token)
        .json(&json!({ "user_id": &other_admin.id }))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn deleting_unknown_user_returns_not_found() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_session().await;

    ctx.server
        .delete("/admin/users")
        .authorization_bearer(&admin.token)
        .json(&json!({ "user_id": uuid::Uuid::new_v4().to_string() }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
