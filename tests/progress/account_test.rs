use axum::http::StatusCode;
use serde_json::json;

use leetdesign::modules::auth::model::{Role, User, UserStatus};
use leetdesign::services::hashing;

use crate::common::{test_email, test_password, TestContext};

#[tokio::test]
async fn token_of_deleted_user_cannot_write_or_read_progress() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_session().await;
    let problem = ctx.create_problem(&admin, "Chat Service").await;
    let problem_id = problem["id"].as_str().unwrap();
    let user = ctx.user_session().await;

    ctx.server
        .delete("/admin/users")
        .authorization_bearer(&admin.token)
        .json(&json!({ "user_id": &user.id }))
        .await
        .assert_status(StatusCode::OK);

    ctx.server
        .post("/progress")
        .authorization_bearer(&user.token)
        .json(&json!({ "problem_id": problem_id, "solution": "Websockets" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    ctx.server
        .get("/progress")
        .authorization_bearer(&user.token)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    ctx.server
        .post("/grading/check")
        .authorization_bearer(&user.token)
        .json(&json!({ "problem_id": problem_id, "solution": "Websockets" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let stored = ctx
        .state
        .repos
        .progress
        .list_for_user(&user.id)
        .await
        .unwrap();
    assert!(stored.is_empty());
}

#[tokio::test]
async fn token_of_inactive_user_is_forbidden() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_session().await;
    let problem = ctx.create_problem(&admin, "Feed Ranking").await;
    let problem_id = problem["id"].as_str().unwrap();

    let user = User::new(
        "Dormant".to_string(),
        test_email(),
        hashing::hash_password(test_password()).unwrap(),
        Role::User,
        UserStatus::Inactive,
    );
    ctx.state.repos.users.create(&user).await.unwrap();
    let token = ctx
        .state
        .jwt_service
        .create_session_token(&user.id, &user.email, user.role)
        .unwrap();

    ctx.server
        .put(&format!("/progress/{}", problem_id))
        .authorization_bearer(&token)
        .json(&json!({ "status": "in_progress" }))
        .await
        .assert_status(StatusCode::FORBIDDEN);
}
