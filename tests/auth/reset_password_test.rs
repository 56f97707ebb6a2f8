use axum::http::StatusCode;
use serde_json::json;

use crate::common::{test_email, test_password, TestContext};

#[tokio::test]
async fn reset_password_with_valid_code_changes_the_password() {
    let ctx = TestContext::new().await;
    let email = test_email();
    ctx.signup(&email).await;

    ctx.server
        .post("/auth/send-verification")
        .json(&json!({ "email": &email }))
        .await
        .assert_status(StatusCode::OK);
    let code = ctx.mailer.last_code_for(&email).unwrap();

    ctx.server
        .put("/auth/reset-password")
        .json(&json!({
            "email": &email,
            "code": &code,
            "new_password": "BrandNewPass9"
        }))
        .await
        .assert_status(StatusCode::OK);

    ctx.server
        .post("/auth/login")
        .json(&json!({ "email": &email, "password": test_password() }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    ctx.login(&email, "BrandNewPass9").await;
}

#[tokio::test]
async fn reset_password_for_unknown_email_returns_not_found() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .put("/auth/reset-password")
        .json(&json!({
            "email": test_email(),
            "code": "123456",
            "new_password": "BrandNewPass9"
        }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reset_password_with_wrong_code_keeps_the_old_password() {
    let ctx = TestContext::new().await;
    let email = test_email();
    ctx.signup(&email).await;

    ctx.server
        .post("/auth/send-verification")
        .json(&json!({ "email": &email }))
        .await;
    let code = ctx.mailer.last_code_for(&email).unwrap();
    let wrong = if code == "123456" { "654321" } else { "123456" };

    ctx.server
        .put("/auth/reset-password")
        .json(&json!({
            "email": &email,
            "code": wrong,
            "new_password": "BrandNewPass9"
        }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    ctx.login(&email, test_password()).await;
}

#[tokio::test]
async fn reset_password_enforces_strength() {
    let ctx = TestContext::new().await;
    let email = test_email();
    ctx.signup(&email).await;

    let response = ctx
        .server
        .put("/auth/reset-password")
        .json(&json!({
            "email": &email,
            "code": "123456",
            "new_password": "short"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}
