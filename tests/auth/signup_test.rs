use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::{test_email, test_password, TestContext};

#[tokio::test]
async fn signup_with_valid_data_returns_created_user() {
    let ctx = TestContext::new().await;
    let email = test_email();

    let response = ctx
        .server
        .post("/auth/signup")
        .json(&json!({
            "name": "Grace Hopper",
            "email": &email,
            "password": test_password()
        }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body: Value = response.json();
    assert_eq!(body["user"]["email"], email.as_str());
    assert_eq!(body["user"]["name"], "Grace Hopper");
    assert_eq!(body["user"]["role"], "User");
    assert_eq!(body["user"]["status"], "active");
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn signup_with_duplicate_email_returns_conflict() {
    let ctx = TestContext::new().await;
    let email = test_email();
    ctx.signup(&email).await;

    let response = ctx
        .server
        .post("/auth/signup")
        .json(&json!({
            "name": "Someone Else",
            "email": email.to_uppercase(),
            "password": test_password()
        }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn signup_with_weak_password_names_the_rule() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/auth/signup")
        .json(&json!({
            "name": "Weak",
            "email": test_email(),
            "password": "alllowercase1"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("at least one uppercase letter"));
}

#[tokio::test]
async fn signup_with_invalid_email_returns_bad_request() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/auth/signup")
        .json(&json!({
            "name": "Nobody",
            "email": "not-an-email",
            "password": test_password()
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn signup_with_whitespace_name_is_rejected() {
    let ctx = TestContext::new().await;
    let email = test_email();

    let response = ctx
        .server
        .post("/auth/signup")
        .json(&json!({
            "name": "   ",
            "email": &email,
            "password": test_password()
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("Name must be 1 to 60 characters"));
    assert!(ctx
        .state
        .repos
        .users
        .find_by_email(&email)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn signup_with_verification_code_consumes_it() {
    let ctx = TestContext::new().await;
    let email = test_email();

    ctx.server
        .post("/auth/send-verification")
        .json(&json!({ "email": &email }))
        .await
        .assert_status(StatusCode::OK);
    let code = ctx.mailer.last_code_for(&email).unwrap();

    ctx.server
        .post("/auth/signup")
        .json(&json!({
            "name": "Verified",
            "email": &email,
            "password": test_password(),
            "code": &code
        }))
        .await
        .assert_status(StatusCode::CREATED);

    // The code is single-use
    ctx.server
        .post("/auth/verify-code")
        .json(&json!({ "email": &email, "code": &code }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn signup_with_wrong_code_creates_nothing() {
    let ctx = TestContext::new().await;
    let email = test_email();

    ctx.server
        .post("/auth/send-verification")
        .json(&json!({ "email": &email }))
        .await
        .assert_status(StatusCode::OK);
    let code = ctx.mailer.last_code_for(&email).unwrap();
    let wrong = if code == "111111" { "222222" } else { "111111" };

    ctx.server
        .post("/auth/signup")
        .json(&json!({
            "name": "Unverified",
            "email": &email,
            "password": test_password(),
            "code": wrong
        }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    ctx.server
        .post("/auth/login")
        .json(&json!({ "email": &email, "password": test_password() }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}
