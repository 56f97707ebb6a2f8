use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::{test_email, TestContext};

#[tokio::test]
async fn send_verification_mails_a_six_digit_code() {
    let ctx = TestContext::new().await;
    let email = test_email();

    let response = ctx
        .server
        .post("/auth/send-verification")
        .json(&json!({ "email": &email }))
        .await;

    response.assert_status(StatusCode::OK);

    let sent = ctx.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, email);
    assert_eq!(sent[0].subject, "Verify your email for LeetDesign");

    let code = ctx.mailer.last_code_for(&email).unwrap();
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_digit()));
}

#[tokio::test]
async fn second_request_within_a_minute_is_throttled() {
    let ctx = TestContext::new().await;
    let email = test_email();

    ctx.server
        .post("/auth/send-verification")
        .json(&json!({ "email": &email }))
        .await
        .assert_status(StatusCode::OK);

    let response = ctx
        .server
        .post("/auth/send-verification")
        .json(&json!({ "email": &email }))
        .await;

    response.assert_status(StatusCode::TOO_MANY_REQUESTS);

    let body: Value = response.json();
    let retry_after = body["retry_after_secs"].as_i64().unwrap();
    assert!(retry_after > 0 && retry_after <= 60);
    assert_eq!(ctx.mailer.sent().len(), 1);
}

#[tokio::test]
async fn verify_code_succeeds_once() {
    let ctx = TestContext::new().await;
    let email = test_email();

    ctx.server
        .post("/auth/send-verification")
        .json(&json!({ "email": &email }))
        .await
        .assert_status(StatusCode::OK);
    let code = ctx.mailer.last_code_for(&email).unwrap();

    ctx.server
        .post("/auth/verify-code")
        .json(&json!({ "email": &email, "code": &code }))
        .await
        .assert_status(StatusCode::OK);

    ctx.server
        .post("/auth/verify-code")
        .json(&json!({ "email": &email, "code": &code }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn verify_with_wrong_code_returns_bad_request() {
    let ctx = TestContext::new().await;
    let email = test_email();

    ctx.server
        .post("/auth/send-verification")
        .json(&json!({ "email": &email }))
        .await;
    let code = ctx.mailer.last_code_for(&email).unwrap();
    let wrong = if code == "999999" { "100000" } else { "999999" };

    let response = ctx
        .server
        .post("/auth/verify-code")
        .json(&json!({ "email": &email, "code": wrong }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    // The real code is still usable
    ctx.server
        .post("/auth/verify-code")
        .json(&json!({ "email": &email, "code": &code }))
        .await
        .assert_status(StatusCode::OK);
}

#[tokio::test]
async fn code_is_discarded_after_too_many_wrong_guesses() {
    let ctx = TestContext::new().await;
    let email = test_email();

    ctx.server
        .post("/auth/send-verification")
        .json(&json!({ "email": &email }))
        .await;
    let code = ctx.mailer.last_code_for(&email).unwrap();
    let wrong = if code == "999999" { "100000" } else { "999999" };

    for _ in 0..leetdesign::services::verification::MAX_ATTEMPTS {
        ctx.server
            .post("/auth/verify-code")
            .json(&json!({ "email": &email, "code": wrong }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    ctx.server
        .post("/auth/verify-code")
        .json(&json!({ "email": &email, "code": &code }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn verify_without_any_code_returns_not_found() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/auth/verify-code")
        .json(&json!({ "email": test_email(), "code": "123456" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_code_is_rejected_before_lookup() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/auth/verify-code")
        .json(&json!({ "email": test_email(), "code": "12ab56" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}
