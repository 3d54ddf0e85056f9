mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::{expect_error, TestServer};

#[tokio::test]
async fn health_and_root_are_public() -> Result<()> {
    let server = TestServer::start().await?;

    let res = server.client.get(server.url("/health")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["database"], "ok");

    let res = server.client.get(server.url("/")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["name"], "hrdocs-api");
    Ok(())
}

#[tokio::test]
async fn signup_then_signin_issues_token() -> Result<()> {
    let server = TestServer::start().await?;

    let res = server.signup("alice", "pw1").await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await?;
    assert!(body["message"].is_string());

    let res = server.signin("alice", "pw1").await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    let token = body["token"].as_str().unwrap_or_default();
    assert_eq!(token.split('.').count(), 3);
    Ok(())
}

#[tokio::test]
async fn duplicate_name_is_rejected_regardless_of_password() -> Result<()> {
    let server = TestServer::start().await?;

    assert_eq!(server.signup("alice", "pw1").await?.status(), StatusCode::CREATED);
    expect_error(server.signup("alice", "other").await?, StatusCode::BAD_REQUEST, "1003").await?;

    // The first password still works
    assert_eq!(server.signin("alice", "pw1").await?.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn wrong_password_and_unknown_user_look_the_same() -> Result<()> {
    let server = TestServer::start().await?;
    server.signup("alice", "pw1").await?;

    let wrong = expect_error(server.signin("alice", "nope").await?, StatusCode::FORBIDDEN, "1002").await?;
    let unknown = expect_error(server.signin("bob", "pw1").await?, StatusCode::FORBIDDEN, "1002").await?;
    assert_eq!(wrong, unknown);
    Ok(())
}

#[tokio::test]
async fn malformed_auth_bodies_are_1001() -> Result<()> {
    let server = TestServer::start().await?;

    for path in ["/api/v1/SignUp", "/api/v1/SignIn"] {
        let res = server
            .client
            .post(server.url(path))
            .json(&json!({ "name": "alice" }))
            .send()
            .await?;
        expect_error(res, StatusCode::BAD_REQUEST, "1001").await?;

        let res = server
            .client
            .post(server.url(path))
            .body("name=alice&password=pw")
            .send()
            .await?;
        expect_error(res, StatusCode::BAD_REQUEST, "1001").await?;
    }
    Ok(())
}

#[tokio::test]
async fn protected_routes_reject_missing_or_bad_tokens() -> Result<()> {
    let server = TestServer::start().await?;

    let res = server.client.get(server.url("/api/v1/Documents")).send().await?;
    expect_error(res, StatusCode::UNAUTHORIZED, "1005").await?;

    let res = server.get("/api/v1/employees", "not.a.token").await?;
    expect_error(res, StatusCode::UNAUTHORIZED, "1005").await?;

    // Signed with a different secret
    let foreign = hrdocs_api::auth::TokenKeys::from_secret(b"some-other-secret", 15).issue(1)?;
    let res = server.get("/api/v1/employees", &foreign).await?;
    expect_error(res, StatusCode::UNAUTHORIZED, "1005").await?;
    Ok(())
}

#[tokio::test]
async fn unknown_route_is_1004() -> Result<()> {
    let server = TestServer::start().await?;
    let token = server.token_for("alice", "pw1").await?;

    let res = server.get("/api/v1/Nothing", &token).await?;
    expect_error(res, StatusCode::NOT_FOUND, "1004").await?;

    let res = server.get("/api/v1/Document/abc/Comments", &token).await?;
    expect_error(res, StatusCode::NOT_FOUND, "1004").await?;
    Ok(())
}
