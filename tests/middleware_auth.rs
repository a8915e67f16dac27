//! Bearer token middleware tests.

mod common;

use axum::routing::get;
use axum::{Router, middleware};
use axum_test::TestServer;
use serde_json::Value;

use campaign_tracker::api::handlers::campaign_list_handler;
use campaign_tracker::api::middleware::auth;
use campaign_tracker::domain::repositories::TokenRepository;

fn make_server() -> (TestServer, common::TestContext) {
    let ctx = common::test_context();
    let app = Router::new()
        .route("/api/campaigns", get(campaign_list_handler))
        .route_layer(middleware::from_fn_with_state(
            ctx.state.clone(),
            auth::layer,
        ))
        .with_state(ctx.state.clone());
    (TestServer::new(app).unwrap(), ctx)
}

#[tokio::test]
async fn test_missing_token_is_401() {
    let (server, _ctx) = make_server();

    let response = server.get("/api/campaigns").await;

    response.assert_status_unauthorized();
    assert_eq!(response.header("www-authenticate"), "Bearer");
}

#[tokio::test]
async fn test_invalid_token_is_401() {
    let (server, _ctx) = make_server();

    let response = server
        .get("/api/campaigns")
        .add_header("Authorization", "Bearer wrong-token")
        .await;

    response.assert_status_unauthorized();

    let body = response.json::<Value>();
    assert_eq!(body["error"]["code"], "unauthorized");
}

#[tokio::test]
async fn test_valid_token_passes_through_and_stamps_last_used() {
    let (server, ctx) = make_server();

    let response = server
        .get("/api/campaigns")
        .add_header(
            "Authorization",
            format!("Bearer {}", common::TEST_TOKEN),
        )
        .await;

    response.assert_status_ok();

    let token = ctx.tokens.find_by_name("test").await.unwrap().unwrap();
    assert!(token.last_used_at.is_some());
}

#[tokio::test]
async fn test_revoked_token_is_401() {
    let (server, ctx) = make_server();

    // Revoke the only seeded token.
    let token = ctx.tokens.find_by_name("test").await.unwrap().unwrap();
    ctx.tokens.revoke_token(token.id).await.unwrap();

    let response = server
        .get("/api/campaigns")
        .add_header(
            "Authorization",
            format!("Bearer {}", common::TEST_TOKEN),
        )
        .await;

    response.assert_status_unauthorized();
}
