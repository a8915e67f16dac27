//! Campaign endpoint tests over in-memory repositories.

mod common;

use axum::Router;
use axum::routing::get;
use axum_test::TestServer;
use serde_json::{Value, json};

use campaign_tracker::api::handlers::{
    campaign_list_handler, create_campaign_handler, delete_campaign_handler, get_campaign_handler,
    update_campaign_handler,
};

fn make_server() -> (TestServer, common::TestContext) {
    let ctx = common::test_context();
    let app = Router::new()
        .route(
            "/api/campaigns",
            get(campaign_list_handler).post(create_campaign_handler),
        )
        .route(
            "/api/campaigns/{id}",
            get(get_campaign_handler)
                .patch(update_campaign_handler)
                .delete(delete_campaign_handler),
        )
        .with_state(ctx.state.clone());
    (TestServer::new(app).unwrap(), ctx)
}

#[tokio::test]
async fn test_create_campaign_returns_201() {
    let (server, _ctx) = make_server();

    let response = server
        .post("/api/campaigns")
        .json(&json!({
            "name": "Summer Sale",
            "start_date": "2026-06-01",
            "end_date": "2026-08-31",
            "budget": 100000
        }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);

    let body = response.json::<Value>();
    assert_eq!(body["name"], "Summer Sale");
    assert_eq!(body["budget"], 100000);
    assert!(body["id"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn test_create_campaign_empty_name_is_400() {
    let (server, _ctx) = make_server();

    let response = server
        .post("/api/campaigns")
        .json(&json!({
            "name": "",
            "start_date": "2026-06-01",
            "end_date": "2026-08-31"
        }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_create_campaign_inverted_dates_is_400() {
    let (server, _ctx) = make_server();

    let response = server
        .post("/api/campaigns")
        .json(&json!({
            "name": "Backwards",
            "start_date": "2026-08-31",
            "end_date": "2026-06-01"
        }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_get_campaign_roundtrip() {
    let (server, ctx) = make_server();
    let id = ctx.campaigns.seed("Summer Sale", 1000);

    let response = server.get(&format!("/api/campaigns/{id}")).await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["id"], id);
    assert_eq!(body["budget"], 1000);
}

#[tokio::test]
async fn test_get_unknown_campaign_is_404() {
    let (server, _ctx) = make_server();

    server.get("/api/campaigns/999").await.assert_status_not_found();
}

#[tokio::test]
async fn test_list_campaigns_paginated() {
    let (server, ctx) = make_server();
    for i in 0..3 {
        ctx.campaigns.seed(&format!("Campaign {i}"), 1000);
    }

    let response = server
        .get("/api/campaigns")
        .add_query_param("page", "1")
        .add_query_param("page_size", "2")
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["total"], 3);
    assert_eq!(body["campaigns"].as_array().unwrap().len(), 2);
    assert_eq!(body["page_size"], 2);
}

#[tokio::test]
async fn test_update_campaign_budget() {
    let (server, ctx) = make_server();
    let id = ctx.campaigns.seed("Summer Sale", 1000);

    let response = server
        .patch(&format!("/api/campaigns/{id}"))
        .json(&json!({ "budget": 50000 }))
        .await;

    response.assert_status_ok();
    assert_eq!(ctx.campaigns.budget_of(id), Some(50000));
}

#[tokio::test]
async fn test_update_unknown_campaign_is_404() {
    let (server, _ctx) = make_server();

    let response = server
        .patch("/api/campaigns/999")
        .json(&json!({ "budget": 1 }))
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_delete_campaign_then_get_is_404() {
    let (server, ctx) = make_server();
    let id = ctx.campaigns.seed("Summer Sale", 1000);

    server
        .delete(&format!("/api/campaigns/{id}"))
        .await
        .assert_status(axum::http::StatusCode::NO_CONTENT);

    server
        .get(&format!("/api/campaigns/{id}"))
        .await
        .assert_status_not_found();

    // Second delete: already soft-deleted.
    server
        .delete(&format!("/api/campaigns/{id}"))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_deleted_campaigns_are_excluded_from_list() {
    let (server, ctx) = make_server();
    ctx.campaigns.seed("Live", 1000);
    ctx.campaigns.seed_deleted("Gone", 1000);

    let response = server.get("/api/campaigns").await;

    let body = response.json::<Value>();
    assert_eq!(body["total"], 1);
    assert_eq!(body["campaigns"][0]["name"], "Live");
}
