//! RemoteTableViewer against a mock newsletter service.

#![cfg(not(target_arch = "wasm32"))]

mod common;

use std::sync::Arc;

use common::TestContext;
use newsletter_admin_business::{
    Dataset, HeadlessUi, ModalBody, RemoteTableViewer, ReqwestTransport, ViewState,
    table::EMPTY_PLACEHOLDER,
};

/// The sample subscriber list the `/admin/subscribers` endpoint returns.
fn sample_subscribers() -> serde_json::Value {
    serde_json::json!([
        {
            "id": 1,
            "email": "anna.schmidt@klinikum.de",
            "name": "Anna Schmidt",
            "company": "Klinikum Nord",
            "interests": ["MDR", "FDA"],
            "is_active": true,
            "created_at": "2026-10-01T09:15:00"
        },
        {
            "id": 2,
            "email": "j.meyer@medtech.example",
            "name": null,
            "company": "<b>MedTech & Co</b>",
            "interests": [],
            "is_active": false,
            "created_at": "2026-10-02T11:00:00"
        }
    ])
}

fn viewer(ctx: &TestContext) -> RemoteTableViewer<ReqwestTransport, HeadlessUi> {
    RemoteTableViewer::new(ctx.config.clone(), ctx.transport, HeadlessUi::default())
}

#[tokio::test]
async fn subscribers_render_as_table() {
    let ctx = TestContext::new().await;
    ctx.mock_get_json("/admin/subscribers", 200, sample_subscribers())
        .await;

    let viewer = viewer(&ctx);
    let state = viewer
        .show(Dataset::Subscribers.endpoint(), Dataset::Subscribers.title())
        .await;

    let ViewState::Rendered(table) = state else {
        panic!("expected a rendered table, got {state:?}");
    };

    assert_eq!(
        table.columns(),
        ["id", "email", "name", "company", "interests", "is_active", "created_at"]
    );
    assert_eq!(table.rows().len(), 2);
    assert_eq!(table.rows()[0][4], "[&quot;MDR&quot;,&quot;FDA&quot;]");
    assert_eq!(table.rows()[1][2], "");
    assert_eq!(table.rows()[1][3], "&lt;b&gt;MedTech &amp; Co&lt;/b&gt;");
    assert_eq!(table.rows()[1][5], "false");

    let modals = viewer.ui().modals();
    assert_eq!(modals.len(), 2, "loading placeholder then table");
    assert_eq!(modals[0].1, ModalBody::Loading);
    assert!(modals.iter().all(|(title, _)| title == "Subscribers"));
}

#[tokio::test]
async fn spec_example_round_trip() {
    let ctx = TestContext::new().await;
    ctx.mock_get_json(
        "/admin/changes",
        200,
        serde_json::json!([{"a": 1, "b": null}, {"a": 2, "b": "x"}]),
    )
    .await;

    let state = viewer(&ctx).show("/admin/changes", "Changes").await;

    let ViewState::Rendered(table) = state else {
        panic!("expected a rendered table, got {state:?}");
    };
    assert_eq!(table.columns(), ["a", "b"]);
    assert_eq!(table.rows(), [vec!["1", ""], vec!["2", "x"]]);
}

#[tokio::test]
async fn empty_collection_shows_placeholder_row() {
    let ctx = TestContext::new().await;
    ctx.mock_get_json("/admin/newsletters", 200, serde_json::json!([]))
        .await;

    let viewer = viewer(&ctx);
    viewer.show("/admin/newsletters", "Newsletters").await;

    let Some((_, body)) = viewer.ui().current_modal() else {
        panic!("modal never rendered");
    };
    let html = body.to_html();
    assert_eq!(html.matches("<tr>").count(), 1);
    assert!(html.contains(EMPTY_PLACEHOLDER));
}

#[tokio::test]
async fn server_error_field_is_rendered_without_table() {
    let ctx = TestContext::new().await;
    ctx.mock_get_json("/admin/documents", 500, serde_json::json!({"error": "boom"}))
        .await;

    let viewer = viewer(&ctx);
    let state = viewer.show("/admin/documents", "Documents").await;

    assert_eq!(state, ViewState::Errored("boom".to_owned()));
    let Some((_, body)) = viewer.ui().current_modal() else {
        panic!("modal never rendered");
    };
    let html = body.to_html();
    assert!(html.contains("boom"));
    assert!(!html.contains("<table"));
}

#[tokio::test]
async fn status_without_error_field_names_the_code() {
    let ctx = TestContext::new().await;
    ctx.mock_get_raw("/admin/users", 403, "Forbidden", "text/plain")
        .await;

    let state = viewer(&ctx).show("/admin/users", "Users").await;

    assert_eq!(
        state,
        ViewState::Errored("HTTP error! status: 403".to_owned())
    );
}

#[tokio::test]
async fn unreachable_service_is_reported_inline() {
    let ctx = TestContext::new().await;
    let config = newsletter_admin_business::BusinessConfig::new("http://127.0.0.1:9");
    let viewer = RemoteTableViewer::new(config, ctx.transport, HeadlessUi::default());

    let state = viewer.show("/admin/subscribers", "Subscribers").await;

    assert!(matches!(state, ViewState::Errored(ref m) if !m.is_empty()));
    assert!(matches!(
        viewer.ui().current_modal(),
        Some((_, ModalBody::Error(_)))
    ));
}

#[tokio::test]
async fn failures_are_not_retried() {
    let ctx = TestContext::new().await;
    ctx.mock_get_json("/admin/changes", 503, serde_json::json!({"error": "down"}))
        .await;

    viewer(&ctx).show("/admin/changes", "Changes").await;

    assert_eq!(ctx.request_count().await, 1);
}

#[tokio::test]
async fn spawned_view_can_be_awaited() {
    let ctx = TestContext::new().await;
    ctx.mock_get_json("/admin/subscribers", 200, sample_subscribers())
        .await;

    let viewer = Arc::new(viewer(&ctx));
    let task = viewer.spawn_show("/admin/subscribers", "Subscribers");
    assert!(!task.is_cancelled());

    let state = task.join().await.expect("view task panicked");
    assert!(matches!(state, ViewState::Rendered(ref t) if t.rows().len() == 2));
    assert_eq!(viewer.state(), state);
}
