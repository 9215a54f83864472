//! Edit dialogs: draft, submit, refetch

#![allow(clippy::unwrap_used)]

mod common;

use bizdash_core::ModerationStatus;
use bizdash_dashboard::{
    DashboardError, EditState, FetchOutcome, ProductsView, StatusDraft, SubscriptionsView, render,
};
use common::{client, init_test_logging, plan, product};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_product_status_update_refetches_and_closes_dialog() {
    init_test_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "products": [product(1, "Desk", "pending")] })),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "products": [product(1, "Desk", "approved")] })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/products/1/status"))
        .and(body_json(json!({ "status": "approved" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let view = ProductsView::new(client(&server, Some("t")));
    view.load().await;

    view.open_status_edit(1).unwrap();
    assert_eq!(
        view.edit_state(),
        EditState::Open {
            key: 1,
            draft: StatusDraft {
                status: ModerationStatus::Pending
            }
        }
    );
    view.set_draft_status(ModerationStatus::Approved).unwrap();
    assert!(render::render_products(&view).contains("(x) approved  ( ) pending"));

    // The collection is untouched until the refetch
    assert_eq!(
        view.collection().items()[0].status,
        ModerationStatus::Pending
    );

    let outcome = view.submit_status().await.unwrap();
    assert_eq!(outcome, FetchOutcome::Loaded { count: 1 });
    assert_eq!(view.edit_state(), EditState::Closed);
    assert_eq!(
        view.collection().items()[0].status,
        ModerationStatus::Approved
    );
}

#[tokio::test]
async fn test_failed_status_update_keeps_dialog_and_draft() {
    init_test_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "products": [product(1, "Desk", "pending")] })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/products/1/status"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let view = ProductsView::new(client(&server, Some("t")));
    view.load().await;
    view.open_status_edit(1).unwrap();
    view.set_draft_status(ModerationStatus::Rejected).unwrap();

    let err = view.submit_status().await.unwrap_err();
    assert!(err.is_remote());
    assert_eq!(
        view.edit_state(),
        EditState::Open {
            key: 1,
            draft: StatusDraft {
                status: ModerationStatus::Rejected
            }
        }
    );
    assert_eq!(
        view.collection().items()[0].status,
        ModerationStatus::Pending
    );
}

#[tokio::test]
async fn test_submit_without_dialog_is_refused() {
    let server = MockServer::start().await;
    let view = ProductsView::new(client(&server, Some("t")));

    assert!(matches!(
        view.submit_status().await,
        Err(DashboardError::NoDraft)
    ));
    assert!(matches!(
        view.open_status_edit(1),
        Err(DashboardError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_expanded_row_is_keyed_by_title() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": [product(1, "Desk", "pending"), product(2, "Chair", "approved")]
        })))
        .mount(&server)
        .await;

    let view = ProductsView::new(client(&server, None));
    view.load().await;

    assert!(view.toggle_expanded("Chair"));
    assert!(view.toggle_expanded("Desk"));
    assert_eq!(view.expanded().as_deref(), Some("Desk"));

    let rendered = render::render_products(&view);
    assert!(rendered.contains(&format!("Image: {}/uploads/b.jpg", server.uri())));

    assert!(!view.toggle_expanded("Desk"));
    assert!(view.expanded().is_none());
}

#[tokio::test]
async fn test_subscription_submit_sends_full_draft() {
    init_test_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/subscriptions/get-all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            plan(1, "Silver"),
            plan(2, "Gold")
        ])))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/subscriptions/update-single-subscription/1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/subscriptions/update-single-subscription/2"))
        .and(body_json(json!({
            "name": "Gold",
            "priceWeekly": 5.0,
            "priceMonthly": 20.0,
            "priceYearly": 150.0,
            "isActive": false
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let view = SubscriptionsView::new(client(&server, Some("t")));
    view.load().await;

    // Opening a second dialog replaces the first draft entirely
    view.open_edit(1).unwrap();
    view.update_draft(|draft| draft.name = "Bronze".to_string())
        .unwrap();
    view.open_edit(2).unwrap();
    view.update_draft(|draft| {
        draft.price_monthly = Decimal::from(20);
        draft.is_active = false;
    })
    .unwrap();

    let outcome = view.submit().await.unwrap();
    assert_eq!(outcome, FetchOutcome::Loaded { count: 2 });
    assert_eq!(view.edit_state(), EditState::Closed);
}

#[tokio::test]
async fn test_closing_dialog_discards_draft() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/subscriptions/get-all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([plan(1, "Silver")])))
        .mount(&server)
        .await;

    let view = SubscriptionsView::new(client(&server, Some("t")));
    view.load().await;

    view.open_edit(1).unwrap();
    view.update_draft(|draft| draft.name = "Platinum".to_string())
        .unwrap();
    view.close_edit();

    assert_eq!(view.edit_state(), EditState::Closed);
    assert!(matches!(
        view.update_draft(|_| {}),
        Err(DashboardError::NoDraft)
    ));
    assert_eq!(view.collection().items()[0].name, "Silver");
}
