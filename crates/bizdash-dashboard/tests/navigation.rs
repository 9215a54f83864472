//! Route guard and page mounting through the dashboard shell

#![allow(clippy::unwrap_used)]

mod common;

use bizdash_core::Config;
use bizdash_dashboard::{
    Dashboard, DashboardError, FetchOutcome, NavigationOutcome, Page, Route, render,
};
use common::{SLOW, client, init_test_logging, product};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn dashboard(server: &MockServer, token: Option<&str>) -> Dashboard {
    Dashboard::new(client(server, token), &Config::default())
}

#[tokio::test]
async fn test_guard_redirects_without_token() {
    init_test_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let mut app = dashboard(&server, None);
    let outcome = app.navigate("/users").unwrap();

    assert_eq!(
        outcome,
        NavigationOutcome::Redirected {
            from: Route::Users,
            to: "/auth/sign-in".to_string()
        }
    );
    assert_eq!(app.current_route(), Some(Route::SignIn));
    assert_eq!(app.navigator().entries(), ["/auth/sign-in".to_string()]);
    assert!(app.settle().await.is_none());
    assert!(matches!(
        app.users(),
        Err(DashboardError::PageNotMounted { .. })
    ));
}

#[tokio::test]
async fn test_guarded_page_renders_with_token() {
    init_test_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/all"))
        .and(header("authorization", "Bearer admin-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Ada", "email": "ada@example.com" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let mut app = dashboard(&server, Some("admin-token"));
    assert_eq!(
        app.navigate("/users").unwrap(),
        NavigationOutcome::Rendered(Route::Users)
    );
    assert_eq!(app.settle().await, Some(FetchOutcome::Loaded { count: 1 }));

    let rendered = render::render_page(app.page().unwrap());
    assert!(rendered.contains("ada@example.com"));
    assert!(rendered.contains("Total: 1 user(s)"));
}

#[tokio::test]
async fn test_guard_is_reevaluated_after_sign_in_and_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/reports"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "reports": [] })))
        .mount(&server)
        .await;

    let mut app = dashboard(&server, None);
    assert!(matches!(
        app.navigate("/dashboard/reports").unwrap(),
        NavigationOutcome::Redirected { .. }
    ));

    app.sign_in("fresh-token");
    assert_eq!(
        app.navigate("/dashboard/reports").unwrap(),
        NavigationOutcome::Rendered(Route::Reports)
    );
    assert_eq!(app.settle().await, Some(FetchOutcome::Loaded { count: 0 }));
    assert!(render::render_page(app.page().unwrap()).contains("No Reports Found"));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(
        requests[0].headers.get("authorization").unwrap(),
        "Bearer fresh-token"
    );

    app.sign_out();
    assert!(matches!(
        app.navigate("/dashboard/reports").unwrap(),
        NavigationOutcome::Redirected { .. }
    ));
}

#[tokio::test]
async fn test_back_never_returns_to_refused_page() {
    let server = MockServer::start().await;
    let mut app = dashboard(&server, None);

    // Sign-in itself is open
    assert_eq!(
        app.navigate("/auth/sign-in").unwrap(),
        NavigationOutcome::Rendered(Route::SignIn)
    );
    app.navigate("/dashboard/products").unwrap();

    assert_eq!(
        app.navigator().entries(),
        ["/auth/sign-in".to_string(), "/auth/sign-in".to_string()]
    );
    assert_eq!(
        app.back(),
        Some(NavigationOutcome::Rendered(Route::SignIn))
    );
    assert_eq!(app.back(), None);
}

#[tokio::test]
async fn test_back_reruns_guard() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let mut app = dashboard(&server, Some("t"));
    app.navigate("/users").unwrap();
    app.navigate("/dashboard/home").unwrap();
    app.sign_out();

    assert_eq!(
        app.back(),
        Some(NavigationOutcome::Redirected {
            from: Route::Users,
            to: "/auth/sign-in".to_string()
        })
    );
    assert_eq!(app.navigator().entries(), ["/auth/sign-in".to_string()]);
}

#[tokio::test]
async fn test_leaving_a_page_discards_its_late_response() {
    init_test_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "products": [product(1, "Desk", "pending")] }))
                .set_delay(SLOW),
        )
        .mount(&server)
        .await;

    let mut app = dashboard(&server, Some("t"));
    app.navigate("/products").unwrap();
    let products = app.products().unwrap().clone();

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(
        app.navigate("/dashboard/home").unwrap(),
        NavigationOutcome::Rendered(Route::Home)
    );
    assert!(matches!(app.page(), Some(Page::Home)));

    tokio::time::sleep(SLOW * 2).await;
    let state = products.collection().snapshot();
    assert!(!products.collection().is_mounted());
    assert!(!state.has_loaded());
}

#[tokio::test]
async fn test_unknown_route() {
    let server = MockServer::start().await;
    let mut app = dashboard(&server, Some("t"));

    assert!(matches!(
        app.navigate("/dashboard/message"),
        Err(DashboardError::UnknownRoute { .. })
    ));
    assert!(app.navigator().is_empty());
}
