//! The built-in renderer wired through the whole service.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use tower::ServiceExt;

use hits_gateway::{app_state::AppState, config::HitsConfig, router::build_router};

async fn body_of(app: &axum::Router, uri: &str) -> (StatusCode, String) {
    let resp = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn counts_per_identifier() {
    let state = AppState::with_default_renderer(HitsConfig::default()).unwrap();
    let app = build_router(state);

    for _ in 0..2 {
        body_of(&app, "/github.com/a.preview").await;
    }
    let (status, svg) = body_of(&app, "/github.com/a.preview?view=today/total").await;
    assert_eq!(status, StatusCode::OK);
    assert!(svg.contains(">3 / 3</text>"));

    let (_, other) = body_of(&app, "/github.com/b.preview").await;
    assert!(other.contains(">1</text>"));
}

#[tokio::test]
async fn unknown_view_is_unavailable() {
    let state = AppState::with_default_renderer(HitsConfig::default()).unwrap();
    let app = build_router(state);

    let (status, svg) = body_of(&app, "/x.preview?view=weekly").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(svg.contains("Service Unavailable"));
}
