//! Axum router wiring.
//!
//! `/metrics` serves the Prometheus text registry; every other GET path goes
//! to the preview handler, which answers 404 for paths without `.preview`.

use axum::{extract::State, routing::get, Router};

use crate::{app_state::AppState, preview};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/metrics", get(metrics))
        .route("/*path", get(preview::handler::preview))
        .with_state(state)
}

async fn metrics(State(app): State<AppState>) -> String {
    app.metrics().render()
}
