use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use index_dashboard_core::models::index::MarketIndex;
use index_dashboard_core::models::outcome::UpdateResult;
use index_dashboard_core::{IndexDashboard, UpdateRequest};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use crate::page;

type SharedDashboard = Arc<IndexDashboard>;

#[derive(Debug, Deserialize)]
pub struct UpdateParams {
    symbol: Option<String>,
    start: Option<String>,
    end: Option<String>,
}

pub fn router(dashboard: SharedDashboard) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/indices", get(list_indices))
        .route("/api/update", get(update_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(dashboard)
}

async fn index_page(State(dashboard): State<SharedDashboard>) -> Html<String> {
    Html(page::render(&dashboard))
}

async fn health() -> &'static str {
    "ok"
}

async fn list_indices(State(dashboard): State<SharedDashboard>) -> Json<Vec<MarketIndex>> {
    Json(dashboard.indices().into_iter().cloned().collect())
}

/// One pipeline run per input change. Missing inputs fall back to the
/// configured defaults; the response is always 200 with a renderable result.
async fn update_handler(
    State(dashboard): State<SharedDashboard>,
    Query(params): Query<UpdateParams>,
) -> Json<UpdateResult> {
    let defaults = dashboard.default_request();
    let request = UpdateRequest {
        symbol: params.symbol.unwrap_or(defaults.symbol),
        start: params.start.unwrap_or(defaults.start),
        end: params.end.unwrap_or(defaults.end),
    };
    Json(dashboard.update_request(&request).await)
}
