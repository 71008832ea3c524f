// Presentation layer - HTTP routes, pages and live chart connections
pub mod app_state;
pub mod handlers;
pub mod live;
pub mod pages;

use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{chart_svg, energy_page, energy_summary, health_check, health_page, home};
use crate::presentation::live::live_chart;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

// Compression is handled in the response builders, not by a layer.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/", get(home))
        .route("/energia", get(energy_page))
        .route("/saude", get(health_page))
        .route("/charts/:chart", get(chart_svg))
        .route("/summary/energia", get(energy_summary))
        .route("/live/:chart", get(live_chart))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
