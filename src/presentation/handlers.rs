// HTTP request handlers
use crate::application::charts::ChartKind;
use crate::application::view_scope::ViewScope;
use crate::domain::theme::{Theme, ThemeName};
use crate::domain::view::ViewState;
use crate::infrastructure::config::ChartSettings;
use crate::infrastructure::http_response::{accepts_brotli, json_response, text_response, HTML, JSON, SVG};
use crate::infrastructure::svg::render_svg;
use crate::presentation::app_state::AppState;
use crate::presentation::pages;
use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{HeaderMap, Response, StatusCode},
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;

const PLAIN_TEXT: &str = "text/plain; charset=utf-8";

/// Measured container width and active theme, as reported by the client.
#[derive(Debug, Default, Deserialize)]
pub struct ChartQuery {
    pub width: Option<f64>,
    pub theme: Option<ThemeName>,
}

impl ChartQuery {
    fn resolve(&self, settings: &ChartSettings) -> (f64, Theme) {
        (
            settings.container_width(self.width),
            self.theme.unwrap_or(settings.theme).into(),
        )
    }
}

fn template_error(e: askama::Error) -> StatusCode {
    tracing::error!("Failed to render page: {}", e);
    StatusCode::INTERNAL_SERVER_ERROR
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn home(
    Query(query): Query<ChartQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response<Body>, StatusCode> {
    let (_, theme) = query.resolve(&state.charts);
    let page = pages::home_page(&theme).map_err(template_error)?;
    text_response(page, HTML, StatusCode::OK, accepts_brotli(&headers)).await
}

/// Efficiency chart with its summary, plus the full-dataset metrics
pub async fn energy_page(
    Query(query): Query<ChartQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response<Body>, StatusCode> {
    let (width, theme) = query.resolve(&state.charts);
    let scope = ViewScope::new();

    let dashboard = state.dashboard_service.energy_dashboard(&scope, width, &theme).await;
    let page = pages::energy_page(&dashboard, &theme).map_err(template_error)?;
    text_response(page, HTML, StatusCode::OK, accepts_brotli(&headers)).await
}

pub async fn health_page(
    Query(query): Query<ChartQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response<Body>, StatusCode> {
    let (width, theme) = query.resolve(&state.charts);
    let scope = ViewScope::new();

    let dashboard = state.dashboard_service.health_dashboard(&scope, width, &theme).await;
    let page = pages::health_page(&dashboard, &theme).map_err(template_error)?;
    text_response(page, HTML, StatusCode::OK, accepts_brotli(&headers)).await
}

/// Single chart as a standalone SVG document
pub async fn chart_svg(
    Path(slug): Path<String>,
    Query(query): Query<ChartQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response<Body>, StatusCode> {
    let kind = ChartKind::from_slug(&slug).ok_or(StatusCode::NOT_FOUND)?;
    let (width, theme) = query.resolve(&state.charts);
    let scope = ViewScope::new();
    let compress = accepts_brotli(&headers);

    match state.dashboard_service.chart_view(&scope, kind, width, &theme).await {
        ViewState::Ready(Some(scene)) => text_response(render_svg(&scene, kind.slug()), SVG, StatusCode::OK, compress).await,
        ViewState::Ready(None) => Ok(StatusCode::NO_CONTENT.into_response()),
        ViewState::Failed(message) => {
            text_response(format!("Erro: {}", message), PLAIN_TEXT, StatusCode::BAD_GATEWAY, compress).await
        }
        ViewState::Pending => {
            let body = pages::LOADING_MESSAGE.to_string();
            text_response(body, PLAIN_TEXT, StatusCode::SERVICE_UNAVAILABLE, compress).await
        }
    }
}

/// Full-dataset metric cards as JSON
pub async fn energy_summary(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response<Body>, StatusCode> {
    let compress = accepts_brotli(&headers);

    match state.dashboard_service.energy_metrics().await {
        Ok(cards) => json_response(&cards, compress).await,
        Err(e) => {
            tracing::warn!(error = %e, "energy summary failed");
            let body = serde_json::json!({ "error": e.user_message() }).to_string();
            text_response(body, JSON, StatusCode::BAD_GATEWAY, compress).await
        }
    }
}
