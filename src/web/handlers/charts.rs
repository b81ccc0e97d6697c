// Chart data and rendered chart handlers.
//
// GET /api/histogram        — histogram bin edges and counts
// GET /api/tokens?top=K     — top-K token bars (K defaults to the configured value)
// GET /charts/histogram.svg — rendered length histogram
// GET /charts/tokens.svg    — rendered top-K bar chart
// GET /charts/wordcloud.svg — rendered word cloud
//
// A chart that cannot be built answers 500 with the reason; other routes are
// unaffected.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::viz::render;
use crate::viz::BarSpec;
use crate::web::{api_error, svg_response, AppState};

#[derive(Deserialize, Default)]
pub struct TokensQuery {
    /// Number of bars (default: configured top K)
    pub top: Option<usize>,
}

/// GET /api/histogram — bin edges and counts for the length histogram.
pub async fn get_histogram(State(state): State<AppState>) -> Response {
    match state.session.histogram() {
        Ok(spec) => Json(spec).into_response(),
        Err(e) => chart_error("histogram", &e),
    }
}

/// GET /api/tokens — the K most frequent tokens.
pub async fn get_tokens(
    State(state): State<AppState>,
    Query(params): Query<TokensQuery>,
) -> Response {
    match params.top {
        Some(0) => api_error(StatusCode::BAD_REQUEST, "top must be at least 1"),
        Some(k) => Json(BarSpec::top_tokens(state.session.frequencies(), k)).into_response(),
        None => Json(state.session.top_tokens()).into_response(),
    }
}

/// GET /charts/histogram.svg
pub async fn histogram_svg(State(state): State<AppState>) -> Response {
    match state
        .session
        .histogram()
        .and_then(|spec| render::histogram_svg(&spec))
    {
        Ok(svg) => svg_response(svg),
        Err(e) => chart_error("histogram", &e),
    }
}

/// GET /charts/tokens.svg
pub async fn tokens_svg(State(state): State<AppState>) -> Response {
    match render::bar_svg(&state.session.top_tokens()) {
        Ok(svg) => svg_response(svg),
        Err(e) => chart_error("top tokens", &e),
    }
}

/// GET /charts/wordcloud.svg
pub async fn wordcloud_svg(State(state): State<AppState>) -> Response {
    match state.session.word_cloud() {
        Ok(image) => svg_response(image.svg.clone()),
        Err(e) => chart_error("word cloud", &e),
    }
}

fn chart_error(chart: &str, e: &dyn std::fmt::Display) -> Response {
    tracing::error!(chart, error = %e, "Chart rendering failed");
    api_error(StatusCode::INTERNAL_SERVER_ERROR, &format!("{chart}: {e}"))
}
