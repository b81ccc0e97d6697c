// Web server — Axum-based interactive dashboard.
//
// `/` serves the dashboard page in API selection mode: the record selector
// fetches `/api/records/{index}` on change. The /api/* routes serve JSON,
// the /charts/* routes serve the rendered SVGs.
//
// The session is loaded once at startup and shared read-only by every
// handler, so a selection never reloads or recomputes anything.

use std::sync::Arc;

use anyhow::Result;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::Config;
use crate::session::Session;

pub mod handlers;

/// Path the dashboard's selection handler fetches records from.
pub const RECORDS_PREFIX: &str = "/api/records";

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Session>,
    pub config: Arc<Config>,
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(config: Config, session: Session, port: u16, bind: &str) -> Result<()> {
    // Word cloud layout is CPU-bound; do it off the async workers before
    // the first request arrives.
    let session = Arc::new(session);
    let warm = Arc::clone(&session);
    if let Err(e) = tokio::task::spawn_blocking(move || warm.warm_up()).await? {
        warn!(error = %e, "Word cloud unavailable, its panel will show the error");
    }

    let state = AppState {
        session,
        config: Arc::new(config),
    };

    let app = build_router(state);

    let addr = format!("{bind}:{port}");
    info!("Sentiboard dashboard listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard::index))
        .route("/health", get(health))
        .route("/api/summary", get(handlers::summary::get_summary))
        .route("/api/histogram", get(handlers::charts::get_histogram))
        .route("/api/tokens", get(handlers::charts::get_tokens))
        .route(RECORDS_PREFIX, get(handlers::records::list_records))
        .route(
            "/api/records/{index}",
            get(handlers::records::get_record),
        )
        .route(
            "/charts/histogram.svg",
            get(handlers::charts::histogram_svg),
        )
        .route("/charts/tokens.svg", get(handlers::charts::tokens_svg))
        .route(
            "/charts/wordcloud.svg",
            get(handlers::charts::wordcloud_svg),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([axum::http::Method::GET, axum::http::Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check — always returns 200 OK.
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok" })),
    )
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}

/// Wrap a rendered SVG document in a response with the right content type.
pub fn svg_response(svg: String) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "image/svg+xml")],
        svg,
    )
        .into_response()
}
