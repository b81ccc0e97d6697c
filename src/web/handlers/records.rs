// Record selector and inspector handlers.
//
// GET /api/records          — selector entries ("Index i | preview...")
// GET /api/records/{index}  — one comparison record
//
// The index is parsed as a signed integer so a negative index reaches the
// inspector and gets its out-of-range message instead of a path rejection.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::web::{api_error, AppState};

/// GET /api/records — every selector entry in dataset order.
pub async fn list_records(State(state): State<AppState>) -> impl IntoResponse {
    let options = state.session.selector_options();
    Json(serde_json::json!({
        "total": options.len(),
        "records": options,
    }))
}

/// GET /api/records/{index} — ground truth and the three predictions.
pub async fn get_record(State(state): State<AppState>, Path(index): Path<i64>) -> Response {
    match state.session.on_select(index) {
        Ok(record) => Json(record).into_response(),
        Err(e) => api_error(StatusCode::NOT_FOUND, &e.to_string()),
    }
}
