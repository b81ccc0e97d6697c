// GET /api/summary — dataset size, tweet lengths, labels and model agreement.

use axum::extract::State;
use axum::Json;

use crate::web::AppState;

/// GET /api/summary — one-shot overview of the loaded dataset.
pub async fn get_summary(State(state): State<AppState>) -> Json<serde_json::Value> {
    let session = &state.session;
    let lengths = session.lengths();
    let labels: Vec<&str> = session
        .dataset()
        .label_set()
        .into_iter()
        .map(|l| l.as_str())
        .collect();

    Json(serde_json::json!({
        "source": session.source().to_string(),
        "records": session.dataset().len(),
        "lengths": {
            "min": lengths.min(),
            "max": lengths.max(),
            "mean": lengths.mean(),
            "total_tokens": lengths.total(),
        },
        "distinct_tokens": session.frequencies().distinct(),
        "labels": labels,
        "agreement": session.agreement(),
    }))
}
