// GET / — the dashboard page.
//
// Same page as `sentiboard report`, except the selector fetches records from
// the API instead of carrying all of them inline.

use axum::extract::State;
use axum::response::Html;

use crate::output::html::{render_dashboard, SelectionMode};
use crate::web::{AppState, RECORDS_PREFIX};

/// GET / — render the dashboard for the loaded session.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let mode = SelectionMode::Api {
        prefix: RECORDS_PREFIX.to_string(),
    };
    Html(render_dashboard(&state.session, &state.config.title, &mode))
}
