use axum::routing::get;
use axum::Router;

use crate::handlers::plan;
use crate::state::AppState;

/// ```text
/// GET    /    -> get_plan
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(plan::get_plan))
}
