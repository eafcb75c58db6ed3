//! Route definitions for connected channels, mounted at `/channels`.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::channel;
use crate::state::AppState;

/// ```text
/// GET    /           -> list_channels (?search=)
/// POST   /           -> create_channel
/// DELETE /{id}       -> delete_channel
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(channel::list_channels).post(channel::create_channel))
        .route("/{id}", delete(channel::delete_channel))
}
