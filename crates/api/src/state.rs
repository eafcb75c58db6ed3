use std::sync::Arc;

use replydesk_db::store::Backend;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the store handle and config are both shared.
#[derive(Clone)]
pub struct AppState {
    /// FAQ record store selected by `STORE_BACKEND`.
    pub store: Backend,
    pub config: Arc<ServerConfig>,
}
