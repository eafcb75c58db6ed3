//! Handlers for the caller's connected chat channels.
//!
//! Tokens go in clear on create and only ever come back masked.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use replydesk_core::channel::{filter_channels, NewChannel};
use replydesk_core::store::ChannelStore;
use replydesk_core::types::DbId;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for listing channels.
#[derive(Debug, Deserialize)]
pub struct ChannelQuery {
    /// Case-insensitive substring of the channel name or type.
    pub search: Option<String>,
}

/// GET /api/v1/channels?search=
pub async fn list_channels(
    user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ChannelQuery>,
) -> AppResult<impl IntoResponse> {
    let channels = state.store.list_channels(user.owner).await?;
    let channels = filter_channels(channels, params.search.as_deref());

    Ok(Json(DataResponse { data: channels }))
}

/// POST /api/v1/channels
///
/// Connect a channel. Name and token must be non-blank.
pub async fn create_channel(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<NewChannel>,
) -> AppResult<impl IntoResponse> {
    let input = input.validated()?;
    let channel = state.store.create_channel(user.owner, input).await?;

    tracing::info!(
        channel_id = channel.id,
        kind = %channel.kind,
        owner = %user.owner,
        "Channel created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: channel })))
}

/// DELETE /api/v1/channels/{id}
pub async fn delete_channel(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    state.store.delete_channel(id, user.owner).await?;

    tracing::info!(channel_id = id, owner = %user.owner, "Channel deleted");

    Ok(StatusCode::NO_CONTENT)
}
