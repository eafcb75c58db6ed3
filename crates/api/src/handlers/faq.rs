//! Handlers for the owner-scoped FAQ knowledge base.
//!
//! Every handler takes [`AuthUser`]; the owner from the token is the only
//! scope the store ever sees, so an id belonging to someone else answers
//! 404 exactly like a missing one.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use replydesk_core::faq::{FaqChanges, NewFaq};
use replydesk_core::store::FaqStore;
use replydesk_core::types::DbId;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/faqs
///
/// List the caller's entries, oldest first.
pub async fn list_faqs(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let entries = state.store.list(user.owner).await?;

    Ok(Json(DataResponse { data: entries }))
}

/// POST /api/v1/faqs
///
/// Create one entry. Question and answer must be non-blank.
pub async fn create_faq(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<NewFaq>,
) -> AppResult<impl IntoResponse> {
    let input = input.validated()?;
    let entry = state.store.create(user.owner, input).await?;

    tracing::info!(
        faq_id = entry.id,
        owner = %user.owner,
        "FAQ entry created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: entry })))
}

/// PUT /api/v1/faqs/{id}
///
/// Partially update an entry. Omitted fields keep their stored value.
pub async fn update_faq(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<FaqChanges>,
) -> AppResult<impl IntoResponse> {
    let input = input.validated()?;
    let entry = state.store.update(id, user.owner, input).await?;

    tracing::info!(faq_id = id, owner = %user.owner, "FAQ entry updated");

    Ok(Json(DataResponse { data: entry }))
}

/// DELETE /api/v1/faqs/{id}
pub async fn delete_faq(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    state.store.delete(id, user.owner).await?;

    tracing::info!(faq_id = id, owner = %user.owner, "FAQ entry deleted");

    Ok(StatusCode::NO_CONTENT)
}
